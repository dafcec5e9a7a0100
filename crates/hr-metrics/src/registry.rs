//! Breakdown registry for discovery and introspection.
//!
//! The registry lets a presentation layer enumerate the per-year charts it
//! can draw and compute any of them by name.

use crate::{
    MetricsError, Result,
    breakdown::{ChartKind, GenderNationalityBreakdown, NationalityBreakdown, YearBreakdown},
};
use polars::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Metadata for breakdown introspection.
#[derive(Debug, Clone)]
pub struct BreakdownInfo {
    /// Breakdown name (unique identifier)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Chart kind
    pub chart: ChartKind,
    /// Grouping columns
    pub group_columns: Vec<String>,
}

/// Registry of year breakdowns.
#[derive(Debug, Default)]
pub struct BreakdownRegistry {
    breakdowns: HashMap<String, Arc<dyn YearBreakdown>>,
}

impl BreakdownRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            breakdowns: HashMap::new(),
        }
    }

    /// Register the dashboard's standard breakdowns.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GenderNationalityBreakdown));
        registry.register(Arc::new(NationalityBreakdown));
        registry
    }

    /// Register a breakdown, replacing any with the same name.
    pub fn register(&mut self, breakdown: Arc<dyn YearBreakdown>) {
        self.breakdowns
            .insert(breakdown.name().to_string(), breakdown);
    }

    /// Get a breakdown by name.
    pub fn get(&self, name: &str) -> Option<&dyn YearBreakdown> {
        self.breakdowns.get(name).map(|b| b.as_ref())
    }

    /// Get all breakdown metadata, sorted by name.
    pub fn all_info(&self) -> Vec<BreakdownInfo> {
        let mut info = self
            .breakdowns
            .values()
            .map(|b| BreakdownInfo {
                name: b.name().to_string(),
                description: b.description().to_string(),
                chart: b.chart(),
                group_columns: b.group_columns().iter().map(|s| s.to_string()).collect(),
            })
            .collect::<Vec<_>>();
        info.sort_by(|a, b| a.name.cmp(&b.name));
        info
    }

    /// Compute the named breakdown for `year`.
    pub fn compute(&self, name: &str, data: &LazyFrame, year: i32) -> Result<DataFrame> {
        self.get(name)
            .ok_or_else(|| MetricsError::NotFound(name.to_string()))?
            .compute(data, year)
    }

    /// Number of registered breakdowns.
    pub fn len(&self) -> usize {
        self.breakdowns.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.breakdowns.is_empty()
    }
}
