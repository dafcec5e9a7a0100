//! Query interface for the presentation layer.
//!
//! [`MetricsEngine`] owns the loaded roster. Everything that does not depend
//! on the selected year is computed once when the engine is built; per-year
//! breakdowns are recomputed on every call. All methods take `&self`, so a
//! single engine can serve concurrent callers without locking.

use crate::{
    Dataset, EngineConfig, KpiSnapshot, Result,
    breakdown::{YearBreakdowns, gender_nationality_breakdown, nationality_breakdown},
    kpi::compute_kpis,
    localization::{YearCount, localization_series},
    schema::YEAR,
};
use polars::prelude::*;

/// HR metrics over an immutable roster.
#[derive(Debug)]
pub struct MetricsEngine {
    dataset: Dataset,
    config: EngineConfig,
    kpis: KpiSnapshot,
    localization: Vec<YearCount>,
    years: Vec<i32>,
}

impl MetricsEngine {
    /// Loads the roster at `config.data_path` and builds the engine.
    pub fn load(config: EngineConfig) -> Result<Self> {
        let dataset = Dataset::load(&config.data_path, &config.date_formats)?;
        Self::new(dataset, config)
    }

    /// Builds the engine over an already loaded roster.
    pub fn new(dataset: Dataset, config: EngineConfig) -> Result<Self> {
        let kpis = compute_kpis(&dataset, &config.reference_nationality)?;
        let localization = localization_series(&dataset, &config.reference_nationality)?;
        let years = hiring_years(&dataset)?;

        match (years.first(), years.last()) {
            (Some(first), Some(last)) => log::info!(
                "Metrics engine ready: {} employees hired {first}..={last}",
                kpis.total_employees
            ),
            _ => log::warn!("Metrics engine built over an empty roster"),
        }

        Ok(Self {
            dataset,
            config,
            kpis,
            localization,
            years,
        })
    }

    /// The roster.
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The configuration the engine was built with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Workforce-wide KPIs.
    pub const fn kpi_snapshot(&self) -> &KpiSnapshot {
        &self.kpis
    }

    /// Reference-nationality hires per year, ascending.
    pub fn localization_series(&self) -> &[YearCount] {
        &self.localization
    }

    /// Distinct hiring years, ascending.
    pub fn available_years(&self) -> &[i32] {
        &self.years
    }

    /// Year to preselect: the configured default if present in the data,
    /// otherwise the latest hiring year. `None` for an empty roster.
    pub fn default_year(&self) -> Option<i32> {
        if self.years.contains(&self.config.default_year) {
            Some(self.config.default_year)
        } else {
            self.years.last().copied()
        }
    }

    /// Both per-year breakdowns. Empty for years with no hires.
    pub fn breakdowns_for_year(&self, year: i32) -> Result<YearBreakdowns> {
        log::debug!("Computing breakdowns for {year}");
        Ok(YearBreakdowns {
            year,
            gender_by_nationality: gender_nationality_breakdown(&self.dataset, year)?,
            by_nationality: nationality_breakdown(&self.dataset, year)?,
        })
    }
}

fn hiring_years(dataset: &Dataset) -> Result<Vec<i32>> {
    let frame = dataset
        .lazy()
        .select([col(YEAR).unique()])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(frame.column(YEAR)?.i32()?.into_iter().flatten().collect())
}
