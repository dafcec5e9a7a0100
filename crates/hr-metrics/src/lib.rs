#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod breakdown;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod kpi;
pub mod localization;
pub mod registry;
pub mod rounding;
pub mod schema;

// Re-export core types
pub use breakdown::{
    ChartKind, GenderNationalityBreakdown, GenderNationalityCount, NationalityBreakdown,
    NationalityCount, YearBreakdown, YearBreakdowns, gender_nationality_breakdown,
    nationality_breakdown,
};
pub use config::EngineConfig;
pub use dataset::{Dataset, EmployeeRecord, Gender};
pub use engine::MetricsEngine;
pub use error::{MetricsError, Result};
pub use kpi::{KpiSnapshot, compute_kpis};
pub use localization::{YearCount, localization_series};
pub use registry::{BreakdownInfo, BreakdownRegistry};
pub use rounding::{format_decimal, round_to, rounded_share};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
