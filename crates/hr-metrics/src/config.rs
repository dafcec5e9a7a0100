//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the roster export, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/hr_raw_data.csv";

/// Default reference nationality for the localization rate.
pub const DEFAULT_REFERENCE_NATIONALITY: &str = "Saudi";

/// Year the dashboard opens on.
pub const DEFAULT_YEAR: i32 = 2020;

/// Configuration for [`MetricsEngine`](crate::MetricsEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to the roster CSV.
    pub data_path: PathBuf,
    /// Nationality counted as local.
    pub reference_nationality: String,
    /// Year selected before the caller picks one.
    pub default_year: i32,
    /// `chrono` formats tried in order when parsing date cells.
    pub date_formats: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            reference_nationality: DEFAULT_REFERENCE_NATIONALITY.to_string(),
            default_year: DEFAULT_YEAR,
            date_formats: default_date_formats(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration pointing at `data_path` with default settings.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Sets the reference nationality.
    pub fn with_reference_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.reference_nationality = nationality.into();
        self
    }

    /// Sets the initially selected year.
    pub const fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    /// Replaces the accepted date formats.
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

fn default_date_formats() -> Vec<String> {
    [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y",
        "%m/%d/%Y",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
