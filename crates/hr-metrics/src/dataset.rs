//! Roster loading and calendar field derivation.
//!
//! A [`Dataset`] is built once, either from a CSV export or from a list of
//! [`EmployeeRecord`]s, and never changes afterwards. Loading is
//! all-or-nothing: the first malformed row aborts it.

use crate::{
    MetricsError, Result,
    schema::{
        EMPLOYEE_ID, FEMALE, GENDER, HIRING_DATE, HIRING_MONTH, HIRING_YEAR, LAST_WORKING_DATE,
        LAST_WORKING_MONTH, LAST_WORKING_YEAR, MALE, NATIONALITY, REQUIRED_COLUMNS, TENURE_DAYS,
        YEAR,
    },
};
use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Days from 0001-01-01 to 1970-01-01, the epoch of polars `Date` values.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Gender label of an employee.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Gender {
    /// `Male`
    Male,
    /// `Female`
    Female,
    /// Any other label found in the source
    #[display("{_0}")]
    Other(String),
}

impl Gender {
    /// Maps a source label onto a gender. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            MALE => Self::Male,
            FEMALE => Self::Female,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label as it appears in the source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => MALE,
            Self::Female => FEMALE,
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

/// One row of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee identifier
    pub employee_id: String,
    /// Gender, `None` when unknown
    pub gender: Option<Gender>,
    /// Nationality, `None` when unknown
    pub nationality: Option<String>,
    /// First day of employment
    pub hiring_date: NaiveDate,
    /// Last day of employment, `None` while still employed
    pub last_working_date: Option<NaiveDate>,
}

impl EmployeeRecord {
    /// Creates a record for a current employee.
    pub fn new(
        employee_id: impl Into<String>,
        gender: Option<Gender>,
        nationality: Option<&str>,
        hiring_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            gender,
            nationality: nationality.map(str::to_string),
            hiring_date,
            last_working_date: None,
        }
    }

    /// Marks the employee as having left on `date`.
    pub const fn with_last_working_date(mut self, date: NaiveDate) -> Self {
        self.last_working_date = Some(date);
        self
    }
}

/// Immutable in-memory roster with derived calendar columns.
///
/// Columns: `EMPLOYEE_ID`, `GENDER`, `NATIONALITY`, `HIRING_DATE`,
/// `LAST_WORKING_DATE`, plus the derived `HIRING_MONTH`, `HIRING_YEAR`,
/// `LAST_WORKING_MONTH`, `LAST_WORKING_YEAR`, `YEAR` and `TENURE_DAYS`.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Loads a roster CSV from disk.
    ///
    /// `date_formats` are `chrono` format strings tried in order for every
    /// date cell.
    pub fn load(path: impl AsRef<Path>, date_formats: &[String]) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| MetricsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_csv_bytes(bytes, date_formats)?;
        log::info!(
            "Loaded {} employee records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parses a roster from CSV bytes with a header row.
    pub fn from_csv_bytes(bytes: impl Into<Vec<u8>>, date_formats: &[String]) -> Result<Self> {
        // Every cell is read as text so date parsing stays under our control.
        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes.into()))
            .finish()?;

        let records = parse_records(&raw, date_formats)?;
        Self::from_records(&records)
    }

    /// Builds a dataset from already typed records.
    ///
    /// Fails with [`MetricsError::InvalidDateRange`] when a record left before
    /// it was hired.
    pub fn from_records(records: &[EmployeeRecord]) -> Result<Self> {
        let mut ids = Vec::with_capacity(records.len());
        let mut genders = Vec::with_capacity(records.len());
        let mut nationalities = Vec::with_capacity(records.len());
        let mut hired = Vec::with_capacity(records.len());
        let mut left = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if let Some(end) = record.last_working_date
                && end < record.hiring_date
            {
                return Err(MetricsError::InvalidDateRange {
                    row: idx + 1,
                    start: record.hiring_date.to_string(),
                    end: end.to_string(),
                });
            }

            ids.push(record.employee_id.as_str());
            genders.push(record.gender.as_ref().map(Gender::as_str));
            nationalities.push(record.nationality.as_deref());
            hired.push(epoch_days(record.hiring_date));
            left.push(record.last_working_date.map(epoch_days));
        }

        let base = DataFrame::new(vec![
            Series::new(EMPLOYEE_ID.into(), ids).into(),
            Series::new(GENDER.into(), genders).into(),
            Series::new(NATIONALITY.into(), nationalities).into(),
            Series::new(HIRING_DATE.into(), hired)
                .cast(&DataType::Date)?
                .into(),
            Series::new(LAST_WORKING_DATE.into(), left)
                .cast(&DataType::Date)?
                .into(),
        ])?;

        Ok(Self {
            frame: derive_calendar_fields(base)?,
        })
    }

    /// The underlying table.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Lazy view over the table for query building.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Number of employee records.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the roster has no records.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Appends month names, years and tenure.
fn derive_calendar_fields(base: DataFrame) -> Result<DataFrame> {
    let frame = base
        .lazy()
        .with_columns([
            col(HIRING_DATE).dt().to_string("%B").alias(HIRING_MONTH),
            col(HIRING_DATE).dt().year().alias(HIRING_YEAR),
            col(LAST_WORKING_DATE)
                .dt()
                .to_string("%B")
                .alias(LAST_WORKING_MONTH),
            col(LAST_WORKING_DATE).dt().year().alias(LAST_WORKING_YEAR),
            col(HIRING_DATE).dt().year().alias(YEAR),
            (col(LAST_WORKING_DATE).cast(DataType::Int32) - col(HIRING_DATE).cast(DataType::Int32))
                .alias(TENURE_DAYS),
        ])
        .collect()?;

    Ok(frame)
}

/// Converts the all-text CSV frame into typed records.
fn parse_records(raw: &DataFrame, date_formats: &[String]) -> Result<Vec<EmployeeRecord>> {
    for name in REQUIRED_COLUMNS {
        if raw.column(name).is_err() {
            return Err(MetricsError::MissingColumn(name.to_string()));
        }
    }

    let ids = raw.column(EMPLOYEE_ID)?.str()?;
    let genders = raw.column(GENDER)?.str()?;
    let nationalities = raw.column(NATIONALITY)?.str()?;
    let hired = raw.column(HIRING_DATE)?.str()?;
    let left = raw.column(LAST_WORKING_DATE)?.str()?;

    let mut records = Vec::with_capacity(raw.height());
    for idx in 0..raw.height() {
        let row = idx + 1;

        let employee_id = cell(ids.get(idx)).ok_or_else(|| MetricsError::MissingValue {
            column: EMPLOYEE_ID.to_string(),
            row,
        })?;
        let hiring_text = cell(hired.get(idx)).ok_or_else(|| MetricsError::MissingValue {
            column: HIRING_DATE.to_string(),
            row,
        })?;
        let hiring_date = parse_date(hiring_text, HIRING_DATE, row, date_formats)?;
        let last_working_date = cell(left.get(idx))
            .map(|text| parse_date(text, LAST_WORKING_DATE, row, date_formats))
            .transpose()?;

        records.push(EmployeeRecord {
            employee_id: employee_id.to_string(),
            gender: cell(genders.get(idx)).map(Gender::from_label),
            nationality: cell(nationalities.get(idx)).map(str::to_string),
            hiring_date,
            last_working_date,
        });
    }

    Ok(records)
}

/// Trims a cell, treating blank text as absent.
fn cell(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(text: &str, column: &str, row: usize, formats: &[String]) -> Result<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| MetricsError::InvalidDate {
            column: column.to_string(),
            row,
            value: text.to_string(),
        })
}

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
