//! Yearly hiring of the reference nationality.

use crate::{
    Dataset, Result,
    schema::{COUNT, NATIONALITY, YEAR},
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of employees hired in a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    /// Hiring year
    pub year: i32,
    /// Employees hired that year
    pub count: u64,
}

/// Counts employees of `nationality` per hiring year, ascending by year.
///
/// Returns an empty series when nobody holds that nationality.
pub fn localization_series(dataset: &Dataset, nationality: &str) -> Result<Vec<YearCount>> {
    let frame = dataset
        .lazy()
        .filter(col(NATIONALITY).eq(lit(nationality)))
        .group_by([col(YEAR)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    let years = frame.column(YEAR)?.i32()?;
    let counts = frame.column(COUNT)?.u64()?;

    Ok(years
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(year, count)| {
            Some(YearCount {
                year: year?,
                count: count?,
            })
        })
        .collect())
}
