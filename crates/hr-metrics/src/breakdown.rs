//! Year-filtered headcount breakdowns.
//!
//! Each breakdown filters the roster to one hiring year, groups it, and
//! orders the groups by headcount. Groups with equal headcount keep the
//! ascending order of their keys. Rows with a missing grouping key are left
//! out. A year that matches no rows yields an empty result.

use crate::{
    Dataset, Gender, Result,
    schema::{COUNT, GENDER, NATIONALITY, YEAR},
};
use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// How the dashboard charts a breakdown.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Vertical bars grouped by a secondary key
    GroupedBar,
    /// Horizontal bars, largest at the top
    HorizontalBar,
}

/// A headcount aggregation parameterised by hiring year.
pub trait YearBreakdown: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this breakdown.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Chart the breakdown feeds.
    fn chart(&self) -> ChartKind;

    /// Columns the rows are grouped by, in key order.
    fn group_columns(&self) -> &[&str];

    /// Chart title for `year`.
    fn title(&self, year: i32) -> String;

    /// Computes the breakdown for `year`.
    ///
    /// Returns a DataFrame with the group columns followed by `count`,
    /// sorted by `count` descending.
    fn compute(&self, data: &LazyFrame, year: i32) -> Result<DataFrame> {
        let keys = self.group_columns();

        let present = keys
            .iter()
            .map(|key| col(*key).is_not_null())
            .reduce(|acc, cond| acc.and(cond))
            .unwrap_or_else(|| lit(true));

        let mut sort_by = vec![col(COUNT)];
        sort_by.extend(keys.iter().map(|key| col(*key)));
        let mut descending = vec![true];
        descending.extend(keys.iter().map(|_| false));

        let result = data
            .clone()
            .filter(col(YEAR).eq(lit(year)))
            .filter(present)
            .group_by(keys.iter().map(|key| col(*key)).collect::<Vec<_>>())
            .agg([len().cast(DataType::UInt64).alias(COUNT)])
            .sort_by_exprs(
                sort_by,
                SortMultipleOptions::default()
                    .with_order_descending_multi(descending)
                    .with_maintain_order(true),
            )
            .collect()?;

        Ok(result)
    }
}

/// Headcount per (gender, nationality) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderNationalityBreakdown;

impl GenderNationalityBreakdown {
    /// Bar colour for a gender.
    pub const fn bar_colour(gender: &Gender) -> &'static str {
        match gender {
            Gender::Male => "#00FFFF",
            Gender::Female => "#FFFF00",
            Gender::Other(_) => "#808080",
        }
    }
}

impl YearBreakdown for GenderNationalityBreakdown {
    fn name(&self) -> &str {
        "gender_by_nationality"
    }

    fn description(&self) -> &str {
        "Employees hired in the year, by gender and nationality"
    }

    fn chart(&self) -> ChartKind {
        ChartKind::GroupedBar
    }

    fn group_columns(&self) -> &[&str] {
        &[GENDER, NATIONALITY]
    }

    fn title(&self, year: i32) -> String {
        format!("Gender Count By Nationality in {year}")
    }
}

/// Headcount per nationality.
#[derive(Debug, Clone, Copy, Default)]
pub struct NationalityBreakdown;

impl YearBreakdown for NationalityBreakdown {
    fn name(&self) -> &str {
        "by_nationality"
    }

    fn description(&self) -> &str {
        "Employees hired in the year, by nationality"
    }

    fn chart(&self) -> ChartKind {
        ChartKind::HorizontalBar
    }

    fn group_columns(&self) -> &[&str] {
        &[NATIONALITY]
    }

    fn title(&self, year: i32) -> String {
        format!("Employee count per Nationality in {year}")
    }
}

/// One bar of the gender by nationality chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderNationalityCount {
    /// Gender
    pub gender: Gender,
    /// Nationality
    pub nationality: String,
    /// Employees hired
    pub count: u64,
}

/// One bar of the nationality chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalityCount {
    /// Nationality
    pub nationality: String,
    /// Employees hired
    pub count: u64,
}

/// Both breakdowns for one hiring year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBreakdowns {
    /// Hiring year the breakdowns were filtered to
    pub year: i32,
    /// Gender by nationality, largest first
    pub gender_by_nationality: Vec<GenderNationalityCount>,
    /// Nationality counts, largest first
    pub by_nationality: Vec<NationalityCount>,
}

/// Gender by nationality headcount for employees hired in `year`.
pub fn gender_nationality_breakdown(
    dataset: &Dataset,
    year: i32,
) -> Result<Vec<GenderNationalityCount>> {
    let frame = GenderNationalityBreakdown.compute(&dataset.lazy(), year)?;

    let genders = frame.column(GENDER)?.str()?;
    let nationalities = frame.column(NATIONALITY)?.str()?;
    let counts = frame.column(COUNT)?.u64()?;

    Ok(genders
        .into_iter()
        .zip(nationalities.into_iter())
        .zip(counts.into_iter())
        .filter_map(|((gender, nationality), count)| {
            Some(GenderNationalityCount {
                gender: Gender::from_label(gender?),
                nationality: nationality?.to_string(),
                count: count?,
            })
        })
        .collect())
}

/// Nationality headcount for employees hired in `year`.
pub fn nationality_breakdown(dataset: &Dataset, year: i32) -> Result<Vec<NationalityCount>> {
    let frame = NationalityBreakdown.compute(&dataset.lazy(), year)?;

    let nationalities = frame.column(NATIONALITY)?.str()?;
    let counts = frame.column(COUNT)?.u64()?;

    Ok(nationalities
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(nationality, count)| {
            Some(NationalityCount {
                nationality: nationality?.to_string(),
                count: count?,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmployeeRecord;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn hire(gender: Option<Gender>, nationality: Option<&str>, year: i32) -> EmployeeRecord {
        EmployeeRecord::new(
            "x",
            gender,
            nationality,
            NaiveDate::from_ymd_opt(year, 5, 10).unwrap(),
        )
    }

    fn roster() -> Dataset {
        Dataset::from_records(&[
            hire(Some(Gender::Male), Some("Saudi"), 2020),
            hire(Some(Gender::Female), Some("Saudi"), 2020),
            hire(Some(Gender::Male), Some("Indian"), 2020),
            hire(Some(Gender::Male), Some("Indian"), 2020),
            hire(Some(Gender::Female), Some("Egyptian"), 2020),
            hire(Some(Gender::Male), Some("Egyptian"), 2020),
            hire(Some(Gender::Male), Some("Egyptian"), 2020),
            hire(None, Some("Egyptian"), 2020),
            hire(Some(Gender::Female), None, 2020),
            hire(Some(Gender::Male), Some("Saudi"), 2019),
        ])
        .unwrap()
    }

    fn pair(gender: Gender, nationality: &str, count: u64) -> GenderNationalityCount {
        GenderNationalityCount {
            gender,
            nationality: nationality.to_string(),
            count,
        }
    }

    #[test]
    fn test_gender_nationality_breakdown() {
        let rows = gender_nationality_breakdown(&roster(), 2020).unwrap();

        assert_eq!(
            rows,
            vec![
                pair(Gender::Male, "Egyptian", 2),
                pair(Gender::Male, "Indian", 2),
                pair(Gender::Female, "Egyptian", 1),
                pair(Gender::Female, "Saudi", 1),
                pair(Gender::Male, "Saudi", 1),
            ]
        );
    }

    #[test]
    fn test_nationality_breakdown() {
        let rows = nationality_breakdown(&roster(), 2020).unwrap();
        let flat = rows
            .iter()
            .map(|r| (r.nationality.as_str(), r.count))
            .collect::<Vec<_>>();

        // The unknown-gender Egyptian still counts here, the unknown nationality does not
        assert_eq!(flat, vec![("Egyptian", 4), ("Indian", 2), ("Saudi", 2)]);
    }

    #[rstest]
    #[case(1999)]
    #[case(2021)]
    #[case(-5)]
    fn test_unknown_year_is_empty(#[case] year: i32) {
        let dataset = roster();
        assert!(gender_nationality_breakdown(&dataset, year).unwrap().is_empty());
        assert!(nationality_breakdown(&dataset, year).unwrap().is_empty());
    }

    #[test]
    fn test_breakdown_is_idempotent() {
        let dataset = roster();
        assert_eq!(
            gender_nationality_breakdown(&dataset, 2020).unwrap(),
            gender_nationality_breakdown(&dataset, 2020).unwrap()
        );
        assert_eq!(
            nationality_breakdown(&dataset, 2020).unwrap(),
            nationality_breakdown(&dataset, 2020).unwrap()
        );
    }

    #[test]
    fn test_compute_frame_shape() {
        let frame = NationalityBreakdown
            .compute(&roster().lazy(), 2019)
            .unwrap();

        assert_eq!(frame.height(), 1);
        assert_eq!(frame.width(), 2);
        assert!(frame.column(NATIONALITY).is_ok());
        assert!(frame.column(COUNT).is_ok());
    }

    #[test]
    fn test_breakdown_metadata() {
        let breakdown = GenderNationalityBreakdown;
        assert_eq!(breakdown.name(), "gender_by_nationality");
        assert_eq!(breakdown.chart(), ChartKind::GroupedBar);
        assert_eq!(breakdown.group_columns(), &[GENDER, NATIONALITY]);
        assert_eq!(breakdown.title(2020), "Gender Count By Nationality in 2020");

        let breakdown = NationalityBreakdown;
        assert_eq!(breakdown.name(), "by_nationality");
        assert_eq!(breakdown.chart(), ChartKind::HorizontalBar);
        assert_eq!(breakdown.title(2019), "Employee count per Nationality in 2019");
    }

    #[test]
    fn test_bar_colours() {
        assert_eq!(GenderNationalityBreakdown::bar_colour(&Gender::Male), "#00FFFF");
        assert_eq!(GenderNationalityBreakdown::bar_colour(&Gender::Female), "#FFFF00");
    }
}
