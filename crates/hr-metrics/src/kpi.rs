//! Workforce-wide KPIs.
//!
//! The snapshot is computed once per dataset. Percentages follow
//! [`rounded_share`], so they are rounded to one decimal as a fraction and
//! then scaled.

use crate::{
    Dataset, Result,
    rounding::{format_decimal, round_to, rounded_share},
    schema::{EMPLOYEE_ID, FEMALE, GENDER, MALE, NATIONALITY, TENURE_DAYS},
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Nationality whose localization KPI is labelled "Saudization".
const SAUDI: &str = "Saudi";

const TOTAL: &str = "total";
const FEMALES: &str = "females";
const MALES: &str = "males";
const LOCALS: &str = "locals";
const TENURE_SUM: &str = "tenure_sum";

/// Headline figures for the whole roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Number of employees
    pub total_employees: u64,
    /// Employees labelled `Female`
    pub female_employees: u64,
    /// Employees labelled `Male`
    pub male_employees: u64,
    /// Employees with any other or no gender label
    pub other_gender_employees: u64,
    /// `round(female / total, 1) * 100`
    pub female_percentage: f64,
    /// `round(reference nationality / total, 1) * 100`
    pub localization_rate: f64,
    /// Total tenure days over total employees, one decimal
    pub average_tenure_days: f64,
    /// Average tenure days over 365, one decimal
    pub average_tenure_years: f64,
    /// Nationality the localization rate refers to
    pub reference_nationality: String,
}

impl KpiSnapshot {
    /// One-line summary for the dashboard ticker.
    pub fn ticker(&self) -> String {
        let label = if self.reference_nationality == SAUDI {
            "SAUDIZATION"
        } else {
            "LOCALIZATION"
        };
        format!(
            "Total Employees Since 2020: {} --TOTAL FEMALE EMPLOYEES: {}--PERCENTAGE OF FEMALE EMPLOYEES : {}%--{}:{}%---AVERAGE ANNUAL TENURE: {} YEARS",
            self.total_employees,
            self.female_employees,
            format_decimal(self.female_percentage),
            label,
            format_decimal(self.localization_rate),
            format_decimal(self.average_tenure_years),
        )
    }
}

/// Computes the KPI snapshot.
///
/// Employees without a last working date add zero days to the tenure total
/// but still count in the denominator. An empty roster yields zeros.
pub fn compute_kpis(dataset: &Dataset, reference_nationality: &str) -> Result<KpiSnapshot> {
    let totals = dataset
        .lazy()
        .select([
            col(EMPLOYEE_ID)
                .count()
                .cast(DataType::UInt64)
                .alias(TOTAL),
            col(GENDER)
                .eq(lit(FEMALE))
                .sum()
                .cast(DataType::UInt64)
                .alias(FEMALES),
            col(GENDER)
                .eq(lit(MALE))
                .sum()
                .cast(DataType::UInt64)
                .alias(MALES),
            col(NATIONALITY)
                .eq(lit(reference_nationality))
                .sum()
                .cast(DataType::UInt64)
                .alias(LOCALS),
            col(TENURE_DAYS)
                .cast(DataType::Int64)
                .sum()
                .alias(TENURE_SUM),
        ])
        .collect()?;

    let total = scalar_u64(&totals, TOTAL)?;
    let females = scalar_u64(&totals, FEMALES)?;
    let males = scalar_u64(&totals, MALES)?;
    let locals = scalar_u64(&totals, LOCALS)?;
    let tenure_sum = totals.column(TENURE_SUM)?.i64()?.get(0).unwrap_or(0);

    let average_tenure_days = if total == 0 {
        0.0
    } else {
        round_to(tenure_sum as f64 / total as f64, 1)
    };

    Ok(KpiSnapshot {
        total_employees: total,
        female_employees: females,
        male_employees: males,
        other_gender_employees: total.saturating_sub(females + males),
        female_percentage: rounded_share(females, total),
        localization_rate: rounded_share(locals, total),
        average_tenure_days,
        average_tenure_years: round_to(average_tenure_days / 365.0, 1),
        reference_nationality: reference_nationality.to_string(),
    })
}

fn scalar_u64(frame: &DataFrame, name: &str) -> Result<u64> {
    Ok(frame.column(name)?.u64()?.get(0).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmployeeRecord, Gender};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::from_records(&[
            EmployeeRecord::new("1", Some(Gender::Male), Some("Saudi"), date(2020, 1, 1))
                .with_last_working_date(date(2021, 1, 1)),
            EmployeeRecord::new("2", Some(Gender::Female), Some("Saudi"), date(2020, 6, 1)),
            EmployeeRecord::new("3", Some(Gender::Male), Some("Egyptian"), date(2019, 1, 1))
                .with_last_working_date(date(2019, 6, 1)),
        ])
        .unwrap()
    }

    #[test]
    fn test_kpi_snapshot() {
        let kpis = compute_kpis(&sample(), "Saudi").unwrap();

        assert_eq!(kpis.total_employees, 3);
        assert_eq!(kpis.female_employees, 1);
        assert_eq!(kpis.male_employees, 2);
        assert_eq!(kpis.other_gender_employees, 0);
        // 1/3 -> 0.3 -> 30
        assert_relative_eq!(kpis.female_percentage, 30.0, epsilon = 1e-9);
        // 2/3 -> 0.7 -> 70
        assert_relative_eq!(kpis.localization_rate, 70.0, epsilon = 1e-9);
        // (366 + 0 + 151) / 3 = 172.33
        assert_relative_eq!(kpis.average_tenure_days, 172.3, epsilon = 1e-9);
        // 172.3 / 365 = 0.472
        assert_relative_eq!(kpis.average_tenure_years, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_gender_counts_partition_total() {
        let dataset = Dataset::from_records(&[
            EmployeeRecord::new("1", Some(Gender::Male), Some("Saudi"), date(2020, 1, 1)),
            EmployeeRecord::new("2", Some(Gender::Female), None, date(2020, 1, 1)),
            EmployeeRecord::new(
                "3",
                Some(Gender::Other("Undisclosed".to_string())),
                Some("Indian"),
                date(2021, 1, 1),
            ),
            EmployeeRecord::new("4", None, Some("Saudi"), date(2022, 1, 1)),
        ])
        .unwrap();

        let kpis = compute_kpis(&dataset, "Saudi").unwrap();
        assert_eq!(kpis.other_gender_employees, 2);
        assert_eq!(
            kpis.female_employees + kpis.male_employees + kpis.other_gender_employees,
            kpis.total_employees
        );
    }

    #[test]
    fn test_percentages_round_before_scaling() {
        // 453 of 1000 are Saudi women: raw share 0.453
        let records = (0..1000)
            .map(|i| {
                if i < 453 {
                    EmployeeRecord::new(i.to_string(), Some(Gender::Female), Some("Saudi"), date(2020, 1, 1))
                } else {
                    EmployeeRecord::new(i.to_string(), Some(Gender::Male), Some("Filipino"), date(2020, 1, 1))
                }
            })
            .collect::<Vec<_>>();
        let dataset = Dataset::from_records(&records).unwrap();

        let kpis = compute_kpis(&dataset, "Saudi").unwrap();
        assert_relative_eq!(kpis.female_percentage, 50.0, epsilon = 1e-9);
        assert_relative_eq!(kpis.localization_rate, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tenure_ignores_open_contracts_in_numerator_only() {
        let dataset = Dataset::from_records(&[
            EmployeeRecord::new("1", Some(Gender::Male), Some("Saudi"), date(2020, 1, 1))
                .with_last_working_date(date(2020, 1, 11)),
            EmployeeRecord::new("2", Some(Gender::Male), Some("Saudi"), date(2020, 1, 1)),
        ])
        .unwrap();

        let kpis = compute_kpis(&dataset, "Saudi").unwrap();
        assert_relative_eq!(kpis.average_tenure_days, 5.0, epsilon = 1e-9);
        assert_relative_eq!(kpis.average_tenure_years, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_roster() {
        let dataset = Dataset::from_records(&[]).unwrap();
        let kpis = compute_kpis(&dataset, "Saudi").unwrap();

        assert_eq!(kpis.total_employees, 0);
        assert_eq!(kpis.female_percentage, 0.0);
        assert_eq!(kpis.localization_rate, 0.0);
        assert_eq!(kpis.average_tenure_days, 0.0);
    }

    #[test]
    fn test_ticker() {
        let kpis = compute_kpis(&sample(), "Saudi").unwrap();
        let ticker = kpis.ticker();

        assert!(ticker.starts_with("Total Employees Since 2020: 3 --TOTAL FEMALE EMPLOYEES: 1"));
        assert!(ticker.contains("SAUDIZATION:70.0%"));
        assert!(ticker.ends_with("AVERAGE ANNUAL TENURE: 0.5 YEARS"));

        let kpis = compute_kpis(&sample(), "Egyptian").unwrap();
        assert!(kpis.ticker().contains("LOCALIZATION:30.0%"));
    }

}
