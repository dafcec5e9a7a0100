//! Column names of the roster table.
//!
//! Source columns come straight from the HR export; derived columns are
//! appended by [`Dataset`](crate::Dataset) at load time.

/// Employee identifier.
pub const EMPLOYEE_ID: &str = "EMPLOYEE_ID";
/// Gender label (`Male`, `Female`, or anything else).
pub const GENDER: &str = "GENDER";
/// Nationality label.
pub const NATIONALITY: &str = "NATIONALITY";
/// Hiring date.
pub const HIRING_DATE: &str = "HIRING_DATE";
/// Last working date, blank while still employed.
pub const LAST_WORKING_DATE: &str = "LAST_WORKING_DATE";

/// Month name of the hiring date.
pub const HIRING_MONTH: &str = "HIRING_MONTH";
/// Calendar year of the hiring date.
pub const HIRING_YEAR: &str = "HIRING_YEAR";
/// Month name of the last working date.
pub const LAST_WORKING_MONTH: &str = "LAST_WORKING_MONTH";
/// Calendar year of the last working date.
pub const LAST_WORKING_YEAR: &str = "LAST_WORKING_YEAR";
/// Grouping year. Always the hiring year.
pub const YEAR: &str = "YEAR";
/// Whole days between hiring and last working date.
pub const TENURE_DAYS: &str = "TENURE_DAYS";

/// Aggregated row count column produced by group-by queries.
pub const COUNT: &str = "count";

/// Columns every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [EMPLOYEE_ID, GENDER, NATIONALITY, HIRING_DATE, LAST_WORKING_DATE];

/// Gender label counted as female.
pub const FEMALE: &str = "Female";
/// Gender label counted as male.
pub const MALE: &str = "Male";
