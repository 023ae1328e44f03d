//! Date parsing helpers.

use braid_traits::{Result, TransformError};
use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;

/// Date format accepted by the date helpers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a string date column into ordinal day-of-year values (1 through
/// 365, or 366 in leap years).
///
/// # Errors
/// Returns an error for missing columns, null values, and strings that do
/// not parse as [`DATE_FORMAT`] dates.
pub fn ordinal_days(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let series = df.column(column)?.as_materialized_series();
    let ca = series.str()?;
    let mut out = Vec::with_capacity(ca.len());
    for value in ca {
        let Some(raw) = value else {
            return Err(TransformError::DateParse {
                column: column.to_string(),
                message: "null value".to_string(),
            });
        };
        let date =
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| TransformError::DateParse {
                column: column.to_string(),
                message: format!("'{raw}': {e}"),
            })?;
        out.push(f64::from(date.ordinal()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2024-01-01", 1.0)]
    #[case("2024-03-01", 61.0)] // leap year
    #[case("2023-03-01", 60.0)]
    #[case("2024-12-31", 366.0)]
    #[case("2023-12-31", 365.0)]
    fn test_ordinal_day(#[case] date: &str, #[case] expected: f64) {
        let frame = df!("date" => [date]).unwrap();
        assert_eq!(ordinal_days(&frame, "date").unwrap(), vec![expected]);
    }

    #[test]
    fn test_malformed_date() {
        let frame = df!("date" => ["2024-13-01"]).unwrap();
        let err = ordinal_days(&frame, "date").unwrap_err();
        assert!(matches!(err, TransformError::DateParse { .. }));
    }

    #[test]
    fn test_missing_column() {
        let frame = df!("other" => ["2024-01-01"]).unwrap();
        assert!(ordinal_days(&frame, "date").is_err());
    }
}
