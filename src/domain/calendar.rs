//! Calendar-month helpers.

use chrono::NaiveDate;

use crate::error::ReportError;

/// Validate the reporting period: month in 1..=12, year a positive four-digit
/// integer. Runs before any network call.
pub fn validate_period(year: i32, month: u32) -> Result<(), ReportError> {
    if !(1..=12).contains(&month) {
        return Err(ReportError::validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    if !(1000..=9999).contains(&year) {
        return Err(ReportError::validation(format!(
            "year must be a positive four-digit integer, got {year}"
        )));
    }
    Ok(())
}

/// Number of days in the given calendar month.
///
/// Callers must have validated the period; an out-of-range month yields 0.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| chrono::Datelike::day(&d))
        .unwrap_or(0)
}

/// First and last calendar day of the month, the date range the fetch covers.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ReportError> {
    validate_period(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ReportError::validation(format!("invalid date {year}-{month:02}-01"))
    })?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).ok_or_else(
        || ReportError::validation(format!("invalid date {year}-{month:02}")),
    )?;
    Ok((first, last))
}

/// Human-readable period label, e.g. "March 2023".
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%B %Y").to_string(),
        None => format!("{year}-{month:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_period_accepts_normal_months() {
        for month in 1..=12 {
            assert!(validate_period(2023, month).is_ok());
        }
    }

    #[test]
    fn validate_period_rejects_month_13() {
        let err = validate_period(2023, 13).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[test]
    fn validate_period_rejects_non_four_digit_years() {
        assert!(validate_period(0, 1).is_err());
        assert!(validate_period(-5, 1).is_err());
        assert!(validate_period(999, 1).is_err());
        assert!(validate_period(10_000, 1).is_err());
    }

    #[test]
    fn days_in_month_handles_lengths_and_leap_years() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn month_window_spans_first_to_last_day() {
        let (first, last) = month_window(2023, 3).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());

        let (first, last) = month_window(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_label_formats_period() {
        assert_eq!(month_label(2023, 3), "March 2023");
        assert_eq!(month_label(2024, 12), "December 2024");
    }
}
