//! Text formatting for the statistics section of the report.

use rust_decimal::Decimal;

use crate::domain::MonthlyAnalysis;

/// Format a currency value with a dollar sign, thousands separators, and two
/// decimal places, e.g. `$1,234.50`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let raw = format!("{rounded:.2}");
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// The five scalar statistics lines of the report, in display order.
pub fn summary_lines(analysis: &MonthlyAnalysis) -> Vec<String> {
    vec![
        format!("Total Supporters: {}", analysis.total_supporters),
        format!("Unique Supporters: {}", analysis.unique_supporters),
        format!("Total Donations: {}", analysis.total_donations),
        format!("Total Revenue: {}", format_money(analysis.total_revenue)),
        format!(
            "Average Donation: {}",
            format_money(analysis.average_donation)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(dec("0")), "$0.00");
        assert_eq!(format_money(dec("7.5")), "$7.50");
        assert_eq!(format_money(dec("999.99")), "$999.99");
        assert_eq!(format_money(dec("1234.5")), "$1,234.50");
        assert_eq!(format_money(dec("1234567.89")), "$1,234,567.89");
    }

    #[test]
    fn money_formatting_rounds_to_cents() {
        assert_eq!(format_money(dec("10.005")), "$10.00");
        assert_eq!(format_money(dec("10.015")), "$10.02");
        assert_eq!(format_money(dec("10.999")), "$11.00");
    }

    #[test]
    fn summary_lines_cover_all_scalar_fields() {
        let mut analysis = MonthlyAnalysis::empty();
        analysis.total_supporters = 3;
        analysis.unique_supporters = 2;
        analysis.total_donations = 3;
        analysis.total_revenue = dec("35.00");
        analysis.average_donation = dec("11.67");

        let lines = summary_lines(&analysis);
        assert_eq!(
            lines,
            vec![
                "Total Supporters: 3",
                "Unique Supporters: 2",
                "Total Donations: 3",
                "Total Revenue: $35.00",
                "Average Donation: $11.67",
            ]
        );
    }
}
