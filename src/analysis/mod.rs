//! Monthly aggregation over fetched donation records.
//!
//! All money math uses `Decimal`; binary floating point never touches an
//! amount, so sums stay exact across arbitrarily many small donations.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::domain::{DonationRecord, MonthlyAnalysis, SupporterTotal, days_in_month};

/// Ranking length for the top-supporters table and chart.
pub const TOP_SUPPORTERS_LIMIT: usize = 10;

/// Compute the monthly aggregate for an ordered batch of donation records.
///
/// Empty input yields the all-zero aggregate rather than an error; signaling
/// an empty month is the pipeline's job, not this function's.
pub fn analyze(records: &[DonationRecord], year: i32, month: u32) -> MonthlyAnalysis {
    if records.is_empty() {
        return MonthlyAnalysis::empty();
    }

    let total_donations = records.len();
    let unique_supporters = records
        .iter()
        .map(|r| r.supporter_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_revenue: Decimal = records.iter().map(|r| r.amount).sum();
    let average_donation = (total_revenue / Decimal::from(total_donations as u64)).round_dp(2);

    MonthlyAnalysis {
        total_supporters: total_donations,
        unique_supporters,
        total_donations,
        total_revenue,
        average_donation,
        top_supporters: rank_top_supporters(records, TOP_SUPPORTERS_LIMIT),
        daily_revenue: daily_revenue(records, year, month),
    }
}

/// Group records by supporter, sum per group, and rank.
///
/// Ordering is deterministic: descending total, then ascending display name,
/// then ascending supporter id.
pub fn rank_top_supporters(records: &[DonationRecord], limit: usize) -> Vec<SupporterTotal> {
    struct Accum {
        name: String,
        total: Decimal,
        donations: usize,
    }

    let mut by_supporter: HashMap<&str, Accum> = HashMap::new();
    for r in records {
        by_supporter
            .entry(r.supporter_id.as_str())
            .and_modify(|a| {
                a.total += r.amount;
                a.donations += 1;
            })
            .or_insert_with(|| Accum {
                name: r.supporter_name.clone(),
                total: r.amount,
                donations: 1,
            });
    }

    let mut ranked: Vec<(&str, Accum)> = by_supporter.into_iter().collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| id_a.cmp(id_b))
    });
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(_, a)| SupporterTotal {
            name: a.name,
            total: a.total,
            donations: a.donations,
        })
        .collect()
}

/// Revenue per calendar day, one entry for every day of the month in
/// ascending order; days without donations stay at zero.
fn daily_revenue(records: &[DonationRecord], year: i32, month: u32) -> BTreeMap<u32, Decimal> {
    let mut daily: BTreeMap<u32, Decimal> = (1..=days_in_month(year, month))
        .map(|day| (day, Decimal::ZERO))
        .collect();

    for r in records {
        let date = r.timestamp.date();
        if date.year() != year || date.month() != month {
            // The fetch window should preclude this; a stray record must not
            // invent a day outside the month.
            continue;
        }
        if let Some(value) = daily.get_mut(&date.day()) {
            *value += r.amount;
        }
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, name: &str, amount: &str, day: u32) -> DonationRecord {
        DonationRecord {
            supporter_id: id.to_string(),
            supporter_name: name.to_string(),
            amount: amount.parse().unwrap(),
            timestamp: NaiveDate::from_ymd_opt(2023, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn march_2023_scenario() {
        // Supporter A gives 10.00 and 5.00, supporter B gives 20.00.
        let records = vec![
            record("a", "Alice", "10.00", 1),
            record("b", "Bob", "20.00", 2),
            record("a", "Alice", "5.00", 3),
        ];

        let analysis = analyze(&records, 2023, 3);
        assert_eq!(analysis.total_revenue, dec("35.00"));
        assert_eq!(analysis.total_supporters, 3);
        assert_eq!(analysis.total_donations, 3);
        assert_eq!(analysis.unique_supporters, 2);

        let tops = &analysis.top_supporters;
        assert_eq!(tops.len(), 2);
        assert_eq!((tops[0].name.as_str(), tops[0].total), ("Bob", dec("20.00")));
        assert_eq!(
            (tops[1].name.as_str(), tops[1].total),
            ("Alice", dec("15.00"))
        );
        assert_eq!(tops[1].donations, 2);
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        // 10,000 donations of 0.10 must sum to exactly 1000.00.
        let records: Vec<DonationRecord> = (0..10_000)
            .map(|i| record(&format!("s{i}"), "Name", "0.10", 1 + (i % 28) as u32))
            .collect();

        let analysis = analyze(&records, 2023, 3);
        assert_eq!(analysis.total_revenue, dec("1000.00"));
        assert_eq!(analysis.average_donation, dec("0.10"));

        let daily_sum: Decimal = analysis.daily_revenue.values().copied().sum();
        assert_eq!(daily_sum, analysis.total_revenue);
    }

    #[test]
    fn unique_never_exceeds_total() {
        let repeats = vec![
            record("a", "Alice", "1.00", 1),
            record("a", "Alice", "1.00", 2),
        ];
        let analysis = analyze(&repeats, 2023, 3);
        assert_eq!(analysis.unique_supporters, 1);
        assert!(analysis.unique_supporters <= analysis.total_supporters);

        let distinct = vec![
            record("a", "Alice", "1.00", 1),
            record("b", "Bob", "1.00", 2),
        ];
        let analysis = analyze(&distinct, 2023, 3);
        assert_eq!(analysis.unique_supporters, analysis.total_supporters);
    }

    #[test]
    fn top_supporters_tie_breaks_by_name() {
        let records = vec![
            record("z", "Zoe", "10.00", 1),
            record("m", "Mia", "10.00", 2),
            record("b", "Ben", "25.00", 3),
        ];
        let tops = rank_top_supporters(&records, 10);
        let names: Vec<&str> = tops.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Ben", "Mia", "Zoe"]);
    }

    #[test]
    fn top_supporters_is_capped_at_limit() {
        let records: Vec<DonationRecord> = (0..25)
            .map(|i| {
                record(
                    &format!("s{i:02}"),
                    &format!("Supporter {i:02}"),
                    &format!("{}.00", i + 1),
                    1,
                )
            })
            .collect();
        let analysis = analyze(&records, 2023, 3);
        assert_eq!(analysis.top_supporters.len(), TOP_SUPPORTERS_LIMIT);
        assert_eq!(analysis.top_supporters[0].total, dec("25.00"));
        for pair in analysis.top_supporters.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn daily_revenue_covers_every_day_with_zero_fill() {
        let records = vec![record("a", "Alice", "7.25", 15)];
        let analysis = analyze(&records, 2023, 3);

        assert_eq!(analysis.daily_revenue.len(), 31);
        let days: Vec<u32> = analysis.daily_revenue.keys().copied().collect();
        assert_eq!(days, (1..=31).collect::<Vec<u32>>());
        assert_eq!(analysis.daily_revenue[&15], dec("7.25"));
        assert_eq!(analysis.daily_revenue[&1], Decimal::ZERO);
    }

    #[test]
    fn daily_revenue_matches_leap_february() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = vec![DonationRecord {
            supporter_id: "a".to_string(),
            supporter_name: "Alice".to_string(),
            amount: dec("2.00"),
            timestamp,
        }];
        let analysis = analyze(&records, 2024, 2);
        assert_eq!(analysis.daily_revenue.len(), 29);
        assert_eq!(analysis.daily_revenue[&29], dec("2.00"));
    }

    #[test]
    fn empty_input_yields_all_zero_analysis() {
        let analysis = analyze(&[], 2023, 3);
        assert_eq!(analysis, MonthlyAnalysis::empty());
        assert_eq!(analysis.total_revenue, Decimal::ZERO);
        assert!(analysis.top_supporters.is_empty());
        assert!(analysis.daily_revenue.is_empty());
    }

    #[test]
    fn analysis_is_idempotent() {
        let records = vec![
            record("a", "Alice", "10.00", 1),
            record("b", "Bob", "20.00", 2),
            record("a", "Alice", "5.00", 3),
        ];
        assert_eq!(analyze(&records, 2023, 3), analyze(&records, 2023, 3));
    }

    #[test]
    fn average_rounds_to_cents() {
        let records = vec![
            record("a", "Alice", "10.00", 1),
            record("b", "Bob", "10.00", 2),
            record("c", "Cy", "15.00", 3),
        ];
        let analysis = analyze(&records, 2023, 3);
        // 35.00 / 3 = 11.666... -> 11.67
        assert_eq!(analysis.average_donation, dec("11.67"));
    }
}
