//! Donation platform API client.
//!
//! One authenticated read per run: list all donations inside a calendar-month
//! window. The wire format is a JSON array of objects with at least
//! `supporter_id`, `supporter_name`, `amount` and `created_at` (or `date`).

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::domain::{DonationRecord, month_window};
use crate::error::ReportError;

pub const DEFAULT_BASE_URL: &str = "https://api.donationplatform.com";

/// Per-request timeout; the transport default guarantees nothing.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PlatformClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PlatformClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ReportError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetch all donations recorded between the first and last calendar day of
    /// the given month, in the order the platform returns them.
    ///
    /// Zero records is not an error here; the emptiness policy lives at the
    /// pipeline layer.
    pub fn fetch_month(&self, year: i32, month: u32) -> Result<Vec<DonationRecord>, ReportError> {
        let (start, end) = month_window(year, month)?;
        let url = format!("{}/donations", self.base_url);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .query(&[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ])
            .send()
            .map_err(|e| ReportError::network(format!("donations request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ReportError::auth(format!(
                "donation platform rejected the access token (HTTP {status})"
            )));
        }
        if !status.is_success() {
            return Err(ReportError::network(format!(
                "donations request failed with status {status}"
            )));
        }

        let wire: Vec<WireDonation> = resp
            .json()
            .map_err(|e| ReportError::network(format!("failed to parse donations response: {e}")))?;

        convert_records(wire)
    }
}

/// One donation as it appears on the wire.
///
/// Tolerances observed in practice: `amount` arrives as a number or a decimal
/// string, the name may be absent, and the timestamp may be a bare date.
#[derive(Debug, Deserialize)]
struct WireDonation {
    #[serde(deserialize_with = "de_id")]
    supporter_id: String,
    #[serde(default)]
    supporter_name: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    amount: Decimal,
    #[serde(alias = "date")]
    created_at: String,
}

fn convert_records(wire: Vec<WireDonation>) -> Result<Vec<DonationRecord>, ReportError> {
    let mut out = Vec::with_capacity(wire.len());
    for w in wire {
        let timestamp = parse_timestamp(&w.created_at).ok_or_else(|| {
            ReportError::network(format!("invalid donation timestamp '{}'", w.created_at))
        })?;
        let supporter_name = match w.supporter_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("Supporter {}", w.supporter_id),
        };
        out.push(DonationRecord {
            supporter_id: w.supporter_id,
            supporter_name,
            amount: w.amount,
            timestamp,
        });
    }
    Ok(out)
}

/// Parse a platform timestamp: full RFC 3339, naive date-time, or bare date.
///
/// The grouping logic only ever uses the calendar-day part, so offsets keep
/// their local clock reading rather than being normalized to UTC.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a supporter id as a string or integer")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn de_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl serde::de::Visitor<'_> for AmountVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a donation amount as a number or decimal string")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Decimal, E> {
            v.trim().parse::<Decimal>().map_err(E::custom)
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::try_from(v).map_err(E::custom)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
