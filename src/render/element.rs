use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::predictions::TeamEntry;

/// Visual emphasis for a playoff probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn for_probability(p: f64) -> Band {
        if p >= 0.70 {
            Band::High
        } else if p >= 0.40 {
            Band::Medium
        } else {
            Band::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::High => "high",
            Band::Medium => "medium",
            Band::Low => "low",
        }
    }

    /// CSS class applied to the element.
    pub fn css_class(self) -> &'static str {
        match self {
            Band::High => "high-probability",
            Band::Medium => "medium-probability",
            Band::Low => "low-probability",
        }
    }
}

/// Magnitude indicator, width in percent of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Width the bar represents (probability * 100)
    pub target: f64,
    /// Width it is drawn at on insertion
    pub width: f64,
    /// Set when the bar should grow to `target` after this many milliseconds
    pub fill_delay_ms: Option<u64>,
}

/// One rendered team, card or table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamElement {
    pub team: String,
    pub city: Option<String>,
    /// "wins-losses"
    pub record: String,
    /// e.g. "63.6%", or "–" when no games were played
    pub win_pct: String,
    /// e.g. "95.0%"
    pub probability: String,
    pub band: Band,
    pub bar: Bar,
    pub seed: Option<u32>,
}

impl TeamElement {
    pub fn from_entry(entry: &TeamEntry) -> Self {
        let pct = entry.probability * 100.0;
        TeamElement {
            team: entry.team.clone(),
            city: entry.city.clone(),
            record: format!("{}-{}", entry.wins, entry.losses),
            win_pct: entry
                .win_pct()
                .map(|w| format_percent(w * 100.0))
                .unwrap_or_else(|| "–".to_string()),
            probability: format_percent(pct),
            band: Band::for_probability(entry.probability),
            bar: Bar {
                target: pct,
                width: pct,
                fill_delay_ms: None,
            },
            seed: entry.predicted_seed,
        }
    }
}

/// One decimal place and a percent sign: `63.63..` → `"63.6%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Long-form timestamp, e.g. "February 19, 2026, 12:00 PM" (UTC).
///
/// Accepts RFC 3339, or an ISO 8601 date-time without offset which is read
/// as UTC. Returns `None` for anything else.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let ts = match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
            Utc.from_utc_datetime(&naive)
        }
    };
    Some(ts.format("%B %-d, %Y, %I:%M %p").to_string())
}
