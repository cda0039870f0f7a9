//! Date-keyed reconciliation of the three daily series.
//!
//! Each series writes its own slot of the per-date bucket, so the order
//! the series are merged in never changes the final buckets. Entries
//! without a date are dropped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::feed::{DailyEntry, LocationForecast};
use crate::db::WeatherRow;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}$").unwrap());

/// Per-date accumulator. A bucket may stay partially filled; missing
/// slots are defaulted when rows are emitted, not here.
#[derive(Debug, Clone, Default)]
pub struct DayBucket {
    pub min: Option<DailyEntry>,
    pub max: Option<DailyEntry>,
    pub wx: Option<DailyEntry>,
}

pub fn merge_daily<F>(
    buckets: &mut BTreeMap<String, DayBucket>,
    daily: &[DailyEntry],
    set: F,
) where
    F: Fn(&mut DayBucket, DailyEntry),
{
    for entry in daily {
        if entry.date.is_empty() {
            continue;
        }
        if !DATE_RE.is_match(&entry.date) {
            warn!(date = %entry.date, "unexpected date shape in daily series");
        }
        set(buckets.entry(entry.date.clone()).or_default(), entry.clone());
    }
}

/// Merge all three series of one location into date buckets.
pub fn day_buckets(location: &LocationForecast) -> BTreeMap<String, DayBucket> {
    let mut buckets = BTreeMap::new();
    merge_daily(&mut buckets, &location.elements.min_t.daily, |b, e| {
        b.min = Some(e)
    });
    merge_daily(&mut buckets, &location.elements.max_t.daily, |b, e| {
        b.max = Some(e)
    });
    merge_daily(&mut buckets, &location.elements.wx.daily, |b, e| {
        b.wx = Some(e)
    });
    buckets
}

/// Normalize buckets into canonical rows. Absent or empty temperatures
/// become 0.0, an absent description becomes the empty string.
pub fn to_rows(location: &str, buckets: BTreeMap<String, DayBucket>) -> Vec<WeatherRow> {
    buckets
        .into_iter()
        .map(|(date, bucket)| WeatherRow {
            location: location.to_string(),
            date,
            min_temp: temperature_or_zero(bucket.min.as_ref()),
            max_temp: temperature_or_zero(bucket.max.as_ref()),
            description: bucket.wx.and_then(|e| e.weather).unwrap_or_default(),
        })
        .collect()
}

fn temperature_or_zero(entry: Option<&DailyEntry>) -> f64 {
    let Some(raw) = entry.and_then(|e| e.temperature.as_deref()) else {
        return 0.0;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or_else(|_| {
        warn!(value = raw, "non-numeric temperature, defaulting to 0");
        0.0
    })
}
