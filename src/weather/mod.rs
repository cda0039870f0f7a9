pub mod feed;
pub mod merge;

use anyhow::Result;
use tracing::info;

use crate::config::WeatherConfig;
use crate::db::{self, WeatherRow};
use crate::fetch;

/// Parse → merge → normalize for every location in the feed.
pub fn collect_rows(locations: &[feed::LocationForecast]) -> Vec<WeatherRow> {
    let mut rows = Vec::new();
    for location in locations {
        let buckets = merge::day_buckets(location);
        rows.extend(merge::to_rows(&location.name, buckets));
    }
    rows
}

/// Rebuild the weather table from the downloaded feed. Returns the number
/// of normalized rows handed to the store.
pub fn run(cfg: &WeatherConfig) -> Result<usize> {
    let json = fetch::read_to_string(&cfg.feed_path)?;
    let locations = feed::parse(&json)?;
    info!(locations = locations.len(), "parsed forecast feed");

    let rows = collect_rows(&locations);

    let conn = db::connect(&cfg.db_path)?;
    db::init_schema(&conn)?;
    let written = db::replace_weather(&conn, &rows)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_feed_normalizes_to_expected_rows() {
        let json = std::fs::read_to_string("tests/fixtures/forecast.json").unwrap();
        let locations = feed::parse(&json).unwrap();
        let rows = collect_rows(&locations);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            WeatherRow {
                location: "臺北市".into(),
                date: "20240101".into(),
                min_temp: 15.0,
                max_temp: 22.0,
                description: "多雲".into(),
            }
        );
        assert_eq!(
            rows[1],
            WeatherRow {
                location: "高雄市".into(),
                date: "20240102".into(),
                min_temp: 0.0,
                max_temp: 10.0,
                description: "".into(),
            }
        );
    }

    #[test]
    fn normalized_rows_survive_a_full_replace_cycle() {
        let json = std::fs::read_to_string("tests/fixtures/forecast.json").unwrap();
        let rows = collect_rows(&feed::parse(&json).unwrap());

        let conn = rusqlite::Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        db::replace_weather(&conn, &rows).unwrap();
        db::replace_weather(&conn, &rows).unwrap();

        let stored = db::fetch_weather(&conn, None).unwrap();
        assert_eq!(stored, rows);
    }
}
