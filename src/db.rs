use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::error::ScrapeError;

/// Canonical persisted shape for one day's forecast at one location.
/// `(location, date)` is the business key.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRow {
    pub location: String,
    pub date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub description: String,
}

pub fn connect(path: &Path) -> Result<Connection, ScrapeError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ScrapeError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), ScrapeError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS weather (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            location    TEXT NOT NULL,
            date        TEXT NOT NULL,
            min_temp    REAL,
            max_temp    REAL,
            description TEXT,
            UNIQUE(location, date)
        );
        ",
    )?;
    Ok(())
}

// ── Write path ──

/// Full-replace persist: delete everything, bulk-insert the new set, one
/// transaction. After commit the table holds exactly `rows` (last write
/// wins on a duplicate business key within the batch); on any failure the
/// previous contents stay intact.
pub fn replace_weather(conn: &Connection, rows: &[WeatherRow]) -> Result<usize, ScrapeError> {
    let tx = conn.unchecked_transaction()?;
    {
        tx.execute("DELETE FROM weather", [])?;
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO weather (location, date, min_temp, max_temp, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![
                r.location,
                r.date,
                r.min_temp,
                r.max_temp,
                r.description,
            ])?;
        }
    }
    tx.commit()?;
    Ok(rows.len())
}

// ── Read path ──

/// Dashboard read query. The SELECT text and its ordering are a
/// compatibility contract with the external dashboard; the optional
/// location filter is applied over the result set, not in SQL, exactly
/// as the dashboard does.
pub fn fetch_weather(
    conn: &Connection,
    location: Option<&str>,
) -> Result<Vec<WeatherRow>, ScrapeError> {
    let mut stmt = conn.prepare(
        "SELECT location, date, min_temp, max_temp, description
         FROM weather
         ORDER BY date, location",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(WeatherRow {
                location: row.get(0)?,
                date: row.get(1)?,
                min_temp: row.get(2)?,
                max_temp: row.get(3)?,
                description: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match location {
        Some(name) => rows.into_iter().filter(|r| r.location == name).collect(),
        None => rows,
    })
}

// ── Stats ──

pub struct StoreStats {
    pub rows: usize,
    pub locations: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn stats(conn: &Connection) -> Result<StoreStats, ScrapeError> {
    let rows: usize = conn.query_row("SELECT COUNT(*) FROM weather", [], |r| r.get(0))?;
    let locations: usize =
        conn.query_row("SELECT COUNT(DISTINCT location) FROM weather", [], |r| {
            r.get(0)
        })?;
    let (first_date, last_date) =
        conn.query_row("SELECT MIN(date), MAX(date) FROM weather", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })?;
    Ok(StoreStats {
        rows,
        locations,
        first_date,
        last_date,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn mem() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn row(location: &str, date: &str, min: f64, max: f64, wx: &str) -> WeatherRow {
        WeatherRow {
            location: location.into(),
            date: date.into(),
            min_temp: min,
            max_temp: max,
            description: wx.into(),
        }
    }

    #[test]
    fn replace_twice_yields_same_table() {
        let conn = mem();
        let rows = vec![
            row("臺北市", "20240101", 15.0, 22.0, "多雲"),
            row("高雄市", "20240102", 0.0, 10.0, ""),
        ];
        replace_weather(&conn, &rows).unwrap();
        replace_weather(&conn, &rows).unwrap();

        let stored = fetch_weather(&conn, None).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored, fetch_weather(&conn, None).unwrap());
    }

    #[test]
    fn replace_drops_stale_rows() {
        let conn = mem();
        replace_weather(&conn, &[row("臺北市", "20240101", 15.0, 22.0, "多雲")]).unwrap();
        replace_weather(&conn, &[row("臺中市", "20240103", 12.0, 19.0, "晴")]).unwrap();

        let stored = fetch_weather(&conn, None).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].location, "臺中市");
    }

    #[test]
    fn duplicate_business_key_last_one_wins() {
        let conn = mem();
        let rows = vec![
            row("臺北市", "20240101", 15.0, 22.0, "多雲"),
            row("臺北市", "20240101", 16.0, 23.0, "晴"),
        ];
        replace_weather(&conn, &rows).unwrap();

        let stored = fetch_weather(&conn, None).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].min_temp, 16.0);
        assert_eq!(stored[0].description, "晴");
    }

    #[test]
    fn read_path_orders_by_date_then_location() {
        let conn = mem();
        let rows = vec![
            row("高雄市", "20240102", 18.0, 26.0, "晴"),
            row("臺北市", "20240102", 15.0, 22.0, "多雲"),
            row("高雄市", "20240101", 17.0, 25.0, "晴"),
        ];
        replace_weather(&conn, &rows).unwrap();

        let stored = fetch_weather(&conn, None).unwrap();
        let keys: Vec<(&str, &str)> = stored
            .iter()
            .map(|r| (r.date.as_str(), r.location.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("20240101", "高雄市"),
                ("20240102", "臺北市"),
                ("20240102", "高雄市"),
            ]
        );
    }

    #[test]
    fn location_filter_is_equality_over_the_result() {
        let conn = mem();
        let rows = vec![
            row("臺北市", "20240101", 15.0, 22.0, "多雲"),
            row("高雄市", "20240101", 18.0, 26.0, "晴"),
        ];
        replace_weather(&conn, &rows).unwrap();

        let taipei = fetch_weather(&conn, Some("臺北市")).unwrap();
        assert_eq!(taipei.len(), 1);
        assert_eq!(taipei[0].location, "臺北市");
        assert!(fetch_weather(&conn, Some("不存在")).unwrap().is_empty());
    }

    #[test]
    fn stats_counts_rows_locations_and_date_range() {
        let conn = mem();
        let rows = vec![
            row("臺北市", "20240101", 15.0, 22.0, "多雲"),
            row("臺北市", "20240102", 14.0, 21.0, "陰"),
            row("高雄市", "20240103", 18.0, 26.0, "晴"),
        ];
        replace_weather(&conn, &rows).unwrap();

        let s = stats(&conn).unwrap();
        assert_eq!(s.rows, 3);
        assert_eq!(s.locations, 2);
        assert_eq!(s.first_date.as_deref(), Some("20240101"));
        assert_eq!(s.last_date.as_deref(), Some("20240103"));
    }

    #[test]
    fn stats_on_empty_table() {
        let conn = mem();
        let s = stats(&conn).unwrap();
        assert_eq!(s.rows, 0);
        assert_eq!(s.first_date, None);
    }
}
