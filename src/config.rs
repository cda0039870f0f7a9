use std::env;
use std::path::PathBuf;

/// Weather pipeline inputs: a pre-downloaded CWA forecast feed and the
/// SQLite database it rebuilds.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub feed_path: PathBuf,
    pub db_path: PathBuf,
}

impl WeatherConfig {
    pub fn from_env() -> Self {
        Self {
            feed_path: path_var("FEED_WEATHER_JSON", "data/weather_raw.json"),
            db_path: path_var("FEED_WEATHER_DB", "data/weather.sqlite"),
        }
    }
}

/// Movie pipeline inputs: the listing site base URL, the page range to
/// walk, and the CSV destination.
#[derive(Debug, Clone)]
pub struct MovieConfig {
    pub base_url: String,
    pub first_page: u32,
    pub last_page: u32,
    pub csv_path: PathBuf,
}

impl MovieConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("FEED_MOVIE_BASE_URL")
                .unwrap_or_else(|_| "https://ssr1.scrape.center".into()),
            first_page: 1,
            last_page: num_var("FEED_MOVIE_LAST_PAGE", 10),
            csv_path: path_var("FEED_MOVIE_CSV", "data/movies.csv"),
        }
    }

    /// Listing URL for one page index.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/page/{}", self.base_url.trim_end_matches('/'), page)
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn num_var(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
