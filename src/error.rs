use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures. Anything here aborts the run; tolerated gaps
/// (a movie card missing a field, a daily entry without a date) never
/// surface as errors.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),

    /// The forecast feed did not match the expected nested shape. Distinct
    /// from a location that simply has no data, which parses fine and is
    /// skipped downstream.
    #[error("forecast feed shape: {0}")]
    FeedShape(#[from] serde_json::Error),

    #[error("weather store: {0}")]
    Persist(#[from] rusqlite::Error),

    #[error("movie export: {0}")]
    Csv(#[from] csv::Error),
}
