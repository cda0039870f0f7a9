use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read a local source file. A missing or unreadable file is fatal.
pub fn read_to_string(path: &Path) -> Result<String, ScrapeError> {
    fs::read_to_string(path).map_err(|source| ScrapeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// One client per run, bounded timeout.
pub fn client() -> Result<Client, ScrapeError> {
    Ok(Client::builder().timeout(HTTP_TIMEOUT).build()?)
}

/// GET one page as text. A transport failure or non-2xx status is fatal
/// for the whole run; there is no retry or per-page isolation.
pub async fn get_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    match client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
    {
        Ok(resp) => resp.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        }),
        Err(source) => Err(ScrapeError::Fetch {
            url: url.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_to_string(Path::new("tests/fixtures/no_such_file.json")).unwrap_err();
        assert!(matches!(err, ScrapeError::Read { .. }));
    }
}
