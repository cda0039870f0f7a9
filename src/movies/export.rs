use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::ScrapeError;

use super::page::Movie;

const HEADER: [&str; 4] = ["title", "image_url", "rating", "genres"];

/// Overwrite `path` with the full movie set. The header row is always
/// written, even for zero movies.
pub fn write_csv(path: &Path, movies: &[Movie]) -> Result<usize, ScrapeError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ScrapeError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = fs::File::create(path).map_err(|source| ScrapeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, movies)?;
    Ok(movies.len())
}

fn write_records<W: Write>(out: W, movies: &[Movie]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for m in movies {
        writer.write_record([&m.title, &m.image, &m.rating, &m.genres])?;
    }
    writer.flush()?;
    Ok(())
}
