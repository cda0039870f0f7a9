pub mod export;
pub mod page;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::MovieConfig;
use crate::fetch;
use page::Movie;

/// Walk the listing pages in order, collect cards as they appear, then
/// overwrite the CSV in one go. Returns the number of exported rows.
pub async fn run(cfg: &MovieConfig) -> Result<usize> {
    let client = fetch::client()?;
    let pages = cfg.last_page - cfg.first_page + 1;

    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")?
            .progress_chars("=> "),
    );

    let mut movies: Vec<Movie> = Vec::new();
    for page_no in cfg.first_page..=cfg.last_page {
        let url = cfg.page_url(page_no);
        let html = fetch::get_text(&client, &url).await?;
        let cards = page::parse_page(&html);
        info!(page = page_no, cards = cards.len(), "parsed listing page");
        movies.extend(cards);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let written = export::write_csv(&cfg.csv_path, &movies)?;
    Ok(written)
}
