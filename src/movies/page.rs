//! Card extraction for one listing page.
//!
//! Every field is pulled independently: a card missing a sub-element
//! keeps its row with that field empty. Only the card selector itself is
//! structural; zero cards on a page is not an error.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".el-card").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".m-b-sm").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static RATING: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".score").unwrap());
static GENRE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".categories button span").unwrap());

/// Canonical exported shape for one movie card. Titles may repeat across
/// pages; there is no dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub image: String,
    pub rating: String,
    pub genres: String,
}

/// Extract all cards from one page, in document order.
pub fn parse_page(html: &str) -> Vec<Movie> {
    let doc = Html::parse_document(html);
    doc.select(&CARD)
        .map(|card| Movie {
            title: first_text(card, &TITLE),
            image: card
                .select(&IMAGE)
                .next()
                .and_then(|img| img.value().attr("src"))
                .unwrap_or_default()
                .to_string(),
            rating: first_text(card, &RATING),
            genres: card
                .select(&GENRE)
                .map(clean_text)
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn first_text(card: ElementRef, selector: &Selector) -> String {
    card.select(selector).next().map(clean_text).unwrap_or_default()
}

fn clean_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
