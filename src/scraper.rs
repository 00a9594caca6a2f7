use crate::debug_println;
use crate::fetcher::Fetcher;
use crate::models::Listing;
use crate::parser;
use anyhow::{Context, Result};
use scraper::{Html, Selector};
use url::Url;

/// Seam between the pagination loop and the network, so the loop can be
/// driven by canned pages in tests.
pub trait PageFetcher {
    /// One attempt per call; `None` means the page is unreachable and
    /// pagination should stop.
    fn fetch(&self, url: &Url) -> Option<String>;
}

impl PageFetcher for Fetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        Fetcher::fetch(self, url)
    }
}

/// Builds the search start URL for a query, e.g. `/items/q-car-cover`.
pub fn search_url(base_url: &Url, query: &str) -> Result<Url> {
    let path = format!("/items/q-{}", urlencoding::encode(query));
    base_url
        .join(&path)
        .context("Failed to build search URL")
}

/// Walks search-results pages from `start_url`, collecting listings
/// until the next-page link disappears, a fetch fails, or `max_pages`
/// is reached. Listings already collected survive an aborted run.
pub fn scrape_listings<F: PageFetcher>(
    fetcher: &F,
    base_url: &Url,
    start_url: Url,
    max_pages: Option<usize>,
) -> Vec<Listing> {
    let mut listings = Vec::new();
    let mut current_url = Some(start_url);
    let mut page_count = 0;

    while let Some(url) = current_url {
        if max_pages.is_some_and(|max| page_count >= max) {
            debug_println!("Reached page ceiling after {} pages", page_count);
            break;
        }

        println!("Scraping page {}: {}", page_count + 1, url);
        let Some(body) = fetcher.fetch(&url) else {
            break;
        };

        let document = Html::parse_document(&body);
        let page_listings = parser::extract_listings(&document, base_url);
        println!("Found {} listings on page {}", page_listings.len(), page_count + 1);
        listings.extend(page_listings);

        current_url = find_next_page(&document, base_url);
        page_count += 1;
    }

    listings
}

/// Resolves the next-page control (`data-cy="page-link-next"`) to an
/// absolute URL, if the page has one.
fn find_next_page(document: &Html, base_url: &Url) -> Option<Url> {
    let next_selector = Selector::parse("a[data-cy='page-link-next']").unwrap();

    document
        .select(&next_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base_url.join(href).ok())
}
