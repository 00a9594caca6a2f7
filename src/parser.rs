use crate::debug_println;
use crate::models::Listing;
use chrono::Local;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts all listing records from one search-results page.
///
/// Cards are identified by the `data-cy="l-card"` marker OLX puts on ad
/// containers. A card that yields no title is skipped; the rest of the
/// page is unaffected.
pub fn extract_listings(document: &Html, base_url: &Url) -> Vec<Listing> {
    let card_selector = Selector::parse("div[data-cy='l-card']").unwrap();

    let mut listings = Vec::new();
    for card in document.select(&card_selector) {
        if let Some(listing) = extract_listing(card, base_url) {
            listings.push(listing);
        }
    }

    debug_println!("Extracted {} listings from page", listings.len());
    listings
}

fn extract_listing(card: ElementRef, base_url: &Url) -> Option<Listing> {
    let title_selector = Selector::parse("h6").unwrap();
    let price_selector = Selector::parse("p[data-testid='ad-price']").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();
    let image_selector = Selector::parse("img").unwrap();
    let time_selector = Selector::parse("p[color='text-global-muted']").unwrap();

    // Title is the only mandatory field; without it the card is dropped.
    let title = card
        .select(&title_selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())?;

    let price = card.select(&price_selector).next().map(element_text);

    // The location paragraph carries no marker of its own; on OLX result
    // cards it is always the last <p> in the card. Positional rule, keep
    // it as-is even though it couples us to the current layout.
    let location = card.select(&paragraph_selector).last().map(element_text);

    let url = card
        .select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base_url.join(href).ok())
        .map(|u| u.to_string());

    // An <img> without a src attribute counts as no image.
    let image_url = card
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.to_string());

    let time_posted = card.select(&time_selector).next().map(element_text);

    Some(Listing {
        title,
        price,
        location,
        url,
        image_url,
        time_posted,
        scraped_at: Local::now().naive_local(),
    })
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.olx.in").unwrap()
    }

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    const FULL_CARD: &str = r#"
        <html><body>
        <div data-cy="l-card">
            <a href="/item/cover-123"><img src="https://img.olx.in/c1.jpg"></a>
            <h6>Waterproof Car Cover</h6>
            <p data-testid="ad-price">₹ 1,200</p>
            <p color="text-global-muted">Today</p>
            <p>Mumbai, Maharashtra</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_all_fields_from_complete_card() {
        let doc = parse(FULL_CARD);
        let listings = extract_listings(&doc, &base());

        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.title, "Waterproof Car Cover");
        assert_eq!(listing.price.as_deref(), Some("₹ 1,200"));
        assert_eq!(listing.location.as_deref(), Some("Mumbai, Maharashtra"));
        assert_eq!(
            listing.url.as_deref(),
            Some("https://www.olx.in/item/cover-123")
        );
        assert_eq!(listing.image_url.as_deref(), Some("https://img.olx.in/c1.jpg"));
        assert_eq!(listing.time_posted.as_deref(), Some("Today"));
    }

    #[test]
    fn page_without_cards_yields_empty_sequence() {
        let doc = parse("<html><body><div class='banner'>ads here</div></body></html>");
        assert!(extract_listings(&doc, &base()).is_empty());
    }

    #[test]
    fn card_without_title_is_skipped_siblings_kept() {
        let html = r#"
            <div data-cy="l-card"><p>No heading in here</p></div>
            <div data-cy="l-card"><h6>Cover B</h6></div>
        "#;
        let listings = extract_listings(&parse(html), &base());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Cover B");
    }

    #[test]
    fn whitespace_only_title_is_treated_as_missing() {
        let html = r#"<div data-cy="l-card"><h6>   </h6><p>Pune</p></div>"#;
        assert!(extract_listings(&parse(html), &base()).is_empty());
    }

    #[test]
    fn missing_optional_fields_become_none() {
        let html = r#"<div data-cy="l-card"><h6>Cover A</h6></div>"#;
        let listings = extract_listings(&parse(html), &base());

        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.title, "Cover A");
        assert_eq!(listing.price, None);
        assert_eq!(listing.location, None);
        assert_eq!(listing.url, None);
        assert_eq!(listing.image_url, None);
        assert_eq!(listing.time_posted, None);
    }

    #[test]
    fn image_without_src_yields_none() {
        let html = r#"<div data-cy="l-card"><h6>Cover C</h6><img alt="lazy"></div>"#;
        let listings = extract_listings(&parse(html), &base());
        assert_eq!(listings[0].image_url, None);
    }

    #[test]
    fn location_comes_from_last_paragraph() {
        let html = r#"
            <div data-cy="l-card">
                <h6>Cover D</h6>
                <p data-testid="ad-price">₹ 500</p>
                <p>Some blurb</p>
                <p>Delhi</p>
            </div>
        "#;
        let listings = extract_listings(&parse(html), &base());
        assert_eq!(listings[0].location.as_deref(), Some("Delhi"));
    }

    #[test]
    fn relative_hrefs_resolve_against_base() {
        let html = r#"<div data-cy="l-card"><h6>Cover E</h6><a href="/item/42">go</a></div>"#;
        let listings = extract_listings(&parse(html), &base());
        assert_eq!(listings[0].url.as_deref(), Some("https://www.olx.in/item/42"));
    }

    #[test]
    fn extraction_is_idempotent_modulo_timestamp() {
        let doc = parse(FULL_CARD);
        let mut first = extract_listings(&doc, &base());
        let mut second = extract_listings(&doc, &base());

        for listing in first.iter_mut().chain(second.iter_mut()) {
            listing.scraped_at = chrono::NaiveDateTime::default();
        }
        assert_eq!(first, second);
    }
}
