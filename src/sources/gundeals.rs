//! Parser for Gun.Deals search result pages.

use super::element_text;
use super::selectors::gundeals as sel;
use crate::criteria::SearchCriteria;
use crate::extract::lowest_price;
use crate::listing::{
    truncate_name, ListingRecord, ParseReport, RowOutcome, SkipReason, Source,
};
use crate::relevance::is_relevant;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Parses Gun.Deals results HTML into normalized listings.
///
/// Blank input yields an empty report. Unlike AmmoSeek, this source carries
/// no per-item images and no bulk-price correction: the listed price is the
/// unit price.
pub fn parse(html: &str, criteria: &SearchCriteria) -> ParseReport {
    let mut report = ParseReport::new();
    if html.trim().is_empty() {
        return report;
    }

    let document = Html::parse_document(html);

    for row in document.select(&sel::ROW) {
        report.push(parse_row(row, criteria));
    }

    debug!(
        "Gun.Deals: {} listings, {} skipped ({})",
        report.listings.len(),
        report.skips.len(),
        report.skip_summary()
    );

    report
}

fn parse_row(row: ElementRef<'_>, criteria: &SearchCriteria) -> RowOutcome {
    let text = element_text(row);
    if text.chars().count() < 5 || text.contains("Subscribe") {
        return RowOutcome::Skip(SkipReason::NonProduct);
    }

    let name = resolve_name(row, &text);
    if !is_relevant(&name, criteria.component, &criteria.search_value) {
        return RowOutcome::Skip(SkipReason::Irrelevant);
    }

    let Some(unit_price) = lowest_price(&text) else {
        return RowOutcome::Skip(SkipReason::NoPrice);
    };

    RowOutcome::Listing(ListingRecord {
        source: Source::GunDeals,
        image_url: Source::GunDeals.logo_url().to_string(),
        name: truncate_name(&name, 80),
        unit_price,
        total_price: unit_price,
        vendor_link: resolve_link(row),
    })
}

/// Name priority: a "title" element, then a heading, then the text of the
/// first product/deal anchor, then the leading container text.
fn resolve_name(row: ElementRef<'_>, text: &str) -> String {
    if let Some(title) = row.select(&sel::TITLE).next() {
        return element_text(title);
    }
    if let Some(heading) = row.select(&sel::HEADING).next() {
        return element_text(heading);
    }
    for anchor in row.select(&sel::ANCHOR) {
        if let Some(href) = anchor.value().attr("href") {
            if href.contains("product") || href.contains("deal") {
                return element_text(anchor);
            }
        }
    }
    truncate_name(text, 80)
}

/// First product/deal anchor, rooted at the site origin.
fn resolve_link(row: ElementRef<'_>) -> String {
    for anchor in row.select(&sel::ANCHOR) {
        if let Some(href) = anchor.value().attr("href") {
            if href.contains("product") || href.contains("deal") {
                return format!("{}{}", Source::GunDeals.base_url(), href);
            }
        }
    }
    "#".to_string()
}
