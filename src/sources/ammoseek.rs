//! Parser for AmmoSeek search result pages.

use super::element_text;
use super::selectors::ammoseek as sel;
use crate::criteria::SearchCriteria;
use crate::extract::{correct_bulk_price, infer_quantity, lowest_price};
use crate::listing::{
    truncate_name, ListingRecord, ParseReport, RowOutcome, SkipReason, Source, MAX_UNIT_PRICE,
    MIN_UNIT_PRICE,
};
use crate::relevance::is_relevant;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Parses AmmoSeek results HTML into normalized listings.
///
/// Blank input yields an empty report; a malformed row yields a skip, never a
/// batch failure.
pub fn parse(html: &str, criteria: &SearchCriteria) -> ParseReport {
    let mut report = ParseReport::new();
    if html.trim().is_empty() {
        return report;
    }

    let document = Html::parse_document(html);

    // Prefer the primary results table; fall back to every row on the page.
    let rows: Vec<ElementRef> = match document.select(&sel::RESULTS_TABLE).next() {
        Some(table) => table.select(&sel::ROW).collect(),
        None => document.select(&sel::ROW).collect(),
    };

    for row in rows {
        report.push(parse_row(row, criteria));
    }

    debug!(
        "AmmoSeek: {} listings, {} skipped ({})",
        report.listings.len(),
        report.skips.len(),
        report.skip_summary()
    );

    report
}

fn parse_row(row: ElementRef<'_>, criteria: &SearchCriteria) -> RowOutcome {
    // Serialized markup catches tracking markers hiding in attributes.
    let markup = row.html();
    if markup.contains("Display Log") || markup.contains("google") {
        return RowOutcome::Skip(SkipReason::AdRow);
    }

    let cells: Vec<ElementRef> = row.select(&sel::CELL).collect();
    if cells.len() < 5 {
        return RowOutcome::Skip(SkipReason::TooFewCells);
    }

    // Display name from the first two cells; validated untruncated.
    let name = format!("{} {}", element_text(cells[0]), element_text(cells[1]));
    if !is_relevant(&name, criteria.component, &criteria.search_value) {
        return RowOutcome::Skip(SkipReason::Irrelevant);
    }

    let row_text = element_text(row);
    let Some(raw_price) = lowest_price(&row_text) else {
        return RowOutcome::Skip(SkipReason::NoPrice);
    };

    let quantity = infer_quantity(&row_text);
    let unit_price = correct_bulk_price(raw_price, quantity);

    if unit_price <= MIN_UNIT_PRICE || unit_price >= MAX_UNIT_PRICE {
        return RowOutcome::Skip(SkipReason::PriceOutOfBand);
    }

    RowOutcome::Listing(ListingRecord {
        source: Source::AmmoSeek,
        image_url: resolve_image(row),
        name: truncate_name(&name, 80),
        unit_price,
        total_price: unit_price * quantity as f64,
        vendor_link: resolve_link(row),
    })
}

/// Image from the row's first `img`, preferring the lazy-load attribute;
/// tracking pixels are ignored and the site logo stands in when nothing
/// usable remains.
fn resolve_image(row: ElementRef<'_>) -> String {
    if let Some(img) = row.select(&sel::IMAGE).next() {
        let src = img.value().attr("data-src").or_else(|| img.value().attr("src"));
        if let Some(src) = src {
            if !src.is_empty() && !src.contains("pixel") {
                if src.starts_with("//") {
                    return format!("https:{}", src);
                }
                if src.starts_with('/') {
                    return format!("{}{}", Source::AmmoSeek.base_url(), src);
                }
                return src.to_string();
            }
        }
    }
    Source::AmmoSeek.logo_url().to_string()
}

/// First anchor that is not a rating/review/login link, absolutized.
fn resolve_link(row: ElementRef<'_>) -> String {
    for anchor in row.select(&sel::ANCHOR) {
        let Some(href) = anchor.value().attr("href") else { continue };
        if href.contains("/ratings/") || href.contains("/review/") || href.contains("login") {
            continue;
        }
        if href.starts_with('/') {
            return format!("{}{}", Source::AmmoSeek.base_url(), href);
        }
        return href.to_string();
    }
    "#".to_string()
}
