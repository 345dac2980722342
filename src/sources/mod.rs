//! Per-site HTML parsers emitting normalized listing records.

pub mod ammoseek;
pub mod gundeals;
pub mod selectors;

use scraper::ElementRef;

/// Joins an element's text nodes with single spaces, trimming each chunk and
/// dropping empty ones.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect::<Vec<_>>().join(" ")
}
