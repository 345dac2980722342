//! CSS selectors for the two aggregator sites.
//!
//! Update this file when a site changes its HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for AmmoSeek result pages.
pub mod ammoseek {
    use super::*;

    /// Primary results table; when absent the parser scans every row in the
    /// document.
    pub static RESULTS_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("table.results-table").unwrap());

    /// Listing row.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Row cell.
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

    /// Product image.
    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

    /// Any anchor with a target.
    pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
}

/// Selectors for Gun.Deals result pages.
pub mod gundeals {
    use super::*;

    /// Listing containers: divs/rows whose class attribute carries a
    /// row/view-content marker. "views-row" is covered by the "row"
    /// substring match.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div[class*='row'], \
             div[class*='view-content'], \
             tr[class*='row'], \
             tr[class*='view-content']",
        )
        .unwrap()
    });

    /// Listing title element.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());

    /// Heading fallback for the title.
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

    /// Any anchor with a target.
    pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
}
