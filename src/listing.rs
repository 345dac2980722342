//! Data models for sources, normalized listings, and per-candidate outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit prices outside this band are treated as extraction noise and the
/// candidate is skipped, not failed.
pub const MIN_UNIT_PRICE: f64 = 0.001;
pub const MAX_UNIT_PRICE: f64 = 2000.0;

/// The two aggregator sites we scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    AmmoSeek,
    GunDeals,
}

impl Source {
    /// Returns both sources in fixed scan order.
    pub fn all() -> &'static [Source] {
        &[Source::AmmoSeek, Source::GunDeals]
    }

    /// Human-readable source label.
    pub fn label(&self) -> &'static str {
        match self {
            Source::AmmoSeek => "AmmoSeek",
            Source::GunDeals => "Gun.Deals",
        }
    }

    /// Site origin, used to absolutize site-relative links.
    pub fn base_url(&self) -> &'static str {
        match self {
            Source::AmmoSeek => "https://ammoseek.com",
            Source::GunDeals => "https://gun.deals",
        }
    }

    /// Placeholder image when a listing has no usable image of its own.
    pub fn logo_url(&self) -> &'static str {
        match self {
            Source::AmmoSeek => "https://ammoseek.com/img/as_logo_200.png",
            Source::GunDeals => "https://gun.deals/sites/all/themes/gundeals/logo.png",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated, normalized product offer ready for ranking and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Which site produced this listing.
    pub source: Source,
    /// Product image URL, possibly the site logo placeholder.
    pub image_url: String,
    /// Display name, at most 80 characters.
    pub name: String,
    /// Comparable per-unit price.
    pub unit_price: f64,
    /// Estimated total; equals `unit_price` when no quantity was inferable.
    pub total_price: f64,
    /// Outbound vendor URL, or "#" when unresolved.
    pub vendor_link: String,
}

/// Why a candidate row was dropped during parsing.
///
/// Skips are normal per-row outcomes, aggregated for diagnostics; they never
/// abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Tracking/ad markers in the row markup.
    AdRow,
    /// Too few cells to be a real listing.
    TooFewCells,
    /// Navigation or subscription chrome, not a product.
    NonProduct,
    /// Name failed relevance validation.
    Irrelevant,
    /// No parseable dollar amount in the row.
    NoPrice,
    /// Unit price outside the sanity band.
    PriceOutOfBand,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::AdRow => "ad/tracking row",
            SkipReason::TooFewCells => "too few cells",
            SkipReason::NonProduct => "non-product chrome",
            SkipReason::Irrelevant => "failed relevance check",
            SkipReason::NoPrice => "no parseable price",
            SkipReason::PriceOutOfBand => "price outside sanity band",
        };
        write!(f, "{}", s)
    }
}

/// Per-candidate parse outcome: a listing, or a reasoned skip.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Listing(ListingRecord),
    Skip(SkipReason),
}

/// Result of parsing one source's HTML: the surviving listings plus the skip
/// reasons for every dropped candidate.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub listings: Vec<ListingRecord>,
    pub skips: Vec<SkipReason>,
}

impl ParseReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a row outcome into the report.
    pub fn push(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Listing(record) => self.listings.push(record),
            RowOutcome::Skip(reason) => self.skips.push(reason),
        }
    }

    /// Returns true if no listings survived.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Compact `reason: count` summary for debug logging.
    pub fn skip_summary(&self) -> String {
        let mut counts: Vec<(SkipReason, usize)> = Vec::new();
        for reason in &self.skips {
            match counts.iter_mut().find(|(r, _)| r == reason) {
                Some((_, n)) => *n += 1,
                None => counts.push((*reason, 1)),
            }
        }
        counts
            .iter()
            .map(|(reason, n)| format!("{}: {}", reason, n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Truncates a display name to `max` characters on a char boundary.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max).collect()
    }
}
