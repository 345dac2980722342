//! Merging and ranking of per-source listing lists.

use crate::listing::ListingRecord;
use std::cmp::Ordering;

/// Concatenates the per-source lists and sorts ascending by unit price.
///
/// The sort is stable, so ties keep their source/discovery order. Empty input
/// yields an empty result, a normal "no matches" outcome.
pub fn rank(lists: Vec<Vec<ListingRecord>>) -> Vec<ListingRecord> {
    let mut merged: Vec<ListingRecord> = lists.into_iter().flatten().collect();
    // Prices are finite by construction; equal ordering covers the NaN arm.
    merged.sort_by(|a, b| a.unit_price.partial_cmp(&b.unit_price).unwrap_or(Ordering::Equal));
    merged
}
