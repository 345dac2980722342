//! Price and quantity extraction from raw listing text.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Above this, a "unit price" with a known quantity is assumed to be a
/// case/bulk total and is divided by the quantity. Heuristic, kept as-is.
pub const BULK_PRICE_THRESHOLD: f64 = 30.0;

/// Dollar amount: `$`, optional whitespace, digits with thousands commas,
/// optional decimal part.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s?([0-9,]+(?:\.[0-9]+)?)").unwrap());

/// Quantity: a number followed by a round/count marker.
static QTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s?(rds|rounds|cnt|count|pcs)").unwrap());

/// Extracts every valid dollar amount from the text, thousands separators
/// removed, zero/near-zero values discarded.
pub fn extract_prices(text: &str) -> Vec<f64> {
    PRICE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .filter(|p| *p > 0.001)
        .collect()
}

/// The most favorable (lowest) valid price in the text, if any.
///
/// Multi-price rows typically show original + sale price, or per-unit + case
/// price; the minimum is the per-unit/sale figure.
pub fn lowest_price(text: &str) -> Option<f64> {
    extract_prices(text).into_iter().fold(None, |min, p| match min {
        Some(m) if m <= p => Some(m),
        _ => Some(p),
    })
}

/// Infers a round/piece count from the text; defaults to 1.
pub fn infer_quantity(text: &str) -> u32 {
    QTY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

/// Applies the bulk/case correction: a high "unit price" with a quantity
/// greater than one is treated as a total and divided down.
pub fn correct_bulk_price(unit_price: f64, quantity: u32) -> f64 {
    if unit_price > BULK_PRICE_THRESHOLD && quantity > 1 {
        unit_price / quantity as f64
    } else {
        unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prices_basic() {
        assert_eq!(extract_prices("$29.99"), vec![29.99]);
        assert_eq!(extract_prices("$ 29.99"), vec![29.99]);
        assert_eq!(extract_prices("$1,234.56"), vec![1234.56]);
        assert_eq!(extract_prices("$10"), vec![10.0]);
    }

    #[test]
    fn test_extract_prices_multiple() {
        let prices = extract_prices("was $24.99 now $19.99 case $399.00");
        assert_eq!(prices, vec![24.99, 19.99, 399.0]);
    }

    #[test]
    fn test_extract_prices_discards_zero() {
        assert!(extract_prices("$0.00 shipping").is_empty());
        assert_eq!(extract_prices("$0.00 then $12.50"), vec![12.5]);
    }

    #[test]
    fn test_extract_prices_none() {
        assert!(extract_prices("no money here").is_empty());
        assert!(extract_prices("").is_empty());
        assert!(extract_prices("100 rounds").is_empty());
    }

    #[test]
    fn test_lowest_price() {
        assert_eq!(lowest_price("was $24.99 now $19.99"), Some(19.99));
        assert_eq!(lowest_price("$45.00 for 100 rds"), Some(45.0));
        assert_eq!(lowest_price("nothing"), None);
    }

    #[test]
    fn test_lowest_price_deterministic() {
        let text = "case $399.00 per round $0.40 sale $0.38";
        assert_eq!(lowest_price(text), lowest_price(text));
        assert_eq!(lowest_price(text), Some(0.38));
    }

    #[test]
    fn test_infer_quantity() {
        assert_eq!(infer_quantity("50 rds box"), 50);
        assert_eq!(infer_quantity("1000 rounds"), 1000);
        assert_eq!(infer_quantity("100cnt"), 100);
        assert_eq!(infer_quantity("500 Count"), 500);
        assert_eq!(infer_quantity("250 PCS"), 250);
    }

    #[test]
    fn test_infer_quantity_default() {
        assert_eq!(infer_quantity("no quantity marker"), 1);
        assert_eq!(infer_quantity(""), 1);
        assert_eq!(infer_quantity("9mm 115gr"), 1);
    }

    #[test]
    fn test_infer_quantity_first_match() {
        assert_eq!(infer_quantity("20 rds per box, 1000 rounds per case"), 20);
    }

    #[test]
    fn test_correct_bulk_price() {
        // $45 with 100 rounds -> $0.45 per round.
        assert!((correct_bulk_price(45.0, 100) - 0.45).abs() < 1e-9);
        // Under the threshold: untouched.
        assert_eq!(correct_bulk_price(0.45, 100), 0.45);
        assert_eq!(correct_bulk_price(29.99, 50), 29.99);
        // Above the threshold but quantity 1: untouched.
        assert_eq!(correct_bulk_price(45.0, 1), 45.0);
    }
}
