//! Output formatting for ranked listings (table, JSON, markdown, CSV).
//!
//! Unit cost renders with 4 decimal places (per-round prices live well under
//! a dollar), estimated totals with 2.

use crate::config::OutputFormat;
use crate::listing::ListingRecord;

/// Formats listings for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the ranked listings.
    pub fn format_listings(&self, listings: &[ListingRecord]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No matching listings found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    // JSON formatting

    fn json_listings(&self, listings: &[ListingRecord]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[ListingRecord]) -> String {
        let source_width = 9;
        let unit_width = 10;
        let total_width = 10;
        let name_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<source_width$}  {:<unit_width$}  {:<total_width$}  {:<name_width$}  {}",
            "Source", "Unit $", "Total $", "Name", "Link"
        ));
        lines.push(format!(
            "{:-<source_width$}  {:-<unit_width$}  {:-<total_width$}  {:-<name_width$}  {:-<30}",
            "", "", "", "", ""
        ));

        for listing in listings {
            let name = clip(&listing.name, name_width);

            lines.push(format!(
                "{:<source_width$}  {:>unit_width$}  {:>total_width$}  {:<name_width$}  {}",
                listing.source.label(),
                format!("${:.4}", listing.unit_price),
                format!("${:.2}", listing.total_price),
                name,
                listing.vendor_link
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} listings", listings.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[ListingRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Source | Unit $ | Total $ | Name | Link |".to_string());
        lines.push("|--------|--------|---------|------|------|".to_string());

        for listing in listings {
            let name = clip(&listing.name, 60);
            let link = if listing.vendor_link == "#" {
                "unresolved".to_string()
            } else {
                format!("[store]({})", listing.vendor_link)
            };

            lines.push(format!(
                "| {} | {:.4} | {:.2} | {} | {} |",
                listing.source.label(),
                listing.unit_price,
                listing.total_price,
                name,
                link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} listings found*", listings.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "source,name,unit_price,total_price,vendor_link,image_url".to_string()
    }

    fn csv_listings(&self, listings: &[ListingRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for listing in listings {
            let name = Self::csv_escape(&listing.name);
            let link = Self::csv_escape(&listing.vendor_link);
            let image = Self::csv_escape(&listing.image_url);

            lines.push(format!(
                "{},{},{:.4},{:.2},{},{}",
                listing.source.label(),
                name,
                listing.unit_price,
                listing.total_price,
                link,
                image
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Clips a display string to `max` characters with an ellipsis.
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let clipped: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", clipped)
    } else {
        s.to_string()
    }
}
