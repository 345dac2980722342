//! Scan command implementation.

use crate::aggregate;
use crate::config::Config;
use crate::criteria::SearchCriteria;
use crate::format::Formatter;
use crate::listing::{ListingRecord, SkipReason, Source};
use crate::solver::{PageSolver, SolverClient, SolverError};
use crate::sources::{ammoseek, gundeals};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Outcome of one scan: ranked records, per-candidate skip diagnostics, and
/// any per-source fetch failures.
#[derive(Debug)]
pub struct ScanReport {
    pub records: Vec<ListingRecord>,
    pub skipped: Vec<SkipReason>,
    pub failures: Vec<(Source, SolverError)>,
}

impl ScanReport {
    /// True when every source failed at the transport level - the solver
    /// endpoint is down or misconfigured, which must read differently from
    /// "no matching products".
    pub fn comms_failure(&self) -> bool {
        self.failures.len() == Source::all().len()
            && self.failures.iter().all(|(_, err)| err.is_config_error())
    }
}

/// Executes a multi-source listing scan.
pub struct ScanCommand {
    config: Config,
}

impl ScanCommand {
    /// Creates a new scan command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the scan and returns formatted output.
    pub async fn execute(&self, criteria: &SearchCriteria) -> Result<String> {
        let solver = SolverClient::new(&self.config).context("Failed to create solver client")?;
        self.execute_with_solver(&solver, criteria).await
    }

    /// Executes the scan with a provided solver (for testing).
    pub async fn execute_with_solver(
        &self,
        solver: &impl PageSolver,
        criteria: &SearchCriteria,
    ) -> Result<String> {
        let report = self.scan_with_solver(solver, criteria).await;

        if report.comms_failure() {
            anyhow::bail!(
                "Solver endpoint unreachable for every source; check the solver URL ({})",
                self.config.solver_url
            );
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_listings(&report.records))
    }

    /// Fetches both sources concurrently, parses, and ranks.
    ///
    /// A failed fetch yields zero records for that source and is recorded in
    /// the report; it never aborts the scan.
    pub async fn scan_with_solver(
        &self,
        solver: &impl PageSolver,
        criteria: &SearchCriteria,
    ) -> ScanReport {
        info!(
            "Scanning AmmoSeek and Gun.Deals for {} '{}'",
            criteria.component, criteria.search_value
        );

        let ammoseek_url = criteria.ammoseek_url();
        let gundeals_url = criteria.gundeals_url();
        debug!("AmmoSeek URL: {}", ammoseek_url);
        debug!("Gun.Deals URL: {}", gundeals_url);

        // The two pipelines are fully independent; fetch them together.
        let (ammoseek_html, gundeals_html) =
            tokio::join!(solver.fetch(&ammoseek_url), solver.fetch(&gundeals_url));

        let mut failures = Vec::new();

        let ammoseek_report = match ammoseek_html {
            Ok(html) => ammoseek::parse(&html, criteria),
            Err(err) => {
                warn!("AmmoSeek fetch failed: {}", err);
                failures.push((Source::AmmoSeek, err));
                Default::default()
            }
        };

        let gundeals_report = match gundeals_html {
            Ok(html) => gundeals::parse(&html, criteria),
            Err(err) => {
                warn!("Gun.Deals fetch failed: {}", err);
                failures.push((Source::GunDeals, err));
                Default::default()
            }
        };

        let mut skipped = ammoseek_report.skips;
        skipped.extend(gundeals_report.skips);

        let records =
            aggregate::rank(vec![ammoseek_report.listings, gundeals_report.listings]);

        info!("Aggregation complete: {} valid listings", records.len());

        ScanReport { records, skipped, failures }
    }
}
