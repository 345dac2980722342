//! pewpew-tracker - Ammunition and reloading-component price scanner
//!
//! Scans AmmoSeek and Gun.Deals through a browser-automation solver,
//! validates each candidate against the searched component, normalizes
//! prices to cost per unit, and ranks everything cheapest-first.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod criteria;
pub mod extract;
pub mod format;
pub mod listing;
pub mod relevance;
pub mod solver;
pub mod sources;

pub use config::Config;
pub use criteria::{BrassCondition, Component, SearchCriteria};
pub use listing::{ListingRecord, Source};
