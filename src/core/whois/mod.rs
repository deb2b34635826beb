//! WHOIS lookups for the domain analyzer.
//!
//! The analyzer depends only on the [`WhoisLookup`] trait; [`ServiceWhoisClient`] is
//! the network implementation.

mod client;
pub mod parse;
mod types;

use std::future::Future;

pub use client::ServiceWhoisClient;
pub use types::{WhoisError, WhoisRecord, WhoisValue};

/// A source of registration records.
pub trait WhoisLookup: Send + Sync {
    /// Looks up `domain` (a registrable domain or an IP literal).
    fn lookup(&self, domain: &str) -> impl Future<Output = Result<WhoisRecord, WhoisError>> + Send;
}
