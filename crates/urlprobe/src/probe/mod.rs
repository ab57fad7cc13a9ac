//! Outbound probing.
//!
//! A [`Prober`] performs exactly one request per call and either produces a
//! complete [`ProbeResult`] or a [`ProbeError`](crate::error::ProbeError).

mod http;
mod types;

pub use http::{DEFAULT_TIMEOUT, HttpProber, MAX_REDIRECT_HOPS, ProberSettings};
pub use types::ProbeResult;

use url::Url;

use crate::error::ProbeError;

/// Performs a single probe against a target.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probe `url` once, without retrying.
    async fn probe(&self, url: &Url) -> Result<ProbeResult, ProbeError>;
}
