//! HTTP/HTTPS prober.

use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;

use reqwest::redirect::Policy;
use tokio::time::{Instant, timeout};
use tracing::debug;
use url::Url;

use super::{ProbeResult, Prober};
use crate::error::ProbeError;

/// Default upper bound on a single probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard cap on redirect hops followed inside one probe.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Settings for [`HttpProber`].
#[derive(Debug, Clone)]
pub struct ProberSettings {
    /// Maximum wait for the complete response, body included
    pub timeout: Duration,
    /// Redirect hops to follow; 0 reports 3xx responses as-is
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ProberSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: 0,
            user_agent: concat!("urlprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Issues a single GET per probe and collects the whole body.
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(settings: &ProberSettings) -> Result<Self, ProbeError> {
        let redirect = match settings.max_redirects.min(MAX_REDIRECT_HOPS) {
            0 => Policy::none(),
            hops => Policy::limited(hops),
        };

        let client = reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .redirect(redirect)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        Ok(Self { client, timeout: settings.timeout })
    }

    async fn fetch(&self, url: &Url) -> Result<(u16, Vec<u8>), ProbeError> {
        let response =
            self.client.get(url.clone()).send().await.map_err(|e| classify(&e, self.timeout))?;
        let status = response.status().as_u16();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(self.timeout)
            } else {
                ProbeError::Body(root_cause(&e))
            }
        })?;

        Ok((status, body.to_vec()))
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &Url) -> Result<ProbeResult, ProbeError> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ProbeError::UnsupportedScheme(other.to_string())),
        }

        let start = Instant::now();

        let (status, body) = timeout(self.timeout, self.fetch(url))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        let elapsed_millis = start.elapsed().as_millis() as u64;
        debug!(%url, status, bytes = body.len(), elapsed_millis, "probe completed");

        Ok(ProbeResult::from_bytes(status, &body, elapsed_millis))
    }
}

/// Map a transport error onto the probe error taxonomy.
fn classify(error: &reqwest::Error, limit: Duration) -> ProbeError {
    if error.is_timeout() {
        return ProbeError::Timeout(limit);
    }

    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            match io.kind() {
                ErrorKind::ConnectionRefused => return ProbeError::ConnectionRefused,
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
                    return ProbeError::ConnectionReset;
                }
                ErrorKind::TimedOut => return ProbeError::Timeout(limit),
                _ => {}
            }
        }
        messages.push(cause.to_string());
        source = cause.source();
    }

    let chain = messages.join(": ").to_lowercase();
    let cause = messages.pop().unwrap_or_default();

    if chain.contains("connection refused") {
        ProbeError::ConnectionRefused
    } else if chain.contains("connection reset") {
        ProbeError::ConnectionReset
    } else if chain.contains("dns error") || chain.contains("failed to lookup address") {
        ProbeError::Dns(cause)
    } else if error.is_connect() {
        ProbeError::Connect(cause)
    } else {
        ProbeError::Transport(cause)
    }
}

fn root_cause(error: &reqwest::Error) -> String {
    let mut cause: &dyn StdError = error;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}
