//! urlprobe - synthetic URL monitoring engine
//!
//! Polls configured HTTP(S) endpoints, each on its own interval, and
//! evaluates every response against a list of declarative conditions.
//!
//! ```no_run
//! use std::sync::Arc;
//! use urlprobe::{AgentConfig, HttpProber, Scheduler, TracingReporter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::load("config.json")?;
//! let prober = Arc::new(HttpProber::new(&config.preferences.prober_settings())?);
//! let scheduler = Scheduler::new(config.checks, prober, Arc::new(TracingReporter));
//! scheduler.run_until(async { tokio::signal::ctrl_c().await.unwrap_or_default() }).await;
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod condition;
pub mod config;
pub mod error;
pub mod probe;
pub mod reporter;
pub mod scheduler;

// Re-export main types
pub use check::{Check, CheckDefinition, CheckOutcome, OutcomeRecord};
pub use condition::{ConditionResult, ConditionSpec, evaluate};
pub use config::{AgentConfig, ConfigFormat, Preferences};
pub use error::{ConditionError, ConfigError, ProbeError};
pub use probe::{HttpProber, ProbeResult, Prober, ProberSettings};
pub use reporter::{ChannelReporter, Fanout, FileReporter, Reporter, TracingReporter};
pub use scheduler::{Scheduler, SchedulerHandle};

/// urlprobe result type for configuration-time operations
pub type Result<T> = std::result::Result<T, ConfigError>;
