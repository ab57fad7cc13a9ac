//! Tracing subscriber setup shared by the urlprobe binaries.

mod tracing;

pub use self::tracing::{init, try_init};
