//! Tracing/logging setup shared by every binary in the workspace.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{LogFormat, ParseLogFormatError};

/// Initialize process-wide observability with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(format: LogFormat) {
    crate::tracing::init(format);
}
