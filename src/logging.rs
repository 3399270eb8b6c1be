// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup.
//!
//! Filter precedence: `RUST_LOG`, then the `[logging] filter` setting, then
//! [`DEFAULT_LOG_FILTER`]. Output goes to stderr so command output on stdout
//! stays clean.

use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Builds the filter for the given configured directive.
#[must_use]
pub fn filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            configured
                .filter(|f| !f.trim().is_empty())
                .map_or_else(|| EnvFilter::try_new(DEFAULT_LOG_FILTER), EnvFilter::try_new)
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(configured: Option<&str>) {
    // Already installed when tests initialize more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
