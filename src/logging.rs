//! Logging setup
//!
//! Log output goes to stderr and is off unless asked for, so it never mixes
//! into the tree dump or the viewer.
//!
//! ## Environment Variables
//!
//! 1. **`CMMTREE_LOG`** (highest priority) - filter directives for this tool;
//!    a bare level such as `debug` applies to the `cmmtree` target only
//! 2. **`RUST_LOG`** - standard tracing filter
//! 3. Neither set - no subscriber is installed

use std::env;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "CMMTREE_LOG";

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Install the stderr subscriber if a filter is configured.
///
/// Returns whether logging was enabled. Safe to call more than once.
pub fn init() -> Result<bool, InitError> {
    let Some(filter) = create_filter()? else {
        return Ok(false);
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()?;
    Ok(true)
}

/// Logging for tests; ignores an already installed subscriber.
pub fn test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn create_filter() -> Result<Option<EnvFilter>, InitError> {
    if let Ok(directives) = env::var(LOG_ENV) {
        return Ok(Some(EnvFilter::try_new(expand_directives(&directives))?));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return Ok(Some(EnvFilter::try_new(rust_log)?));
    }
    Ok(None)
}

/// Expand bare levels to this crate's target: `debug` → `cmmtree=debug`.
fn expand_directives(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.contains('=') {
                part.to_string()
            } else {
                format!("cmmtree={}", part)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
