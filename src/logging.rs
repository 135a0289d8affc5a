//! Tracing setup for the binary
//!
//! Library code only emits events; the subscriber is installed here once.
//! Events go to stderr so command output on stdout stays clean.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Directive used when `RUST_LOG` is not set
const DEFAULT_DIRECTIVE: &str = "spendlog=warn";

/// Directive used with `--verbose`
const VERBOSE_DIRECTIVE: &str = "spendlog=debug";

/// Install the global subscriber; later calls do nothing
///
/// `RUST_LOG` wins over both defaults.
pub fn init(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose {
            VERBOSE_DIRECTIVE
        } else {
            DEFAULT_DIRECTIVE
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
