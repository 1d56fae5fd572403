//! Tracing setup for the CLI
//!
//! Logs go to stderr so the stdout report stays machine-readable with `--json`.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Filter used by `--verbose`
pub const VERBOSE_FILTER: &str = "debug";

/// Filter directive for the given verbosity, ignoring the environment
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `verbose` when set.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn second_init_fails() {
        // whichever call installs first, the other must be rejected
        let first = init(false);
        let second = init(true);
        assert!(first.is_err() || second.is_err());
    }
}
