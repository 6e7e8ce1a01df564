//! Log setup.
//!
//! `RUST_LOG` takes precedence; otherwise `-v` raises the level from
//! `warn` to `info`, `debug`, then `trace`. Logs go to stderr so stdout
//! only carries the result line.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default filter directive.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// A second call leaves the existing subscriber in place and reports that
/// through it.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        debug!("keeping existing log subscriber: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn test_init_twice_keeps_running() {
        init(0);
        init(3);
        tracing::info!("still logging");
    }
}
