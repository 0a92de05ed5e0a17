//! Tracing setup for the command line

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Filter directive for the chosen verbosity.
///
/// The flags win over the configured level; `quiet` wins over everything.
pub fn filter_directive(verbose: bool, debug: bool, quiet: bool, configured: &str) -> String {
    let level = if quiet {
        "error"
    } else if debug {
        "debug"
    } else if verbose {
        "trace"
    } else {
        configured
    };
    format!("rusqlite=warn,{level}")
}

/// Install the global subscriber, writing to stderr
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool, configured: &str) {
    let directive = filter_directive(verbose, debug, quiet, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log level '{configured}' ({e}), using info");
        EnvFilter::new("info")
    });

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_by_default() {
        assert_eq!(
            filter_directive(false, false, false, "warn"),
            "rusqlite=warn,warn"
        );
    }

    #[test]
    fn test_flags_override_configuration() {
        assert!(filter_directive(true, false, false, "warn").ends_with(",trace"));
        assert!(filter_directive(false, true, false, "warn").ends_with(",debug"));
        assert!(filter_directive(true, true, true, "warn").ends_with(",error"));
    }
}
