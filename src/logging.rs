//! Logging setup using `tracing` and `tracing-subscriber`

use tracing_subscriber::{fmt, EnvFilter};

/// Map `-v`/`-q` counts to a default filter directive
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csvtools={}", level_for(verbose, quiet))));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(7, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }
}
