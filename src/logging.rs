//! Logging setup for the command-line front end
//!
//! Library code only emits `tracing` events; the binary decides where they go.

use anyhow::Result;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for the given verbosity.
/// 0 = warn, 1 = debug (hyper noise suppressed), 2+ = trace. Quiet wins.
pub fn filter_directive(verbose_level: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose_level {
        0 => "warn",
        1 => "debug,hyper=warn,reqwest=info",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr so stdout stays parseable.
/// `RUST_LOG` overrides the verbosity flags unless `quiet` is set.
pub fn init_logging(verbose_level: u8, quiet: bool) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet);
    let filter = if quiet {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    let layer = fmt::layer().with_writer(io::stderr).with_target(false);

    Registry::default().with(filter).with(layer).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, false), "warn");
        assert!(filter_directive(1, false).starts_with("debug"));
        assert_eq!(filter_directive(3, false), "trace");
        assert_eq!(filter_directive(2, true), "error");
    }
}
