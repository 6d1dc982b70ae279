use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_level` unless `verbose` is set, in which
/// case the filter is forced to `debug` (or `trace` for `-vv`). Output goes
/// to stderr so it never mixes with console messages on stdout.
pub fn init_tracing(default_level: &str, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing("info", 0);
        init_tracing("not a valid directive ===", 0);
        init_tracing("warn", 2);
        tracing::debug!("still alive");
    }
}
