use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// The filter comes from `STORYREEL_LOG`, then `RUST_LOG`. Without either,
/// the level is `debug` when verbose, `warn` while the terminal UI owns the
/// screen and `info` otherwise. Output always goes to stderr.
pub fn init_logging(verbose: bool, no_color: bool, interactive: bool) {
    let fallback = default_level(verbose, interactive);
    let filter = std::env::var("STORYREEL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_level(verbose: bool, interactive: bool) -> &'static str {
    if verbose {
        "debug"
    } else if interactive {
        "warn"
    } else {
        "info"
    }
}
