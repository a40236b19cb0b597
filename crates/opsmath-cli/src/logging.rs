use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber.
///
/// Without `-v` the filter comes from `RUST_LOG`, defaulting to `warn` so
/// reports on stdout stay clean. `-v` selects `debug`, `-vv` `trace`.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
