use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "raycaster=info";

/// Installs the global subscriber: `RUST_LOG` if set, else `raycaster=info`, to stdout.
/// Only the binary calls this.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);

    // a second init (e.g. from tests) is not an error worth failing over
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .try_init();
}
