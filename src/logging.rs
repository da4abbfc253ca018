use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "warn,taskdir=debug" } else { "warn" };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .without_time(),
    );

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
