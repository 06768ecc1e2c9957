use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global `tracing` subscriber.
///
/// Safe to call more than once; only the first call has an effect. An invalid
/// filter falls back to `info` rather than failing startup.
pub fn init(filter: &str) {
    INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
            eprintln!("invalid log filter `{filter}`: {err}; using `info`");
            EnvFilter::new("info")
        });
        // another subscriber may already be installed by an embedding host
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init();
    });
}
