// File: src/logging.rs
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Calling it again is a no-op.
pub fn init_tracing(default_directive: &str) {
    if INITIALISED.set(()).is_err() {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal());

    // Another subscriber may already be installed by an embedding host.
    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
