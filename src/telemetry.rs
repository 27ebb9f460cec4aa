//! Tracing bootstrap.
//!
//! The crate logs through `tracing`; hosts that want output on stderr can
//! call [`init`] once at startup. Filtering follows `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install the default subscriber, ignoring an already-installed one
/// (useful in tests, where several cases may race to initialize).
pub fn init() {
    let _ = try_init();
}

/// Install the default subscriber, reporting whether this call won.
pub fn try_init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
