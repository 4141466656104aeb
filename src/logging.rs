#![cfg(feature = "logging")]
#![cfg_attr(docsrs, doc(cfg(feature = "logging")))]

use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the client.
///
/// Events are emitted under the `fns::client` target: `warn!` for reads
/// that fell back to a default value because a resolver failed or a
/// recovered label didn’t match its hash, and `debug!` for submitted
/// transactions and event queries.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to only see degraded resolver reads:
///   RUST_LOG=fns::client=WARN
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
