//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a subscriber that writes formatted events to stderr.
///
/// The filter directive comes from `config.trace_level`, falling back to
/// `"info"` when it is unset or does not parse. Only the first call in a
/// process installs anything; later calls are ignored. The library calls this
/// on its own only through [`enhance`](crate::enhance), and only when a level
/// is configured.
///
/// ```rust
/// use selectree::observability::init_tracing;
/// use selectree::Config;
///
/// let config = Config {
///     trace_level: Some("selectree=debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// tracing::debug!("subscriber installed once");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
