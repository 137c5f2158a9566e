/// Tracing subscriber setup
///
/// Log verbosity comes from `RUST_LOG`. Output format comes from
/// `LOG_FORMAT` (see [`crate::config::LogFormat`]).

use crate::config::LogFormat;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "postsync_api=debug,postsync_shared=debug,tower_http=debug";

/// Installs the global subscriber
///
/// Call once at startup.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}
