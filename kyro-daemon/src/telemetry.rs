//! 日志初始化

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `log_level` from the configuration file mapped to a tracing level.
pub fn level_for(log_level: u8) -> Level {
    match log_level {
        0 => Level::DEBUG,
        1 => Level::INFO,
        2 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `log_level`.
///
/// Records emitted through the `log` facade by the library crates are bridged in.
pub fn init(log_level: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(log_level).as_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}
