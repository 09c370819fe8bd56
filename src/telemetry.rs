//! The single logging entry point. Library code only uses the `log` macros;
//! where they end up is decided here, once, at start-up.

use log::LevelFilter;
use std::str::FromStr;

/// Parses a level name, defaulting to `Info` for anything unrecognised.
pub fn level_from_str(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw.trim()).unwrap_or(LevelFilter::Info)
}

/// Server: `env_logger` for `log` records, `tracing-subscriber` for the
/// request spans emitted by [`crate::middleware::tracing`].
#[cfg(feature = "ssr")]
pub fn init_server() {
    use env_logger::Env;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::{fmt, EnvFilter};

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().fmt_fields(crate::middleware::tracing::ColoredFields));

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        log::warn!("tracing subscriber already installed: {e}");
    }
}

/// Browser: panics go through `console_error_panic_hook`; `log` records are
/// bridged into `tracing` and written to the devtools console by
/// `tracing-wasm`, filtered at `level`.
#[cfg(feature = "hydrate")]
pub fn init_client(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    console_error_panic_hook::set_once();

    let subscriber = tracing_subscriber::registry()
        .with(tracing_level(level_from_str(level)))
        .with(tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfig::default(),
        ));

    // also installs the `log` -> `tracing` bridge
    let _ = subscriber.try_init();
}

/// Maps a `log` level filter onto the equivalent `tracing` one.
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub fn tracing_level(filter: LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    use tracing_subscriber::filter::LevelFilter as Tracing;
    match filter {
        LevelFilter::Off => Tracing::OFF,
        LevelFilter::Error => Tracing::ERROR,
        LevelFilter::Warn => Tracing::WARN,
        LevelFilter::Info => Tracing::INFO,
        LevelFilter::Debug => Tracing::DEBUG,
        LevelFilter::Trace => Tracing::TRACE,
    }
}
