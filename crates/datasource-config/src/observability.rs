// Tracing initialization with a configurable and reloadable log level.
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use crate::LoggingConfig;

static LOG_RELOAD_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Installs the global subscriber described by `logging`.
///
/// `RUST_LOG`, when set and parseable, takes precedence over `logging.level`.
/// Returns `false` when a global subscriber already exists, in which case
/// [`apply_logging_level`] has no effect.
pub fn init_tracing(logging: &LoggingConfig) -> bool {
    install(&logging.level, logging.ansi)
}

pub fn init_tracing_with_level(level: &str) -> bool {
    install(level, true)
}

fn install(level: &str, ansi: bool) -> bool {
    if LOG_RELOAD_HANDLE.get().is_some() {
        return false;
    }

    let base_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let (reload_layer, handle) = reload::Layer::new(base_filter);
    let installed = tracing_subscriber::registry()
        .with(reload_layer)
        .with(fmt::layer().with_ansi(ansi))
        .try_init()
        .is_ok();

    // the handle is only live while its layer is part of the global subscriber
    installed && LOG_RELOAD_HANDLE.set(handle).is_ok()
}

/// Returns true once a subscriber installed here accepts [`apply_logging_level`].
pub fn is_reloadable() -> bool {
    LOG_RELOAD_HANDLE.get().is_some()
}

/// Apply a new logging level at runtime if the subscriber was installed here.
pub fn apply_logging_level(level: &str) {
    if let Some(handle) = LOG_RELOAD_HANDLE.get() {
        let _ = handle.modify(|f| {
            *f = EnvFilter::new(level);
        });
    }
}
