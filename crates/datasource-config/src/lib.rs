//! Configuration and observability for processes hosting a datasource.
//!
//! Settings come from an optional TOML file (default `datasource.toml`)
//! overridden by `DATASOURCE__*` environment variables, e.g.
//! `DATASOURCE__STORAGE__BACKEND=memory` or `DATASOURCE__LOGGING__LEVEL=debug`.

pub mod observability;
pub mod settings;

pub use observability::{
    apply_logging_level, init_tracing, init_tracing_with_level, is_reloadable,
};
pub use settings::{AppConfig, LoggingConfig, loader};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Builds the datasource described by `config.storage`.
pub fn build_datasource(
    config: &AppConfig,
) -> datasource_storage::DatasourceResult<datasource_storage::DynDatasource> {
    datasource_memory::create_datasource(&config.storage)
}
