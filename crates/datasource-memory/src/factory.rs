use std::fmt;
use std::str::FromStr;

use datasource_core::IdStrategy;
use datasource_storage::{DatasourceError, DatasourceResult, DynDatasource};
use serde::{Deserialize, Serialize};

use crate::InMemoryDatasource;

/// Largest `initial_capacity` accepted by [`StorageOptions::validate`].
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Supported datasource backend types.
///
/// Serde goes through [`FromStr`], so configuration files accept the same
/// names and aliases as `str::parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DatasourceBackend {
    /// Process-local store owned by the datasource instance
    #[default]
    Memory,
    /// PostgreSQL; recognised by configuration but not built into this workspace
    Postgres,
}

impl DatasourceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DatasourceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasourceBackend {
    type Err = DatasourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(DatasourceError::configuration(format!(
                "unknown datasource backend '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for DatasourceBackend {
    type Error = DatasourceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DatasourceBackend> for String {
    fn from(backend: DatasourceBackend) -> Self {
        backend.as_str().to_string()
    }
}

/// Datasource-specific configuration options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Number of records to preallocate room for.
    #[serde(default)]
    pub initial_capacity: Option<usize>,
    /// How identifiers for new records are generated.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl StorageOptions {
    /// Rejects options no backend can honour.
    ///
    /// # Errors
    ///
    /// Returns `DatasourceError::Configuration` if `initial_capacity` exceeds
    /// [`MAX_INITIAL_CAPACITY`].
    pub fn validate(&self) -> DatasourceResult<()> {
        if let Some(capacity) = self.initial_capacity
            && capacity > MAX_INITIAL_CAPACITY
        {
            return Err(DatasourceError::configuration(format!(
                "initial_capacity {capacity} exceeds the maximum of {MAX_INITIAL_CAPACITY}"
            )));
        }
        Ok(())
    }
}

/// Factory configuration to construct a datasource instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    #[serde(default)]
    pub backend: DatasourceBackend,
    #[serde(default)]
    pub options: StorageOptions,
}

impl DatasourceConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.options.id_strategy = strategy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.options.initial_capacity = Some(capacity);
        self
    }
}

/// Create a datasource instance based on the provided configuration.
///
/// Each call returns a new instance with its own, empty store.
///
/// # Errors
///
/// Returns `DatasourceError::Configuration` if the options are out of range.
/// Returns `DatasourceError::Unimplemented` if the configured backend has no
/// implementation in this build.
pub fn create_datasource(config: &DatasourceConfig) -> DatasourceResult<DynDatasource> {
    config.options.validate()?;
    match config.backend {
        DatasourceBackend::Memory => Ok(Box::new(InMemoryDatasource::with_options(
            config.options.clone(),
        ))),
        backend => {
            tracing::warn!(%backend, "datasource backend is not available in this build");
            Err(DatasourceError::unimplemented(format!(
                "{backend} datasource backend"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasource_storage::Datasource;

    #[test]
    fn test_backend_from_str() {
        assert_eq!(
            "memory".parse::<DatasourceBackend>().unwrap(),
            DatasourceBackend::Memory
        );
        assert_eq!(
            " In-Memory ".parse::<DatasourceBackend>().unwrap(),
            DatasourceBackend::Memory
        );
        assert_eq!(
            "postgresql".parse::<DatasourceBackend>().unwrap(),
            DatasourceBackend::Postgres
        );

        let err = "redis".parse::<DatasourceBackend>().unwrap_err();
        assert!(matches!(err, DatasourceError::Configuration { .. }));
    }

    #[test]
    fn test_create_memory_datasource() {
        let datasource = create_datasource(&DatasourceConfig::memory()).unwrap();
        assert_eq!(datasource.backend_name(), "memory");
        assert_eq!(datasource.count(None).unwrap(), 0);
    }

    #[test]
    fn test_create_unimplemented_backend() {
        let config = DatasourceConfig {
            backend: DatasourceBackend::Postgres,
            ..Default::default()
        };
        let err = create_datasource(&config).err().unwrap();
        assert!(err.is_unimplemented());
    }

    #[test]
    fn test_backend_deserialization_accepts_aliases() {
        for (name, expected) in [
            ("memory", DatasourceBackend::Memory),
            ("in-memory", DatasourceBackend::Memory),
            ("postgres", DatasourceBackend::Postgres),
            ("PostgreSQL", DatasourceBackend::Postgres),
        ] {
            let backend: DatasourceBackend =
                serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(backend, expected, "backend name: {name}");
        }

        let err = serde_json::from_value::<DatasourceBackend>(serde_json::json!("redis"))
            .unwrap_err();
        assert!(err.to_string().contains("unknown datasource backend 'redis'"));

        assert_eq!(
            serde_json::to_value(DatasourceBackend::Postgres).unwrap(),
            serde_json::json!("postgres")
        );
    }

    #[test]
    fn test_oversized_initial_capacity_is_rejected() {
        let config = DatasourceConfig::memory().with_initial_capacity(usize::MAX);
        let err = create_datasource(&config).err().unwrap();
        assert!(matches!(err, DatasourceError::Configuration { .. }));

        let config = DatasourceConfig::memory().with_initial_capacity(MAX_INITIAL_CAPACITY);
        assert!(config.options.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let config: DatasourceConfig = serde_json::from_value(serde_json::json!({
            "backend": "memory",
            "options": {"id_strategy": "sequence", "initial_capacity": 64}
        }))
        .unwrap();

        assert_eq!(
            config,
            DatasourceConfig::memory()
                .with_id_strategy(IdStrategy::Sequence)
                .with_initial_capacity(64)
        );

        let config: DatasourceConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config, DatasourceConfig::default());
    }
}
