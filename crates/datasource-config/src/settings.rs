use datasource_memory::DatasourceConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: DatasourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parses a configuration from an inline TOML document and validates it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(source)
            .map_err(|e| ConfigError::parse(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lvl = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&lvl.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {VALID_LOG_LEVELS:?}"
            )));
        }
        self.storage
            .options
            .validate()
            .map_err(|e| ConfigError::validation(format!("storage.options: {e}")))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Colored terminal output
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_ansi(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use crate::ConfigError;
    use config::{Config, Environment, File, FileFormat};
    use std::path::{Path, PathBuf};

    /// Root-level file read when no explicit path is given.
    pub const DEFAULT_CONFIG_FILE: &str = "datasource.toml";
    /// Prefix for environment overrides, e.g. `DATASOURCE__LOGGING__LEVEL=debug`.
    pub const ENV_PREFIX: &str = "DATASOURCE";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
        build_config(path, environment())
    }

    pub fn load_config_with_default_path<P: AsRef<Path>>(
        path: Option<P>,
    ) -> Result<AppConfig, ConfigError> {
        let p = path
            .as_ref()
            .map(|p| p.as_ref().to_string_lossy().to_string());
        load_config(p.as_deref())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .separator("__")
    }

    pub(crate) fn build_config(
        path: Option<&str>,
        environment: Environment,
    ) -> Result<AppConfig, ConfigError> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf).format(FileFormat::Toml));
        } else if path.is_some() {
            tracing::warn!(path = %pathbuf.display(), "config file not found, using defaults");
        }
        builder = builder.add_source(environment);

        let merged: AppConfig = builder.build()?.try_deserialize()?;
        merged.validate()?;
        tracing::debug!(backend = %merged.storage.backend, "configuration loaded");
        Ok(merged)
    }

    #[cfg(test)]
    pub(crate) fn environment_from(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        environment().source(Some(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasource_core::IdStrategy;
    use datasource_memory::DatasourceBackend;
    use datasource_storage::Datasource;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, DatasourceBackend::Memory);
        assert_eq!(config.storage.options.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            backend = "memory"

            [storage.options]
            id_strategy = "sequence"
            initial_capacity = 32

            [logging]
            level = "debug"
            ansi = false
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.options.id_strategy, IdStrategy::Sequence);
        assert_eq!(config.storage.options.initial_capacity, Some(32));
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.ansi);
    }

    #[test]
    fn test_from_toml_str_partial() {
        let config = AppConfig::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.storage, DatasourceConfig::default());
        assert!(config.logging.ansi);
    }

    #[test]
    fn test_invalid_log_level() {
        let err = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[storage\nbackend = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = AppConfig::from_toml_str("[storage]\nbackend = \"redis\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("unknown datasource backend 'redis'"));
    }

    #[test]
    fn test_backend_aliases_match_from_str() {
        for (name, expected) in [
            ("in-memory", DatasourceBackend::Memory),
            ("postgresql", DatasourceBackend::Postgres),
        ] {
            let config =
                AppConfig::from_toml_str(&format!("[storage]\nbackend = \"{name}\"\n")).unwrap();
            assert_eq!(config.storage.backend, expected);
            assert_eq!(name.parse::<DatasourceBackend>().unwrap(), expected);
        }

        let config = loader::build_config(
            Some("/nonexistent/datasource.toml"),
            loader::environment_from(&[("DATASOURCE__STORAGE__BACKEND", "in-memory")]),
        )
        .unwrap();
        assert_eq!(config.storage.backend, DatasourceBackend::Memory);
    }

    #[test]
    fn test_oversized_initial_capacity_rejected() {
        let err = AppConfig::from_toml_str("[storage.options]\ninitial_capacity = 1000000000000\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = loader::build_config(
            Some("/nonexistent/datasource.toml"),
            loader::environment_from(&[(
                "DATASOURCE__STORAGE__OPTIONS__INITIAL_CAPACITY",
                "4294967296000",
            )]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[storage.options]\nid_strategy = \"sequence\"\n\n[logging]\nlevel = \"error\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = loader::build_config(Some(path), loader::environment_from(&[])).unwrap();

        assert_eq!(config.storage.options.id_strategy, IdStrategy::Sequence);
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_load_config_with_default_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[storage.options]\ninitial_capacity = 8").unwrap();

        let config = loader::load_config_with_default_path(Some(file.path())).unwrap();
        assert_eq!(config.storage.options.initial_capacity, Some(8));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = loader::build_config(
            Some("/nonexistent/datasource.toml"),
            loader::environment_from(&[]),
        )
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"error\"").unwrap();

        let path = file.path().to_str().unwrap();
        let config = loader::build_config(
            Some(path),
            loader::environment_from(&[
                ("DATASOURCE__LOGGING__LEVEL", "trace"),
                ("DATASOURCE__STORAGE__BACKEND", "postgres"),
            ]),
        )
        .unwrap();

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.storage.backend, DatasourceBackend::Postgres);
    }

    #[test]
    fn test_environment_invalid_level_rejected() {
        let err = loader::build_config(
            Some("/nonexistent/datasource.toml"),
            loader::environment_from(&[("DATASOURCE__LOGGING__LEVEL", "chatty")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_build_datasource_from_config() {
        let config = AppConfig::from_toml_str("[storage.options]\nid_strategy = \"sequence\"\n")
            .unwrap();
        let mut datasource = crate::build_datasource(&config).unwrap();

        let record = datasource.create(serde_json::json!({"name": "a"})).unwrap();
        assert_eq!(record.id(), "1");

        let config = AppConfig::from_toml_str("[storage]\nbackend = \"postgres\"\n").unwrap();
        assert!(crate::build_datasource(&config).err().unwrap().is_unimplemented());
    }
}
