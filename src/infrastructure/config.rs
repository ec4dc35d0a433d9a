use crate::error::StatsError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default)]
    pub use_mock_data: bool,
    #[serde(default = "default_fallback_to_mock")]
    pub fallback_to_mock: bool,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    #[serde(default)]
    pub token: Option<String>,
    pub database: String,
    #[serde(default = "default_retention_policy")]
    pub retention_policy: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_fallback_to_mock() -> bool {
    true
}

fn default_retention_policy() -> String {
    "autogen".to_string()
}

fn default_measurement() -> String {
    "traffic_stat".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Settings of the store to read from, `None` in mock mode. They are only
    /// mandatory when mock data is off.
    pub fn store_settings(&self) -> Result<Option<&DatabaseSettings>, StatsError> {
        if self.use_mock_data {
            return Ok(None);
        }
        match &self.database {
            Some(database) => Ok(Some(database)),
            None => Err(StatsError::Configuration(
                "database settings are required when use_mock_data is false".to_string(),
            )),
        }
    }
}

/// Load `config/dashboard.toml` (optional) overlaid with environment
/// variables, e.g. `TRAFFIC_USE_MOCK_DATA=true` or
/// `TRAFFIC_DATABASE__HOST=http://...`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment(None));

    build_config(builder)
}

/// Only `TRAFFIC_`-prefixed variables are read; `vars` replaces the process
/// environment when given.
fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix("TRAFFIC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

fn build_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    let config: AppConfig = settings.try_deserialize()?;
    config.store_settings()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        build_config(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_mock_mode_needs_no_database() {
        let config = from_toml("use_mock_data = true").unwrap();

        assert!(config.use_mock_data);
        assert!(config.fallback_to_mock);
        assert_eq!(config.listen_address, "0.0.0.0:8080");
        assert!(config.database.is_none());
    }

    #[test]
    fn test_store_mode_without_database_is_rejected() {
        let err = from_toml("use_mock_data = false").unwrap_err();
        assert!(err.to_string().contains("database settings are required"));
    }

    #[test]
    fn test_database_defaults() {
        let config = from_toml(
            r#"
            [database]
            host = "http://localhost:8086"
            database = "traffic"
            "#,
        )
        .unwrap();

        let database = config.database.unwrap();
        assert!(!config.use_mock_data);
        assert_eq!(database.retention_policy, "autogen");
        assert_eq!(database.measurement, "traffic_stat");
        assert_eq!(database.timeout_secs, 10);
        assert!(database.token.is_none());
    }

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        let mut vars = config::Map::new();
        for (key, value) in pairs {
            vars.insert(key.to_string(), value.to_string());
        }
        vars
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let vars = env(&[
            ("DATABASE", "postgres"),
            ("USE_MOCK_DATA", "false"),
            ("TRAFFIC_USE_MOCK_DATA", "true"),
        ]);
        let builder = config::Config::builder().add_source(environment(Some(vars)));

        let config = build_config(builder).unwrap();
        assert!(config.use_mock_data);
        assert!(config.database.is_none());
        assert!(config.store_settings().unwrap().is_none());
    }

    #[test]
    fn test_prefixed_variables_fill_nested_settings() {
        let vars = env(&[
            ("TRAFFIC_DATABASE__HOST", "http://influx:8086"),
            ("TRAFFIC_DATABASE__DATABASE", "traffic"),
            ("TRAFFIC_DATABASE__TIMEOUT_SECS", "3"),
            ("TRAFFIC_FALLBACK_TO_MOCK", "false"),
        ]);
        let builder = config::Config::builder().add_source(environment(Some(vars)));

        let config = build_config(builder).unwrap();
        let database = config.store_settings().unwrap().unwrap();
        assert_eq!(database.host, "http://influx:8086");
        assert_eq!(database.timeout_secs, 3);
        assert!(!config.fallback_to_mock);
    }

    #[test]
    fn test_string_booleans_are_parsed() {
        let builder = config::Config::builder()
            .add_source(File::from_str("fallback_to_mock = true", FileFormat::Toml))
            .set_override("use_mock_data", "true")
            .unwrap()
            .set_override("fallback_to_mock", "false")
            .unwrap();

        let config = build_config(builder).unwrap();
        assert!(config.use_mock_data);
        assert!(!config.fallback_to_mock);
    }
}
