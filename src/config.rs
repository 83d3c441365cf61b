use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Client-side timing knobs. All animation and replay pacing is expressed in
/// scheduling ticks of `drop_tick_ms` each.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Milliseconds per animation tick (one row of disc fall).
    pub drop_tick_ms: u64,
    /// Milliseconds to pause between the player's disc landing and the
    /// server's reply disc starting to fall.
    pub server_move_delay_ms: u64,
    /// Ticks to wait between a disc landing and the next replayed move.
    pub replay_interval_ticks: u32,
}

impl ClientConfig {
    /// The server-move pause expressed in whole animation ticks.
    pub fn server_move_delay_ticks(&self) -> u32 {
        (self.server_move_delay_ms / self.drop_tick_ms.max(1)) as u32
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            drop_tick_ms: 50,
            server_move_delay_ms: 500,
            replay_interval_ticks: 10,
        }
    }
}

/// Recording store location.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("recordings"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.drop_tick_ms == 0 {
            return Err(ConfigError::Validation(
                "client.drop_tick_ms must be > 0".into(),
            ));
        }
        if self.client.drop_tick_ms > 1000 {
            return Err(ConfigError::Validation(
                "client.drop_tick_ms must be <= 1000".into(),
            ));
        }
        if self.client.server_move_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "client.server_move_delay_ms must be <= 10000".into(),
            ));
        }
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.client.drop_tick_ms, 50);
        assert_eq!(config.client.server_move_delay_ms, 500);
        assert_eq!(config.store.data_dir, PathBuf::from("recordings"));
    }

    #[test]
    fn test_server_move_delay_converts_to_whole_ticks() {
        let mut client = ClientConfig::default();
        assert_eq!(client.server_move_delay_ticks(), 10);

        client.server_move_delay_ms = 0;
        assert_eq!(client.server_move_delay_ticks(), 0);

        client.drop_tick_ms = 40;
        client.server_move_delay_ms = 500;
        assert_eq!(client.server_move_delay_ticks(), 12);
    }

    #[test]
    fn test_load_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ndrop_tick_ms = 25\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.client.drop_tick_ms, 25);
        assert_eq!(config.client.replay_interval_ticks, 10);
        assert_eq!(config.store.data_dir, PathBuf::from("recordings"));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ndrop_tick_ms = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default(Path::new("does_not_exist.toml")).unwrap();
        assert_eq!(config.client.drop_tick_ms, 50);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "client = not toml").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
