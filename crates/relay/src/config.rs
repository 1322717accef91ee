use std::path::{Path, PathBuf};

use protocol::MAX_PLAYERS;
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:7700";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid relay config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("max_players must be between 1 and {max}, got {got}")]
    MaxPlayers { got: u8, max: usize },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Relay settings, read from an optional TOML file.
///
/// ```toml
/// bind_address = "0.0.0.0:7700"
/// max_players = 4
/// log_level = "debug"
/// log_dir = "logs"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub bind_address: String,
    pub max_players: u8,
    pub log_level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub log_dir: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.into(),
            max_players: MAX_PLAYERS as u8,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl RelayConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players == 0 || usize::from(self.max_players) > MAX_PLAYERS {
            return Err(ConfigError::MaxPlayers {
                got: self.max_players,
                max: MAX_PLAYERS,
            });
        }
        self.level_filter()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(RelayConfig::from_toml("").unwrap(), RelayConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = RelayConfig::from_toml(
            r#"
            bind_address = "127.0.0.1:9000"
            max_players = 2
            log_level = "debug"
            log_dir = "logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.max_players, 2);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn player_count_is_validated() {
        for bad in [0, 5] {
            let err = RelayConfig::from_toml(&format!("max_players = {bad}")).unwrap_err();
            assert!(matches!(err, ConfigError::MaxPlayers { got, .. } if got == bad));
        }
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = RelayConfig::from_toml(r#"log_level = "loud""#).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RelayConfig::from_toml("tick_rate = 60").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
