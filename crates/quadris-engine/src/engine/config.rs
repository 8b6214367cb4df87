use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{BoardSize, DEFAULT_SPAWN_COLUMN};

/// Mask columns span `anchor - 2 ..= anchor + 1`.
const MASK_LEFT_REACH: u16 = 2;
const MASK_RIGHT_REACH: u16 = 1;

/// Tunable parameters of a session.
///
/// Every field has a default, so a partial JSON document is a valid configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use quadris_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "gravity_interval": 500 }"#).unwrap();
/// assert_eq!(config.gravity_interval, Duration::from_millis(500));
/// assert_eq!(config.board_width, 15);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board_width: u16,
    pub board_height: u16,
    /// Time between gravity steps, in milliseconds when serialized.
    #[serde(with = "duration_millis")]
    pub gravity_interval: Duration,
    pub points_per_row: usize,
    pub spawn_column: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: 15,
            board_height: 25,
            gravity_interval: Duration::from_millis(270),
            points_per_row: 10,
            spawn_column: DEFAULT_SPAWN_COLUMN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width {width} cannot hold a piece spawned at column {spawn_column}")]
    SpawnOutsideBoard { width: u16, spawn_column: u16 },
    #[display("board height {height} is below the minimum of 2 rows")]
    BoardTooShort { height: u16 },
    #[display("gravity interval must be positive")]
    ZeroGravityInterval,
}

impl EngineConfig {
    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.board_width, self.board_height)
    }

    /// Checks that every spawned piece fits horizontally and that gravity advances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fits = self.spawn_column >= MASK_LEFT_REACH
            && self
                .spawn_column
                .checked_add(MASK_RIGHT_REACH)
                .is_some_and(|right| right < self.board_width);
        if !fits {
            return Err(ConfigError::SpawnOutsideBoard {
                width: self.board_width,
                spawn_column: self.spawn_column,
            });
        }
        if self.board_height < 2 {
            return Err(ConfigError::BoardTooShort {
                height: self.board_height,
            });
        }
        if self.gravity_interval.is_zero() {
            return Err(ConfigError::ZeroGravityInterval);
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.board_size(), BoardSize::new(15, 25));
        assert_eq!(config.spawn_column, 5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            board_width: 10,
            board_height: 20,
            gravity_interval: Duration::from_millis(800),
            points_per_row: 100,
            spawn_column: 4,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"gravity_interval\":800"));
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_narrowest_board() {
        let config = EngineConfig {
            board_width: 7,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{ "speed": 3 }"#).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let narrow = EngineConfig {
            board_width: 6,
            ..EngineConfig::default()
        };
        assert_eq!(
            narrow.validate(),
            Err(ConfigError::SpawnOutsideBoard {
                width: 6,
                spawn_column: 5
            })
        );

        let left = EngineConfig {
            spawn_column: 1,
            ..EngineConfig::default()
        };
        assert!(matches!(
            left.validate(),
            Err(ConfigError::SpawnOutsideBoard { .. })
        ));

        let short = EngineConfig {
            board_height: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            short.validate(),
            Err(ConfigError::BoardTooShort { height: 1 })
        );

        let frozen = EngineConfig {
            gravity_interval: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::ZeroGravityInterval));
        assert_eq!(
            ConfigError::ZeroGravityInterval.to_string(),
            "gravity interval must be positive"
        );
    }
}
