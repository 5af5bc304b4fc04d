use serde::{Serialize, Deserialize};

use crate::color::Hsl;

/// Construction options for the sky controller.
///
/// Times are model units, not seconds: the default day is 2400 units
/// long and the clock starts in the late afternoon at 1600.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Initial clock time.
    pub time: f32,
    /// Skybox extent; the inner canvas box is slightly smaller.
    pub size: f32,
    /// Initial shared sky color.
    pub color: Hsl,
    /// Model-time units advanced per tick. Negative plays in reverse.
    pub speed: f32,
    /// Clock wrap threshold.
    pub day_length: f32,
    /// Initial day counter.
    pub day: u32,
    /// Lunar period in days.
    pub moon_cycle: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            time: 1600.0,
            size: 768.0,
            color: Hsl::BLACK,
            speed: 0.1,
            day_length: 2400.0,
            day: 0,
            moon_cycle: 29.5305882,
        }
    }
}

impl SkyConfig {
    /// Defaults with the skybox sized to a world, three times its
    /// width, so the box stays beyond the far terrain.
    pub fn for_world_width(width: f32) -> Self {
        Self {
            size: width * 3.0,
            ..Self::default()
        }
    }

    /// Parse a TOML fragment, e.g. from a game settings file.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SkyConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.day_length > 0.0) {
            return Err(ConfigError::NonPositiveDayLength {
                value: self.day_length,
            });
        }
        if !(self.moon_cycle > 0.0) {
            return Err(ConfigError::NonPositiveMoonCycle {
                value: self.moon_cycle,
            });
        }
        if !(self.size > 0.0) {
            return Err(ConfigError::NonPositiveSize { value: self.size });
        }
        if !(0.0..self.day_length).contains(&self.time) {
            return Err(ConfigError::TimeOutOfRange {
                time: self.time,
                day_length: self.day_length,
            });
        }
        Ok(())
    }
}

/// Construction-time misconfiguration, surfaced to the harness before
/// any scene resources exist.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("day length must be positive: {value}")]
    NonPositiveDayLength { value: f32 },

    #[error("moon cycle must be positive: {value}")]
    NonPositiveMoonCycle { value: f32 },

    #[error("skybox size must be positive: {value}")]
    NonPositiveSize { value: f32 },

    #[error("initial time {time} outside day length {day_length}")]
    TimeOutOfRange { time: f32, day_length: f32 },

    #[error("invalid sky config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SkyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.time, 1600.0);
        assert_eq!(config.day_length, 2400.0);
    }

    #[test]
    fn test_world_width_scales_size() {
        let config = SkyConfig::for_world_width(100.0);
        assert_eq!(config.size, 300.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = SkyConfig::default();
        config.day_length = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDayLength { .. })
        ));

        let mut config = SkyConfig::default();
        config.time = 9999.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeOutOfRange { .. })
        ));

        let mut config = SkyConfig::default();
        config.moon_cycle = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = SkyConfig::from_toml_str(
            r#"
            time = 100.0
            speed = 2.0
            day_length = 1200.0
            "#,
        )
        .expect("valid fragment");
        assert_eq!(config.time, 100.0);
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.day_length, 1200.0);
        // untouched keys keep their defaults
        assert_eq!(config.day, 0);

        assert!(SkyConfig::from_toml_str("day_length = -5.0").is_err());
        assert!(SkyConfig::from_toml_str("time = \"noon\"").is_err());
    }
}
