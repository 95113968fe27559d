//! Kinesis configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use kinesis_animation::{BezierEase, DynamicsParams};

/// Top-level Kinesis configuration (kinesis.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KinesisConfig {
    #[serde(default)]
    pub ease: EaseConfig,
    #[serde(default)]
    pub dynamics: DynamicsConfig,
}

/// Bezier easing curve
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct EaseConfig {
    #[serde(default = "default_x1")]
    pub x1: f64,
    #[serde(default = "default_y1")]
    pub y1: f64,
    #[serde(default = "default_x2")]
    pub x2: f64,
    #[serde(default = "default_y2")]
    pub y2: f64,
    /// Points to sample across [0, 1]
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_x1() -> f64 {
    0.21
}

fn default_y1() -> f64 {
    -0.52
}

fn default_x2() -> f64 {
    0.59
}

fn default_y2() -> f64 {
    1.48
}

fn default_samples() -> usize {
    11
}

impl Default for EaseConfig {
    fn default() -> Self {
        Self {
            x1: default_x1(),
            y1: default_y1(),
            x2: default_x2(),
            y2: default_y2(),
            samples: default_samples(),
        }
    }
}

impl EaseConfig {
    pub fn curve(&self) -> Result<BezierEase> {
        BezierEase::try_new(self.x1, self.y1, self.x2, self.y2).context("Invalid easing curve")
    }
}

/// Second-order dynamics and the step response used to preview them
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct DynamicsConfig {
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_response")]
    pub response: f64,
    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Ticks the input is held at 0
    #[serde(default = "default_low")]
    pub low: usize,
    /// Ticks the input is held at 1
    #[serde(default = "default_high")]
    pub high: usize,
}

fn default_frequency() -> f64 {
    1.0
}

fn default_damping() -> f64 {
    0.5
}

fn default_response() -> f64 {
    2.0
}

fn default_fps() -> f64 {
    60.0
}

fn default_low() -> usize {
    60
}

fn default_high() -> usize {
    120
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            damping: default_damping(),
            response: default_response(),
            fps: default_fps(),
            low: default_low(),
            high: default_high(),
        }
    }
}

impl DynamicsConfig {
    pub fn params(&self) -> DynamicsParams {
        DynamicsParams::new(self.frequency, self.damping, self.response)
    }
}

impl KinesisConfig {
    /// Load configuration from a file, or `kinesis.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("kinesis.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = KinesisConfig::from_toml("").unwrap();
        assert_eq!(config, KinesisConfig::default());
        assert_eq!(config.ease.curve().unwrap(), BezierEase::default());
        assert_eq!(config.dynamics.params(), DynamicsParams::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = KinesisConfig::from_toml(
            r#"
            [ease]
            y1 = 0.0

            [dynamics]
            frequency = 4.0
            high = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.ease.y1, 0.0);
        assert_eq!(config.ease.x1, 0.21);
        assert_eq!(config.dynamics.frequency, 4.0);
        assert_eq!(config.dynamics.damping, 0.5);
        assert_eq!(config.dynamics.high, 30);
        assert_eq!(config.dynamics.low, 60);
    }

    #[test]
    fn test_round_trip_default() {
        let text = KinesisConfig::default().to_toml().unwrap();
        assert_eq!(
            KinesisConfig::from_toml(&text).unwrap(),
            KinesisConfig::default()
        );
    }

    #[test]
    fn test_bad_type_is_an_error() {
        assert!(KinesisConfig::from_toml("[dynamics]\nfrequency = \"fast\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = KinesisConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
