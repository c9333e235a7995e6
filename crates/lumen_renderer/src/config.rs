//! Render and light-transport configuration.
//!
//! Both structs have sensible defaults and can be loaded from JSON, where
//! any omitted field falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the reflectance at a dielectric boundary is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FresnelModel {
    /// Normal-incidence reflectance `((n1 - n2) / (n1 + n2))²`.
    #[default]
    Normal,
    /// Schlick's approximation, adding the grazing-angle term.
    Schlick,
}

/// Settings for the recursive radiance evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Deepest recursion level that still contributes light
    pub max_depth: u32,
    /// Hemisphere samples for indirect light at a top-level evaluation
    pub indirect_samples: u32,
    /// Branch samples at a dielectric at a top-level evaluation
    pub fresnel_samples: u32,
    /// Mix reflection into refraction stochastically
    pub enable_fresnel: bool,
    /// Add one diffuse bounce of indirect light
    pub enable_indirect_lighting: bool,
    pub fresnel_model: FresnelModel,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            indirect_samples: 256,
            fresnel_samples: 256,
            enable_fresnel: true,
            enable_indirect_lighting: true,
            fresnel_model: FresnelModel::Normal,
        }
    }
}

impl TraceConfig {
    /// Reject settings the evaluator cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.enable_indirect_lighting && self.indirect_samples == 0 {
            return Err(ConfigError::Invalid(
                "indirect_samples must be at least 1 when indirect lighting is enabled".into(),
            ));
        }
        if self.enable_fresnel && self.fresnel_samples == 0 {
            return Err(ConfigError::Invalid(
                "fresnel_samples must be at least 1 when Fresnel mixing is enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Jittered camera rays per pixel when antialiasing
    pub antialiasing_samples: u32,
    /// Standard deviation of the jitter, in pixels
    pub antialiasing_stddev: f64,
    pub enable_antialiasing: bool,
    /// Exponent applied to radiance before quantizing
    pub gamma: f64,
    /// Seed for the per-bucket generators
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    pub trace: TraceConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            antialiasing_samples: 32,
            antialiasing_stddev: 0.25,
            enable_antialiasing: true,
            gamma: 1.0 / 2.2,
            seed: 0,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            trace: TraceConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: RenderConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::Invalid("bucket_size must be at least 1".into()));
        }
        if self.enable_antialiasing && self.antialiasing_samples == 0 {
            return Err(ConfigError::Invalid(
                "antialiasing_samples must be at least 1 when antialiasing is enabled".into(),
            ));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::Invalid(format!("gamma must be positive, got {}", self.gamma)));
        }
        self.trace.validate()
    }

    /// Camera rays traced per pixel.
    pub fn rays_per_pixel(&self) -> u32 {
        if self.enable_antialiasing {
            self.antialiasing_samples
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trace.max_depth, 5);
        assert_eq!(config.trace.fresnel_model, FresnelModel::Normal);
        assert_eq!(config.rays_per_pixel(), 32);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(
            r#"{ "width": 64, "trace": { "max_depth": 8, "fresnel_model": "schlick" } }"#,
        )
        .unwrap();

        assert_eq!(config.width, 64);
        assert_eq!(config.height, 512);
        assert_eq!(config.trace.max_depth, 8);
        assert_eq!(config.trace.indirect_samples, 256);
        assert_eq!(config.trace.fresnel_model, FresnelModel::Schlick);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = RenderConfig::from_json(r#"{ "trace": { "max_depth": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = RenderConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = RenderConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_disabled_features_skip_sample_checks() {
        let config = TraceConfig {
            indirect_samples: 0,
            enable_indirect_lighting: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rays_per_pixel_without_antialiasing() {
        let config = RenderConfig {
            enable_antialiasing: false,
            ..Default::default()
        };
        assert_eq!(config.rays_per_pixel(), 1);
    }
}
