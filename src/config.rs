use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the chroma-compositor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Chroma-key settings
    pub keying: KeyingConfig,

    /// Filter demo settings (blur, edges, brightness, blending)
    pub filter: FilterConfig,

    /// Feature detection and matching settings
    pub features: FeatureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keying: KeyingConfig::default(),
            filter: FilterConfig::default(),
            features: FeatureConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.keying.validate()?;
        self.filter.validate()?;
        self.features.validate()?;
        Ok(())
    }
}

/// Chroma-key configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyingConfig {
    /// Number of histogram buckets per color channel
    pub bucket_count: u32,
}

impl Default for KeyingConfig {
    fn default() -> Self {
        Self { bucket_count: 4 }
    }
}

impl KeyingConfig {
    /// Width of one histogram bucket in channel units
    pub fn bucket_size(&self) -> u32 {
        256 / self.bucket_count
    }

    fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 || self.bucket_count > 256 {
            return Err(ConfigError::InvalidValue {
                key: "keying.bucket_count".to_string(),
                value: self.bucket_count.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Filter demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Gaussian smoothing sigma for the single blur pass
    pub blur_sigma: f32,

    /// Largest sigma rendered by the edge-map sweep
    pub max_sigma: u32,

    /// Lower Canny hysteresis threshold
    pub canny_low: f32,

    /// Upper Canny hysteresis threshold
    pub canny_high: f32,

    /// Brightness offset added to every channel
    pub brighten_beta: i32,

    /// Blend weight of the first image (second gets 1 - alpha)
    pub blend_alpha: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            max_sigma: 10,
            canny_low: 20.0,
            canny_high: 60.0,
            brighten_beta: 10,
            blend_alpha: 0.5,
        }
    }
}

impl FilterConfig {
    fn validate(&self) -> Result<()> {
        if self.blur_sigma <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "filter.blur_sigma".to_string(),
                value: self.blur_sigma.to_string(),
            }
            .into());
        }

        if self.canny_low < 0.0 || self.canny_low >= self.canny_high {
            return Err(ConfigError::InvalidValue {
                key: "filter.canny_range".to_string(),
                value: format!("{}-{}", self.canny_low, self.canny_high),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.blend_alpha) {
            return Err(ConfigError::InvalidValue {
                key: "filter.blend_alpha".to_string(),
                value: self.blend_alpha.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Feature detection and matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// FAST corner detection threshold
    pub fast_threshold: u8,

    /// Maximum number of keypoints kept per image (highest scores win)
    pub max_keypoints: usize,

    /// Descriptor length in bits
    pub descriptor_bits: usize,

    /// Maximum Hamming distance for an accepted match
    pub match_threshold: u32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            fast_threshold: 20,
            max_keypoints: 500,
            descriptor_bits: 256,
            match_threshold: 64,
        }
    }
}

impl FeatureConfig {
    fn validate(&self) -> Result<()> {
        if self.max_keypoints == 0 {
            return Err(ConfigError::InvalidValue {
                key: "features.max_keypoints".to_string(),
                value: self.max_keypoints.to_string(),
            }
            .into());
        }

        // Descriptors are stored as packed 128-bit words
        if self.descriptor_bits == 0 || self.descriptor_bits % 128 != 0 {
            return Err(ConfigError::InvalidValue {
                key: "features.descriptor_bits".to_string(),
                value: self.descriptor_bits.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
