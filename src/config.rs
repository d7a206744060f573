// src/config.rs

//! Configuration for the rasterizer demo.
//!
//! Every struct deserializes from JSON with per-field defaults, so a config
//! file only needs the keys it wants to change. The process-wide [`CONFIG`]
//! is read once from the file named by `SIERPINSKI_CONFIG`, falling back to
//! defaults (with a warning) when the file is missing or malformed.

use crate::rasterizer::{RasterizerConfig, DEFAULT_WARMUP_ITERATIONS};
use crate::shading::Palette;
use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "SIERPINSKI_CONFIG";

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Chaos-game budget and seeding.
    pub rasterizer: RasterizerSettings,
    /// Size and row alignment of the drawing surface.
    pub surface: SurfaceConfig,
    /// Frame pacing.
    pub performance: PerformanceConfig,
    /// Colours for shading the count buffer.
    pub shading: Palette,
    /// Where results go.
    pub output: OutputConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `SIERPINSKI_CONFIG`, or defaults.
    pub fn from_env() -> Config {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            info!("{} not set, using default configuration", CONFIG_ENV_VAR);
            return Config::default();
        };
        let path = PathBuf::from(path);
        match Config::load(&path) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}. Using default configuration.", e);
                Config::default()
            }
        }
    }
}

// --- Rasterizer Configuration ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerSettings {
    /// Hits deposited per frame.
    pub iterations_per_step: u32,
    /// Total hits. When absent, derived from `samples_per_pixel`.
    pub iteration_limit: Option<u32>,
    /// Average hits per pixel used to derive the total budget.
    pub samples_per_pixel: u32,
    /// Burn-in moves before the first hit, at most `MAX_WARMUP_ITERATIONS`.
    pub warmup_iterations: u32,
    /// Fixed vertex-selection seed for reproducible images.
    pub seed: Option<u64>,
}

impl Default for RasterizerSettings {
    fn default() -> Self {
        RasterizerSettings {
            iterations_per_step: 6000,
            iteration_limit: None,
            samples_per_pixel: 5,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            seed: None,
        }
    }
}

impl RasterizerSettings {
    /// Total budget for a `width` x `height` frame, saturating at `u32::MAX`.
    pub fn iteration_limit_for(&self, width: u32, height: u32) -> u32 {
        self.iteration_limit.unwrap_or_else(|| {
            self.samples_per_pixel
                .saturating_mul(width)
                .saturating_mul(height)
        })
    }

    pub fn rasterizer_config(&self, width: u32, height: u32) -> RasterizerConfig {
        RasterizerConfig {
            width,
            height,
            iterations_per_step: self.iterations_per_step,
            iteration_limit: self.iteration_limit_for(width, height),
            warmup_iterations: self.warmup_iterations,
            seed: self.seed,
        }
    }
}

// --- Surface Configuration ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Row stride alignment in bytes. Shared GPU surfaces commonly want 16.
    pub row_alignment: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 512,
            height: 512,
            row_alignment: 16,
        }
    }
}

// --- Performance Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Target refresh rate of the frame loop. 0 runs frames back to back.
    pub frames_per_second: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            frames_per_second: 60,
        }
    }
}

impl PerformanceConfig {
    pub fn frame_interval(&self) -> Option<std::time::Duration> {
        match self.frames_per_second {
            0 => None,
            fps => Some(std::time::Duration::from_secs_f64(1.0 / fps as f64)),
        }
    }
}

// --- Output Configuration ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG written once the rasterizer is done. Nothing is written if unset.
    pub snapshot_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_and_alignment() {
        let config = Config::default();
        assert_eq!(config.rasterizer.iterations_per_step, 6000);
        assert_eq!(config.rasterizer.samples_per_pixel, 5);
        assert_eq!(config.rasterizer.warmup_iterations, 20);
        assert_eq!(config.surface.row_alignment, 16);
        assert!(config.output.snapshot_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{
            "rasterizer": { "iterations_per_step": 100, "seed": 9 },
            "surface": { "width": 64 },
            "shading": { "logarithmic": false }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.rasterizer.iterations_per_step, 100);
        assert_eq!(config.rasterizer.seed, Some(9));
        assert_eq!(config.rasterizer.samples_per_pixel, 5);
        assert_eq!(config.surface.width, 64);
        assert_eq!(config.surface.height, 512);
        assert!(!config.shading.logarithmic);
        assert_eq!(config.shading.background, Palette::default().background);
        assert_eq!(config.performance.frames_per_second, 60);
    }

    #[test]
    fn test_iteration_limit_derivation() {
        let mut settings = RasterizerSettings::default();
        assert_eq!(settings.iteration_limit_for(100, 100), 50_000);
        assert_eq!(settings.iteration_limit_for(u32::MAX, 2), u32::MAX);

        settings.iteration_limit = Some(1234);
        assert_eq!(settings.iteration_limit_for(100, 100), 1234);

        let config = settings.rasterizer_config(10, 20);
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.iteration_limit, 1234);
        assert_eq!(config.warmup_iterations, 20);
    }

    #[test]
    fn test_frame_interval() {
        let unthrottled = PerformanceConfig {
            frames_per_second: 0,
        };
        assert_eq!(unthrottled.frame_interval(), None);
        let sixty = PerformanceConfig::default().frame_interval().unwrap();
        assert!(sixty.as_millis() >= 16 && sixty.as_millis() <= 17);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/sierpinski.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
