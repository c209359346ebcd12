//! Runtime configuration: JSON file, then command-line overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::scenes::{StaircaseParams, Variant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Stair Gallery".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    /// Units per frame while a move key is held
    pub speed: f32,
    /// Radians per frame while a turn key is held
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 5.0, 10.0],
            speed: 0.1,
            rotation_speed: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Fraction of the remaining distance to the next path point covered per second
    pub speed: f32,
    pub arrive_distance: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            arrive_distance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub variant: Variant,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub staircase: StaircaseParams,
    pub sun: SunConfig,
    /// Radians per second while the staircase spin is toggled on
    pub spin_speed: f32,
    pub assets_dir: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            staircase: StaircaseParams::default(),
            sun: SunConfig::default(),
            spin_speed: 0.5,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl GalleryConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid gallery config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load config {}", path.display()))
    }

    /// File config if `--config` was given, defaults otherwise, then flag overrides
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(assets) = &cli.assets {
            self.assets_dir = assets.clone();
        }
        if let Some(steps) = cli.steps {
            self.staircase.step_count = steps;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.staircase.validate().context("invalid staircase parameters")?;
        anyhow::ensure!(self.window.width > 0 && self.window.height > 0, "window size must be non-zero");
        anyhow::ensure!(
            self.camera.near > 0.0 && self.camera.far > self.camera.near,
            "camera needs 0 < near < far"
        );
        anyhow::ensure!(
            self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0,
            "fov_degrees must be in (0, 180)"
        );
        anyhow::ensure!(
            self.sun.speed.is_finite() && self.sun.speed > 0.0,
            "sun.speed must be positive, got {}",
            self.sun.speed
        );
        anyhow::ensure!(
            self.sun.arrive_distance.is_finite() && self.sun.arrive_distance > 0.0,
            "sun.arrive_distance must be positive, got {}",
            self.sun.arrive_distance
        );
        anyhow::ensure!(self.spin_speed.is_finite(), "spin_speed must be finite");
        Ok(())
    }
}
