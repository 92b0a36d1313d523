//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults (the reference frame)
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`TORUS_SECTION__KEY`)
//! 5. Command-line output path

use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use torus_render::{FrameParams, Rounding, SampleGrid};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Raster configuration
    #[serde(default)]
    pub frame: FrameConfig,
    /// Torus geometry
    #[serde(default)]
    pub torus: TorusConfig,
    /// Orientation and viewer
    #[serde(default)]
    pub view: ViewConfig,
    /// Surface sampling density
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Shading and quantization
    #[serde(default)]
    pub shading: ShadingConfig,
    /// Output destination
    #[serde(default)]
    pub output: OutputConfig,
    /// Rendering strategy
    #[serde(default)]
    pub render: RenderConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TORUS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        Self::figment(config_dir).extract().map_err(ConfigError::from)
    }

    /// Load configuration, letting a command-line output path win over every other source
    pub fn load_with_output<P: AsRef<Path>>(
        config_dir: P,
        output_path: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut figment = Self::figment(config_dir);
        if let Some(path) = output_path {
            figment = figment.merge(Serialized::default("output.path", path));
        }
        figment.extract().map_err(ConfigError::from)
    }

    fn figment<P: AsRef<Path>>(config_dir: P) -> Figment {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional user overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override files
        // TORUS_VIEW__ANGLE_A=0.5 -> view.angle_a = 0.5
        figment.merge(Env::prefixed("TORUS_").split("__"))
    }

    /// Convert into the renderer's parameters
    pub fn to_frame_params(&self) -> FrameParams {
        FrameParams {
            width: self.frame.width as usize,
            height: self.frame.height as usize,
            tube_radius: self.torus.tube_radius,
            revolution_radius: self.torus.revolution_radius,
            angle_a: self.view.angle_a,
            angle_b: self.view.angle_b,
            viewer_distance: self.view.viewer_distance,
            fit_factor: self.view.fit_factor,
            theta_step: self.sampling.theta_step,
            phi_step: self.sampling.phi_step,
            max_code: self.shading.max_code,
            luminance_max: self.shading.luminance_max,
            rounding: self.shading.rounding,
            sample_grid: self.sampling.grid,
        }
    }
}

/// Raster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
        }
    }
}

/// Torus geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    /// Tube radius R1
    pub tube_radius: f64,
    /// Revolution radius R2
    pub revolution_radius: f64,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            tube_radius: 1.0,
            revolution_radius: 2.0,
        }
    }
}

/// Orientation and viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Tilt angle A in radians
    pub angle_a: f64,
    /// Spin angle B in radians
    pub angle_b: f64,
    /// Viewer distance K2
    pub viewer_distance: f64,
    /// Fit factor c used to derive the focal scale K1
    pub fit_factor: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            angle_a: 1.0,
            angle_b: 1.0,
            viewer_distance: 5.0,
            fit_factor: 4.0,
        }
    }
}

/// Surface sampling density
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Step around the tube cross-section (radians)
    pub theta_step: f64,
    /// Step around the revolution axis (radians)
    pub phi_step: f64,
    /// Grid layout ("indexed" or "legacy")
    pub grid: SampleGrid,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            theta_step: 0.07,
            phi_step: 0.02,
            grid: SampleGrid::Indexed,
        }
    }
}

/// Shading and quantization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Largest brightness code (at most 15)
    pub max_code: u8,
    /// Luminance mapped to `max_code`
    pub luminance_max: f64,
    /// Rounding for projection and quantization ("nearest" or "truncate")
    pub rounding: Rounding,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            max_code: 15,
            luminance_max: 1.41,
            rounding: Rounding::Nearest,
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the `.mem` file to write
    pub path: String,
    /// Print a text preview of the frame after writing
    pub preview: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "donut_data.mem".to_string(),
            preview: false,
        }
    }
}

/// Rendering strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render on the thread pool (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
