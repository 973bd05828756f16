//! Editor configuration.
//!
//! DESIGN
//! ======
//! Every setting is a CLI flag with an environment fallback. `main` loads
//! `.env` through `dotenvy` before clap parses, so a `.env` file next to the
//! binary behaves like exported variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use canvas::color::parse_hex;
use canvas::session::SurfaceConfig;
use clap::Args;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("export scale must be positive, got {0}")]
    InvalidScale(f64),
    #[error("background is not a hex color: {0:?}")]
    InvalidBackground(String),
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Surface width in pixels.
    #[arg(long, env = "DESIGNER_CANVAS_WIDTH", default_value_t = 800.0)]
    pub width: f64,

    /// Surface height in pixels.
    #[arg(long, env = "DESIGNER_CANVAS_HEIGHT", default_value_t = 600.0)]
    pub height: f64,

    /// Surface background color.
    #[arg(long, env = "DESIGNER_BACKGROUND", default_value = "#ffffff")]
    pub background: String,

    /// Directory exports are written to.
    #[arg(long, env = "DESIGNER_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Pixel density of PNG exports.
    #[arg(long, env = "DESIGNER_EXPORT_SCALE", default_value_t = 2.0)]
    pub export_scale: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: "#ffffff".into(),
            out_dir: PathBuf::from("."),
            export_scale: 2.0,
        }
    }
}

impl EditorConfig {
    /// Reject sizes and scales the editor cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidSize { width: self.width, height: self.height });
        }
        if !positive(self.export_scale) {
            return Err(ConfigError::InvalidScale(self.export_scale));
        }
        if parse_hex(&self.background).is_none() {
            return Err(ConfigError::InvalidBackground(self.background.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceConfig {
        SurfaceConfig::new(self.width, self.height).with_background(self.background.clone())
    }
}
