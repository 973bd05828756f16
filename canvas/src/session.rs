//! Canvas session manager: owns the one drawing surface of an editor session.
//!
//! The session is either uninitialized (no surface, possibly with the message
//! of the last failed attempt) or holds exactly one `Surface`. Everything that
//! depends on a surface checks `surface()` and does nothing when it is absent.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, warn};

use crate::color::parse_hex;
use crate::consts::{DEFAULT_BACKGROUND, MAX_SURFACE_EXTENT};
use crate::doc::Surface;

/// Dimensions and background for a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub background: String,
}

impl SurfaceConfig {
    /// A `width` x `height` surface on the default white background.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, background: DEFAULT_BACKGROUND.to_string() }
    }

    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }
}

/// Surface construction failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InitError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid background color: {0:?}")]
    InvalidBackground(String),
}

#[derive(Debug, Default)]
pub struct Session {
    surface: Option<Surface>,
    error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the surface, or return the existing one unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] when the config is rejected. The session stays
    /// uninitialized and the message is kept in [`Session::error`].
    pub fn initialize(&mut self, config: &SurfaceConfig) -> Result<&mut Surface, InitError> {
        let surface = match self.surface.take() {
            Some(existing) => existing,
            None => match build(config) {
                Ok(surface) => {
                    debug!(width = config.width, height = config.height, "surface initialized");
                    self.error = None;
                    surface
                }
                Err(e) => {
                    warn!(error = %e, "surface initialization failed");
                    self.error = Some(e.to_string());
                    return Err(e);
                }
            },
        };
        Ok(self.surface.insert(surface))
    }

    /// Drop the surface. A later `initialize` starts from scratch.
    pub fn teardown(&mut self) {
        if self.surface.take().is_some() {
            debug!("surface torn down");
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    /// Message from the last failed `initialize`, cleared by a successful one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn build(config: &SurfaceConfig) -> Result<Surface, InitError> {
    validate_surface(config.width, config.height, &config.background)?;
    Ok(Surface::new(config.width, config.height, config.background.trim()))
}

/// Check surface dimensions and background. Shared by initialization and document loads.
///
/// # Errors
///
/// Returns [`InitError::InvalidDimensions`] for a non-finite, non-positive or
/// oversized side, and [`InitError::InvalidBackground`] for a non-hex color.
pub fn validate_surface(width: f64, height: f64, background: &str) -> Result<(), InitError> {
    let valid = |v: f64| v.is_finite() && v > 0.0 && v <= MAX_SURFACE_EXTENT;
    if !valid(width) || !valid(height) {
        return Err(InitError::InvalidDimensions { width, height });
    }
    if parse_hex(background).is_none() {
        return Err(InitError::InvalidBackground(background.to_string()));
    }
    Ok(())
}
