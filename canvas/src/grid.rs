//! Alignment grid overlay.
//!
//! Purely presentational. The grid is drawn after the entities on every
//! render when enabled and never takes part in hit-testing or history.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::{GRID_DEFAULT_PITCH, GRID_MAX_PITCH, GRID_MIN_PITCH, GRID_PITCH_STEP};

/// Orientation of a single grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// One grid line in surface coordinates, spanning the full surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    /// x for vertical lines, y for horizontal lines.
    pub offset: f64,
    /// Length of the line (surface height for vertical lines, width for horizontal).
    pub length: f64,
}

/// Grid settings: on/off and pixel pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    enabled: bool,
    pitch: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self { enabled: false, pitch: GRID_DEFAULT_PITCH }
    }
}

/// Clamp a pitch into `[GRID_MIN_PITCH, GRID_MAX_PITCH]`. NaN falls back to the default.
#[must_use]
pub fn clamp_pitch(pitch: f64) -> f64 {
    if pitch.is_nan() {
        return GRID_DEFAULT_PITCH;
    }
    pitch.clamp(GRID_MIN_PITCH, GRID_MAX_PITCH)
}

impl Grid {
    #[must_use]
    pub fn new(enabled: bool, pitch: f64) -> Self {
        Self { enabled, pitch: clamp_pitch(pitch) }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = clamp_pitch(pitch);
    }

    pub fn increase(&mut self) {
        self.set_pitch(self.pitch + GRID_PITCH_STEP);
    }

    pub fn decrease(&mut self) {
        self.set_pitch(self.pitch - GRID_PITCH_STEP);
    }

    #[must_use]
    pub fn can_increase(&self) -> bool {
        self.enabled && self.pitch < GRID_MAX_PITCH
    }

    #[must_use]
    pub fn can_decrease(&self) -> bool {
        self.enabled && self.pitch > GRID_MIN_PITCH
    }

    /// Lines to stroke over a `width` x `height` surface: vertical lines left to
    /// right, then horizontal lines top to bottom. Empty when disabled.
    #[must_use]
    pub fn lines(&self, width: f64, height: f64) -> Vec<GridLine> {
        if !self.enabled || width < 0.0 || height < 0.0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        push_lines(&mut out, Axis::Vertical, self.pitch, width, height);
        push_lines(&mut out, Axis::Horizontal, self.pitch, height, width);
        out
    }
}

fn push_lines(out: &mut Vec<GridLine>, axis: Axis, pitch: f64, extent: f64, length: f64) {
    let mut step = 0.0_f64;
    loop {
        let offset = step * pitch;
        if offset > extent {
            break;
        }
        out.push(GridLine { axis, offset, length });
        step += 1.0;
    }
}
