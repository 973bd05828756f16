//! Viewport camera: zoom factor, pan offset, and coordinate conversions.
//!
//! The camera is a display-only transform. Entity coordinates never change
//! when the user zooms or pans; only the mapping between surface space and
//! screen space does. Every zoom operation clamps to `[MIN_ZOOM, MAX_ZOOM]`.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_BASE, ZOOM_STEP};

/// A point in either screen or surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the surface.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

/// Clamp a zoom level into the supported range. NaN collapses to 1.0.
#[must_use]
pub fn clamp_zoom(level: f64) -> f64 {
    if level.is_nan() {
        return 1.0;
    }
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Camera {
    /// Convert a screen-space point to surface coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a surface-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to surface-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Add `delta` to the zoom factor. Pan is left untouched.
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = clamp_zoom(self.zoom + delta);
    }

    /// Set the zoom factor. Pan is left untouched.
    pub fn zoom_to(&mut self, level: f64) {
        self.zoom = clamp_zoom(level);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    /// Multiply the zoom by `factor`, keeping the surface point under `(pointer_x, pointer_y)`
    /// at the same screen position.
    pub fn zoom_to_pointer(&mut self, pointer_x: f64, pointer_y: f64, factor: f64) {
        self.zoom_at(Point::new(pointer_x, pointer_y), clamp_zoom(self.zoom * factor));
    }

    /// Wheel zoom: `zoom * 0.999^delta_y`, anchored at the pointer.
    pub fn zoom_wheel(&mut self, pointer: Point, delta_y: f64) {
        self.zoom_to_pointer(pointer.x, pointer.y, WHEEL_ZOOM_BASE.powf(delta_y));
    }

    /// Set an absolute zoom level anchored at a screen point.
    pub fn zoom_at(&mut self, screen: Point, level: f64) {
        let anchor = self.screen_to_world(screen);
        self.zoom = clamp_zoom(level);
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y - anchor.y * self.zoom;
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Back to identity: zoom 1, no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a rounded percentage for toolbar display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percentage(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}
