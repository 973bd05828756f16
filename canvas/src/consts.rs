//! Shared numeric constants for the canvas crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom increment used by the toolbar zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 0.1;

/// Base of the exponential wheel zoom: `zoom *= WHEEL_ZOOM_BASE ^ delta_y`.
pub const WHEEL_ZOOM_BASE: f64 = 0.999;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of edit snapshots retained by the history tracker.
pub const MAX_HISTORY: usize = 50;

// ── Grid ────────────────────────────────────────────────────────

pub const GRID_MIN_PITCH: f64 = 10.0;
pub const GRID_MAX_PITCH: f64 = 100.0;
pub const GRID_DEFAULT_PITCH: f64 = 20.0;
pub const GRID_PITCH_STEP: f64 = 10.0;

/// Grid stroke color.
pub const GRID_COLOR: &str = "#e0e0e0";

/// Grid stroke width in surface pixels.
pub const GRID_LINE_WIDTH: f64 = 0.5;

// ── Placement defaults ──────────────────────────────────────────

/// Default surface background.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Top-left corner where new images and shapes are placed.
pub const DEFAULT_PLACEMENT: f64 = 100.0;

/// Initial scale applied to inserted images.
pub const IMAGE_INITIAL_SCALE: f64 = 0.5;

/// Font size for newly added text.
pub const TEXT_FONT_SIZE: f64 = 32.0;

/// Fill color for newly added text.
pub const TEXT_FILL: &str = "#FF0000";

/// Placeholder text used when the caller supplies an empty string.
pub const TEXT_PLACEHOLDER: &str = "Edit me";

/// New text lands at a random offset in `[TEXT_SCATTER_MIN, TEXT_SCATTER_MIN + TEXT_SCATTER_RANGE)`.
pub const TEXT_SCATTER_MIN: f64 = 50.0;
pub const TEXT_SCATTER_RANGE: f64 = 200.0;

/// Default box for newly added shapes.
pub const SHAPE_WIDTH: f64 = 200.0;
pub const SHAPE_HEIGHT: f64 = 100.0;
pub const SHAPE_FILL: &str = "#ff0000";
pub const SHAPE_STROKE: &str = "#000000";
pub const SHAPE_STROKE_WIDTH: f64 = 2.0;

/// Offset applied to each successive paste, in surface pixels.
pub const PASTE_OFFSET: f64 = 10.0;

// ── Rendering ───────────────────────────────────────────────────

/// Pixel density multiplier for raster export.
pub const EXPORT_SCALE: f64 = 2.0;

/// Largest accepted surface side, in surface pixels.
pub const MAX_SURFACE_EXTENT: f64 = 16_384.0;

/// Pixel budget of one rendered image. Larger requests render at a reduced scale.
pub const MAX_RENDER_PIXELS: f64 = 67_108_864.0;

/// Longest side of one rendered image, in output pixels.
pub const MAX_RENDER_SIDE: f64 = 32_768.0;

/// Approximate glyph advance as a fraction of the font size, used for text metrics.
pub const TEXT_ADVANCE_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.16;
