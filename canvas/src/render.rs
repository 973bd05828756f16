//! Rendering: draws a surface into an RGBA pixel buffer.
//!
//! Layers, bottom to top:
//!
//! 1. background fill
//! 2. visible entities in stacking order
//! 3. grid overlay (the "after render" pass)
//!
//! Every entity is drawn by inverse mapping. Each output pixel inside the
//! entity's rotated bounding box is mapped back into the entity's unrotated
//! frame and classified as fill, stroke, or outside. This module only reads
//! state; it never mutates the surface or grid.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;

use image::RgbaImage;
use tracing::warn;

use crate::camera::Point;
use crate::color::{Rgba, parse_hex};
use crate::consts::{
    EXPORT_SCALE, GRID_COLOR, GRID_LINE_WIDTH, MAX_RENDER_PIXELS, MAX_RENDER_SIDE, TEXT_ADVANCE_RATIO,
    TEXT_LINE_HEIGHT,
};
use crate::doc::{Bounds, Entity, EntityKind, Props, Surface};
use crate::grid::{Axis, Grid};
use crate::hit::unrotate;

/// Decoded image pixels keyed by the entity's `src`.
pub type ImageCache = HashMap<String, RgbaImage>;

const WHITE: Rgba = Rgba::opaque(255, 255, 255);
const DEFAULT_FILL: Rgba = Rgba::opaque(0xD9, 0x4B, 0x4B);
const PLACEHOLDER_FILL: Rgba = Rgba::opaque(0xCC, 0xCC, 0xCC);
const PLACEHOLDER_STROKE: Rgba = Rgba::opaque(0x99, 0x99, 0x99);

/// Fraction of a glyph cell that is inked when drawing text boxes.
const GLYPH_INK: f64 = 0.8;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Output pixels per surface pixel.
    pub scale: f64,
    /// Pixels for image entities. Images without an entry draw as a placeholder.
    pub images: Option<&'a ImageCache>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self { scale: 1.0, images: None }
    }
}

impl<'a> RenderOptions<'a> {
    /// Options for PNG export (2x pixel density).
    #[must_use]
    pub fn export() -> Self {
        Self { scale: EXPORT_SCALE, images: None }
    }

    #[must_use]
    pub fn with_images(mut self, images: &'a ImageCache) -> Self {
        self.images = Some(images);
        self
    }
}

/// Draw the full surface.
///
/// A non-finite or non-positive scale is treated as 1. Scales that would exceed
/// the pixel budget are reduced to fit it.
#[must_use]
pub fn render(surface: &Surface, grid: &Grid, options: &RenderOptions<'_>) -> RgbaImage {
    let requested = if options.scale.is_finite() && options.scale > 0.0 { options.scale } else { 1.0 };
    let scale = capped_scale(surface.width(), surface.height(), requested);
    let background = parse_hex(surface.background()).unwrap_or(WHITE);
    let mut canvas =
        RgbaImage::from_pixel(pixels(surface.width() * scale), pixels(surface.height() * scale), pixel(background));

    for entity in surface.objects().iter().filter(|e| e.visible) {
        draw_entity(&mut canvas, entity, scale, options.images);
    }
    draw_grid(&mut canvas, grid, surface, scale);
    canvas
}

/// Shrink `scale` so the output stays within [`MAX_RENDER_PIXELS`] and [`MAX_RENDER_SIDE`].
fn capped_scale(width: f64, height: f64, scale: f64) -> f64 {
    let (w, h) = (width.max(1.0), height.max(1.0));
    let limit = (MAX_RENDER_PIXELS / (w * h)).sqrt().min(MAX_RENDER_SIDE / w.max(h));
    if scale <= limit {
        return scale;
    }
    warn!(requested = scale, capped = limit, "render scale reduced to fit pixel budget");
    limit
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(extent: f64) -> u32 {
    extent.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(v: f64, limit: u32) -> u32 {
    v.clamp(0.0, f64::from(limit)) as u32
}

fn pixel(c: Rgba) -> image::Rgba<u8> {
    image::Rgba([c.r, c.g, c.b, c.a])
}

fn draw_entity(canvas: &mut RgbaImage, entity: &Entity, scale: f64, images: Option<&ImageCache>) {
    let b = entity.bounds();
    if !(b.width > 0.0 && b.height > 0.0) {
        return;
    }
    let anchor = Point::new(entity.x, entity.y);
    let corners = [
        Point::new(b.left, b.top),
        Point::new(b.left + b.width, b.top),
        Point::new(b.left + b.width, b.top + b.height),
        Point::new(b.left, b.top + b.height),
    ]
    .map(|c| unrotate(c, anchor, -entity.rotation));

    let min_x = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max);

    let (w, h) = canvas.dimensions();
    let x0 = to_index((min_x * scale).floor(), w);
    let x1 = to_index((max_x * scale).ceil(), w);
    let y0 = to_index((min_y * scale).floor(), h);
    let y1 = to_index((max_y * scale).ceil(), h);

    let props = Props::new(&entity.props);
    let image = images.and_then(|cache| cache.get(props.src()));

    for py in y0..y1 {
        for px in x0..x1 {
            let world = Point::new((f64::from(px) + 0.5) / scale, (f64::from(py) + 0.5) / scale);
            let local = unrotate(world, anchor, entity.rotation);
            if let Some(color) = shade(entity, &props, &b, local, image) {
                blend(canvas.get_pixel_mut(px, py), color, entity.opacity);
            }
        }
    }
}

/// Color of the entity at a point in its unrotated frame, or `None` outside it.
fn shade(entity: &Entity, props: &Props<'_>, b: &Bounds, local: Point, image: Option<&RgbaImage>) -> Option<Rgba> {
    let fill = parse_hex(props.fill()).unwrap_or(DEFAULT_FILL);
    let stroke = parse_hex(props.stroke()).unwrap_or(DEFAULT_FILL);
    let stroke_width = props.stroke_width().max(0.0);
    let (left, top, right, bottom) = (b.left, b.top, b.left + b.width, b.top + b.height);

    match entity.kind {
        EntityKind::Rect => {
            let quad = [Point::new(left, top), Point::new(right, top), Point::new(right, bottom), Point::new(left, bottom)];
            paint(polygon_depth(local, &quad), fill, stroke, stroke_width)
        }
        EntityKind::Triangle => {
            let tri = [Point::new(left + b.width / 2.0, top), Point::new(right, bottom), Point::new(left, bottom)];
            paint(polygon_depth(local, &tri), fill, stroke, stroke_width)
        }
        EntityKind::Ellipse => {
            let (rx, ry) = (b.width / 2.0, b.height / 2.0);
            let nx = (local.x - (left + rx)) / rx;
            let ny = (local.y - (top + ry)) / ry;
            let depth = (1.0 - (nx * nx + ny * ny).sqrt()) * rx.min(ry);
            paint(depth, fill, stroke, stroke_width)
        }
        EntityKind::Text => text_ink(entity, props, b, local).then_some(fill),
        EntityKind::Image => {
            let u = (local.x - left) / b.width;
            let v = (local.y - top) / b.height;
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                return None;
            }
            match image.filter(|img| img.width() > 0 && img.height() > 0) {
                Some(img) => {
                    let (iw, ih) = img.dimensions();
                    let sx = to_index((u * f64::from(iw)).floor(), iw.saturating_sub(1));
                    let sy = to_index((v * f64::from(ih)).floor(), ih.saturating_sub(1));
                    let [r, g, bl, a] = img.get_pixel(sx, sy).0;
                    Some(Rgba { r, g, b: bl, a })
                }
                None => {
                    let quad =
                        [Point::new(left, top), Point::new(right, top), Point::new(right, bottom), Point::new(left, bottom)];
                    paint(polygon_depth(local, &quad), PLACEHOLDER_FILL, PLACEHOLDER_STROKE, 1.0)
                }
            }
        }
    }
}

/// Fill or stroke by distance from the outline. Negative depth is outside.
fn paint(depth: f64, fill: Rgba, stroke: Rgba, stroke_width: f64) -> Option<Rgba> {
    if depth < 0.0 {
        None
    } else if depth < stroke_width {
        Some(stroke)
    } else {
        Some(fill)
    }
}

/// Signed distance to the nearest edge of a convex polygon with clockwise
/// vertices (in y-down coordinates). Positive inside.
fn polygon_depth(pt: Point, vertices: &[Point]) -> f64 {
    let mut depth = f64::INFINITY;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let (ex, ey) = (b.x - a.x, b.y - a.y);
        let len = ex.hypot(ey);
        if len == 0.0 {
            continue;
        }
        let cross = ex * (pt.y - a.y) - ey * (pt.x - a.x);
        depth = depth.min(cross / len);
    }
    depth
}

/// Whether a point lands on an inked glyph cell of a text entity.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn text_ink(entity: &Entity, props: &Props<'_>, b: &Bounds, local: Point) -> bool {
    let dx = local.x - b.left;
    let dy = local.y - b.top;
    if dx < 0.0 || dy < 0.0 || dx > b.width || dy > b.height {
        return false;
    }
    let font = props.font_size();
    let advance = font * TEXT_ADVANCE_RATIO * entity.scale_x.abs();
    let line_height = font * TEXT_LINE_HEIGHT * entity.scale_y.abs();
    if advance <= 0.0 || line_height <= 0.0 {
        return false;
    }

    let line = (dy / line_height).floor() as usize;
    if dy - line as f64 * line_height > font * entity.scale_y.abs() {
        return false;
    }
    let col = (dx / advance).floor() as usize;
    if dx - col as f64 * advance > advance * GLYPH_INK {
        return false;
    }
    props
        .text()
        .split('\n')
        .nth(line)
        .and_then(|l| l.chars().nth(col))
        .is_some_and(|c| !c.is_whitespace())
}

fn draw_grid(canvas: &mut RgbaImage, grid: &Grid, surface: &Surface, scale: f64) {
    let color = parse_hex(GRID_COLOR).unwrap_or(WHITE);
    let (w, h) = canvas.dimensions();
    let thickness = pixels((GRID_LINE_WIDTH * scale).ceil());

    for line in grid.lines(surface.width(), surface.height()) {
        let start = to_index((line.offset * scale).floor(), u32::MAX);
        let band = start..start.saturating_add(thickness);
        match line.axis {
            Axis::Vertical => {
                for x in band.filter(|x| *x < w) {
                    for y in 0..h {
                        blend(canvas.get_pixel_mut(x, y), color, 1.0);
                    }
                }
            }
            Axis::Horizontal => {
                for y in band.filter(|y| *y < h) {
                    for x in 0..w {
                        blend(canvas.get_pixel_mut(x, y), color, 1.0);
                    }
                }
            }
        }
    }
}

/// Source-over compositing of `src` at `opacity` onto `dst`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(dst: &mut image::Rgba<u8>, src: Rgba, opacity: f64) {
    let sa = f64::from(src.a) / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = f64::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| {
        let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    let [dr, dg, db, _] = dst.0;
    dst.0 = [mix(src.r, dr), mix(src.g, dg), mix(src.b, db), (out_a * 255.0).round().clamp(0.0, 255.0) as u8];
}
