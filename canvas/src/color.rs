//! Hex color parsing shared by the session manager (background validation) and the renderer.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `opacity` (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        let scaled = f64::from(self.a) * opacity.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let a = scaled.round() as u8;
        Self { a, ..self }
    }
}

/// Parse `#rgb` or `#rrggbb` (case-insensitive). Returns `None` for anything else.
#[must_use]
pub fn parse_hex(raw: &str) -> Option<Rgba> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibbles: Vec<u8> = hex.chars().map(nibble).collect();
    match nibbles.as_slice() {
        [r, g, b] => Some(Rgba::opaque(r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some(Rgba::opaque(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn nibble(c: char) -> u8 {
    c.to_digit(16).map_or(0, |d| d as u8)
}
