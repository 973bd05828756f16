//! Properties inspector: the active entity's geometry as the panel shows it,
//! and the sparse update produced when the user edits one field.

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;

use std::str::FromStr;

use crate::doc::{Entity, PartialEntity};

/// Rounded, display-ready properties of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Properties {
    pub left: i64,
    pub top: i64,
    /// Displayed (scaled) width.
    pub width: i64,
    /// Displayed (scaled) height.
    pub height: i64,
    pub angle: i64,
    /// Opacity as a percentage.
    pub opacity: i64,
}

#[allow(clippy::cast_possible_truncation)]
fn round(v: f64) -> i64 {
    v.round() as i64
}

impl Properties {
    #[must_use]
    pub fn of(entity: &Entity) -> Self {
        Self {
            left: round(entity.x),
            top: round(entity.y),
            width: round(entity.display_width()),
            height: round(entity.display_height()),
            angle: round(entity.rotation),
            opacity: round(entity.opacity * 100.0),
        }
    }
}

/// An editable field in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Left,
    Top,
    Width,
    Height,
    Angle,
    Opacity,
}

/// Error for an unknown property name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property: {0}")]
pub struct UnknownProperty(pub String);

impl FromStr for PropertyKey {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "x" => Ok(Self::Left),
            "top" | "y" => Ok(Self::Top),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "angle" | "rotation" => Ok(Self::Angle),
            "opacity" => Ok(Self::Opacity),
            other => Err(UnknownProperty(other.to_string())),
        }
    }
}

/// The update that sets `key` to `value` on `entity`.
///
/// Width and height are displayed sizes, so they change the scale rather than
/// the intrinsic size. Opacity is a percentage clamped to `[0, 100]`.
#[must_use]
pub fn property_update(entity: &Entity, key: PropertyKey, value: f64) -> PartialEntity {
    match key {
        PropertyKey::Left => PartialEntity { x: Some(value), ..Default::default() },
        PropertyKey::Top => PartialEntity { y: Some(value), ..Default::default() },
        PropertyKey::Angle => PartialEntity { rotation: Some(value), ..Default::default() },
        PropertyKey::Opacity => {
            PartialEntity { opacity: Some(value.clamp(0.0, 100.0) / 100.0), ..Default::default() }
        }
        PropertyKey::Width => PartialEntity { scale_x: Some(value / intrinsic(entity.width)), ..Default::default() },
        PropertyKey::Height => PartialEntity { scale_y: Some(value / intrinsic(entity.height)), ..Default::default() },
    }
}

fn intrinsic(size: f64) -> f64 {
    if size == 0.0 { 1.0 } else { size }
}
