//! Alignment tools: snap the active entity's displayed box to a surface edge or center line.

#[cfg(test)]
#[path = "align_test.rs"]
mod align_test;

use std::str::FromStr;

use crate::doc::{Entity, PartialEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alignment: {0}")]
pub struct UnknownAlignment(pub String);

impl FromStr for Alignment {
    type Err = UnknownAlignment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" | "center_horizontal" => Ok(Self::CenterHorizontal),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "middle" | "center_vertical" => Ok(Self::CenterVertical),
            "bottom" => Ok(Self::Bottom),
            other => Err(UnknownAlignment(other.to_string())),
        }
    }
}

/// The position update that aligns `entity` on a `surface_w` x `surface_h` surface.
///
/// Only the axis named by `alignment` changes. Rotation is ignored; the
/// unrotated displayed box is what gets aligned.
#[must_use]
pub fn align(entity: &Entity, surface_w: f64, surface_h: f64, alignment: Alignment) -> PartialEntity {
    let b = entity.bounds();
    let (left, top) = match alignment {
        Alignment::Left => (0.0, b.top),
        Alignment::CenterHorizontal => (surface_w / 2.0 - b.width / 2.0, b.top),
        Alignment::Right => (surface_w - b.width, b.top),
        Alignment::Top => (b.left, 0.0),
        Alignment::CenterVertical => (b.left, surface_h / 2.0 - b.height / 2.0),
        Alignment::Bottom => (b.left, surface_h - b.height),
    };
    let mut moved = entity.clone();
    moved.set_bounds_origin(left, top);
    match alignment {
        Alignment::Left | Alignment::CenterHorizontal | Alignment::Right => {
            PartialEntity { x: Some(moved.x), ..Default::default() }
        }
        Alignment::Top | Alignment::CenterVertical | Alignment::Bottom => {
            PartialEntity { y: Some(moved.y), ..Default::default() }
        }
    }
}
