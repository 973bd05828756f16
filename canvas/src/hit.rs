//! Hit-testing: the topmost visible entity under a surface point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Entity, EntityId, Surface};

/// Rotate `pt` by `-deg` degrees around `pivot`, mapping it into the entity's unrotated frame.
#[must_use]
pub fn unrotate(pt: Point, pivot: Point, deg: f64) -> Point {
    if deg == 0.0 {
        return pt;
    }
    let (sin, cos) = (-deg).to_radians().sin_cos();
    let dx = pt.x - pivot.x;
    let dy = pt.y - pivot.y;
    Point { x: pivot.x + dx * cos - dy * sin, y: pivot.y + dx * sin + dy * cos }
}

/// Whether a surface point falls inside the entity's rotated displayed box.
#[must_use]
pub fn contains(entity: &Entity, world_pt: Point) -> bool {
    let local = unrotate(world_pt, Point::new(entity.x, entity.y), entity.rotation);
    let b = entity.bounds();
    let (x0, x1) = ordered(b.left, b.left + b.width);
    let (y0, y1) = ordered(b.top, b.top + b.height);
    local.x >= x0 && local.x <= x1 && local.y >= y0 && local.y <= y1
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Topmost visible entity under `world_pt`, if any.
///
/// Locked entities are still returned; whether they may be selected is the
/// selection coordinator's call.
#[must_use]
pub fn hit_test(world_pt: Point, surface: &Surface) -> Option<EntityId> {
    surface
        .objects()
        .iter()
        .rev()
        .find(|e| e.visible && contains(e, world_pt))
        .map(|e| e.id)
}
