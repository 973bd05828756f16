//! Layers inspector: a read-only listing of the surface's stacking order.
//!
//! The listing is topmost-first, the way a layers panel shows it. The
//! write side (visibility, lock, delete, restack) lives on the engine so
//! every change goes through history and events.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use crate::doc::{EntityId, EntityKind, Surface};

/// One row of the layers panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub visible: bool,
    pub locked: bool,
}

/// All layers, topmost first.
#[must_use]
pub fn layers(surface: &Surface) -> Vec<LayerInfo> {
    surface
        .objects()
        .iter()
        .enumerate()
        .rev()
        .map(|(index, e)| LayerInfo {
            id: e.id,
            name: e.display_name(index),
            kind: e.kind,
            visible: e.visible,
            locked: e.locked,
        })
        .collect()
}

/// Restacking moves offered by the layers panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restack {
    Forward,
    Backward,
    ToFront,
    ToBack,
}

/// Target stacking index for `id` under `op`, or `None` if it is absent or already in place.
#[must_use]
pub fn restack_target(surface: &Surface, id: &EntityId, op: Restack) -> Option<usize> {
    let from = surface.index_of(id)?;
    let top = surface.len().saturating_sub(1);
    let to = match op {
        Restack::Forward => (from + 1).min(top),
        Restack::Backward => from.saturating_sub(1),
        Restack::ToFront => top,
        Restack::ToBack => 0,
    };
    (to != from).then_some(to)
}
