//! Selection coordinator: single vs. multi-entity selection.
//!
//! A plain click replaces the selection. A modifier click (Ctrl / Cmd) edits
//! it in place:
//!
//! | Current | Target | Result |
//! |---------|--------|--------|
//! | none | any | `Single(target)` |
//! | `Single(a)` | `a` | unchanged |
//! | `Single(a)` | `b` | `Multi([a, b])` |
//! | `Multi(m)` | member | member removed; `None` when empty |
//! | `Multi(m)` | non-member | target appended |
//!
//! Locked entities never become targets.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::doc::{Entity, EntityId};

/// The active selection on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Single(EntityId),
    /// Multi-selection group, in the order members were added.
    Multi(Vec<EntityId>),
}

impl Selection {
    /// Replace the selection with `target`, or clear it when there is no target.
    ///
    /// A locked target clears the selection. Returns true if the selection changed.
    pub fn click(&mut self, target: Option<&Entity>) -> bool {
        let next = match target {
            Some(e) if !e.locked => Self::Single(e.id),
            _ => Self::None,
        };
        self.replace(next)
    }

    /// Toggle `target` in or out of the selection. Returns true if the selection changed.
    pub fn modifier_click(&mut self, target: &Entity) -> bool {
        if target.locked {
            return false;
        }
        let id = target.id;
        let next = match self {
            Self::None => Self::Single(id),
            Self::Single(current) if *current == id => return false,
            Self::Single(current) => Self::Multi(vec![*current, id]),
            Self::Multi(members) => {
                let mut members = members.clone();
                if let Some(pos) = members.iter().position(|m| *m == id) {
                    members.remove(pos);
                    if members.is_empty() { Self::None } else { Self::Multi(members) }
                } else {
                    members.push(id);
                    Self::Multi(members)
                }
            }
        };
        self.replace(next)
    }

    /// Select exactly these ids: none, one, or a group.
    pub fn set(&mut self, ids: Vec<EntityId>) -> bool {
        let next = match ids.as_slice() {
            [] => Self::None,
            [only] => Self::Single(*only),
            _ => Self::Multi(ids),
        };
        self.replace(next)
    }

    /// Clear the selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        self.replace(Self::None)
    }

    /// Drop `id` from the selection, e.g. after it was removed or locked.
    pub fn forget(&mut self, id: &EntityId) -> bool {
        match self {
            Self::Single(current) if current == id => self.replace(Self::None),
            Self::Multi(members) if members.contains(id) => {
                let members: Vec<EntityId> = members.iter().copied().filter(|m| m != id).collect();
                let next = if members.is_empty() { Self::None } else { Self::Multi(members) };
                self.replace(next)
            }
            _ => false,
        }
    }

    fn replace(&mut self, next: Self) -> bool {
        if *self == next {
            return false;
        }
        *self = next;
        true
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        match self {
            Self::None => Vec::new(),
            Self::Single(id) => vec![*id],
            Self::Multi(members) => members.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        match self {
            Self::None => false,
            Self::Single(current) => current == id,
            Self::Multi(members) => members.contains(id),
        }
    }

    /// The single active entity, if exactly one is selected outside a group.
    #[must_use]
    pub fn single(&self) -> Option<EntityId> {
        match self {
            Self::Single(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Multi(members) => members.len(),
        }
    }
}
