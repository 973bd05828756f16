//! Surface events and subscription handles.
//!
//! Listeners register with [`EventBus::subscribe`] and receive every
//! [`SurfaceEvent`] emitted afterwards. The returned [`Subscription`] owns
//! the registration: dropping it unregisters the listener, so a panel that
//! goes away (or a code path that bails out early) can never leave a
//! dangling callback behind.
//!
//! Everything here is single-threaded. Listeners may subscribe, or drop
//! their own handle, while an event is being delivered; the bus snapshots
//! the listener list before calling out.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::doc::EntityId;

/// Something that happened on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    ObjectAdded(EntityId),
    ObjectRemoved(EntityId),
    ObjectModified(EntityId),
    /// Selection now holds exactly these ids (non-empty).
    SelectionChanged(Vec<EntityId>),
    SelectionCleared,
    /// A render pass finished; overlays draw here.
    AfterRender,
}

type Listener = Rc<RefCell<dyn FnMut(&SurfaceEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Dispatches surface events to registered listeners.
#[derive(Default, Clone)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listener_count()).finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered until the returned handle is dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&SurfaceEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(RefCell::new(listener))));
        Subscription { id, registry: Rc::downgrade(&self.registry) }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// A listener that is already running (an emit from inside its own
    /// callback) is skipped for the nested event rather than re-entered.
    pub fn emit(&self, event: &SurfaceEvent) {
        let snapshot: Vec<(u64, Listener)> = self.registry.borrow().listeners.clone();
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            let Ok(mut callback) = listener.try_borrow_mut() else {
                continue;
            };
            (*callback)(event);
        }
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry.borrow().listeners.iter().any(|(l, _)| *l == id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Unregister every listener. Outstanding handles become inert.
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

/// Registration handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle unregisters the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Whether the listener is still registered with a live bus.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().listeners.iter().any(|(l, _)| *l == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if let Ok(mut registry) = registry.try_borrow_mut() {
            registry.listeners.retain(|(l, _)| *l != self.id);
        }
    }
}
