//! Editor engine: the object mutation façade and the input state machine.
//!
//! `EngineCore` owns one session and everything attached to it: the surface,
//! viewport, grid, selection, history, tool state and event bus. Hosts call
//! the façade operations (add, remove, update, undo, zoom, ...) or feed raw
//! input through the `on_*` handlers, then drain [`Action`]s describing what
//! they should do next (redraw, change cursor, save, export).
//!
//! HISTORY RECORDING
//! =================
//! Every mutation emits its surface events and then calls `commit`, which
//! serializes the whole surface into the history tracker. A replay (undo /
//! redo) goes through the same emit-then-commit path, and the tracker refuses
//! the commit because it is `Replaying`. Replay never writes itself into the
//! history it is walking.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use image::RgbaImage;
use rand::Rng;
use tracing::{debug, warn};

use crate::align::{Alignment, align};
use crate::camera::{Camera, Point};
use crate::color::parse_hex;
use crate::consts::{
    DEFAULT_PLACEMENT, IMAGE_INITIAL_SCALE, PASTE_OFFSET, SHAPE_FILL, SHAPE_HEIGHT, SHAPE_STROKE, SHAPE_STROKE_WIDTH,
    SHAPE_WIDTH, TEXT_FILL, TEXT_FONT_SIZE, TEXT_PLACEHOLDER, TEXT_SCATTER_MIN, TEXT_SCATTER_RANGE,
};
use crate::doc::{Entity, EntityId, EntityKind, LoadError, PartialEntity, Surface, SurfaceDocument};
use crate::events::{EventBus, Subscription, SurfaceEvent};
use crate::grid::Grid;
use crate::hit::hit_test;
use crate::history::History;
use crate::input::{
    Button, ExportFormat, FocusTarget, InputState, Key, Modifiers, Shortcut, Tool, ToolState, WheelDelta,
    resolve_shortcut, starts_pan,
};
use crate::layers::{LayerInfo, Restack, layers, restack_target};
use crate::properties::{Properties, PropertyKey, property_update};
use crate::render::{ImageCache, RenderOptions, render};
use crate::selection::Selection;
use crate::session::{InitError, Session, SurfaceConfig};

/// Actions returned to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Redraw the surface.
    RenderNeeded,
    /// Change the pointer cursor (CSS cursor name).
    SetCursor(String),
    /// The user asked to save the project.
    SaveRequested,
    /// The user asked to export the design.
    ExportRequested(ExportFormat),
}

/// Placement options for [`EngineCore::add_entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOptions {
    /// Center the entity's displayed box on the surface.
    pub center: bool,
    /// Queue a redraw after insertion.
    pub render: bool,
    /// Select the entity after insertion.
    pub select: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self { center: false, render: true, select: false }
    }
}

/// A decoded image ready to be placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// URL or path the pixels came from; stored in `props.src`.
    pub src: String,
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
}

/// Core engine state. Everything here runs without a window or browser.
#[derive(Debug, Default)]
pub struct EngineCore {
    session: Session,
    pub camera: Camera,
    pub grid: Grid,
    pub tools: ToolState,
    selection: Selection,
    history: History,
    input: InputState,
    events: EventBus,
    clipboard: Vec<Entity>,
    paste_count: u32,
    images: ImageCache,
    pending: Vec<Action>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Session ---

    /// Create the surface. A second call while a surface exists changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] for a rejected config; the engine stays uninitialized.
    pub fn initialize(&mut self, config: &SurfaceConfig) -> Result<(), InitError> {
        let fresh = !self.session.is_initialized();
        self.session.initialize(config)?;
        if fresh {
            self.reset_history();
            self.pending.push(Action::RenderNeeded);
        }
        Ok(())
    }

    /// Drop the surface and every piece of state attached to it, including all subscriptions.
    pub fn teardown(&mut self) {
        self.session.teardown();
        self.events.clear();
        self.history.clear();
        self.camera.reset();
        self.grid = Grid::default();
        self.selection = Selection::None;
        self.tools.clear();
        self.input = InputState::Idle;
        self.clipboard.clear();
        self.paste_count = 0;
        self.images.clear();
        self.pending.clear();
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_initialized()
    }

    /// Message from the last failed initialization.
    #[must_use]
    pub fn init_error(&self) -> Option<&str> {
        self.session.error()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.session.surface()
    }

    /// Register a listener for surface events. Dropping the handle unregisters it.
    #[must_use]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&SurfaceEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Drain the actions queued since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    // --- Mutation façade ---

    /// Insert an entity. Missing anchors become top-left.
    ///
    /// Returns false when there is no surface.
    pub fn add_entity(&mut self, mut entity: Entity, options: AddOptions) -> bool {
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        entity.normalize_origin();
        if options.center {
            let b = entity.bounds();
            entity.set_bounds_origin((surface.width() - b.width) / 2.0, (surface.height() - b.height) / 2.0);
        }
        let id = entity.id;
        debug!(%id, kind = entity.kind.as_str(), "add entity");
        surface.insert(entity);

        self.emit(&SurfaceEvent::ObjectAdded(id));
        self.commit();
        if options.select {
            let changed = self.selection.set(vec![id]);
            self.selection_changed(changed);
        }
        if options.render {
            self.pending.push(Action::RenderNeeded);
        }
        true
    }

    /// Add a text entity at a random spot and select it. Empty text becomes a placeholder.
    pub fn add_text(&mut self, text: &str) -> Option<EntityId> {
        let content = if text.is_empty() { TEXT_PLACEHOLDER } else { text };
        let mut rng = rand::rng();
        let x = TEXT_SCATTER_MIN + rng.random_range(0.0..TEXT_SCATTER_RANGE);
        let y = TEXT_SCATTER_MIN + rng.random_range(0.0..TEXT_SCATTER_RANGE);
        let entity = Entity::text(content, x, y, TEXT_FONT_SIZE).with_props(serde_json::json!({
            "text": content,
            "font_size": TEXT_FONT_SIZE,
            "fill": TEXT_FILL,
        }));
        let id = entity.id;
        self.add_entity(entity, AddOptions { select: true, ..Default::default() }).then_some(id)
    }

    /// Add a loaded image at the default placement, half size, and select it.
    pub fn add_image(&mut self, source: &ImageSource) -> Option<EntityId> {
        let mut entity = Entity::new(EntityKind::Image, DEFAULT_PLACEMENT, DEFAULT_PLACEMENT, source.width, source.height)
            .with_props(serde_json::json!({ "src": source.src }));
        entity.scale_x = IMAGE_INITIAL_SCALE;
        entity.scale_y = IMAGE_INITIAL_SCALE;
        let id = entity.id;
        self.add_entity(entity, AddOptions { select: true, ..Default::default() }).then_some(id)
    }

    /// Add a filled, stroked shape at the default placement.
    pub fn add_shape(&mut self, kind: EntityKind) -> Option<EntityId> {
        let entity = Entity::new(kind, DEFAULT_PLACEMENT, DEFAULT_PLACEMENT, SHAPE_WIDTH, SHAPE_HEIGHT).with_props(
            serde_json::json!({
                "fill": SHAPE_FILL,
                "stroke": SHAPE_STROKE,
                "stroke_width": SHAPE_STROKE_WIDTH,
            }),
        );
        let id = entity.id;
        self.add_entity(entity, AddOptions::default()).then_some(id)
    }

    /// Remove every selected entity and clear the selection. Returns false if nothing was removed.
    pub fn remove_active(&mut self) -> bool {
        let ids = self.selection.ids();
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        let removed: Vec<EntityId> = ids.into_iter().filter(|id| surface.remove(id).is_some()).collect();
        let changed = self.selection.clear();
        self.selection_changed(changed);
        if removed.is_empty() {
            return false;
        }
        debug!(count = removed.len(), "removed active entities");
        for id in removed {
            self.emit(&SurfaceEvent::ObjectRemoved(id));
        }
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    /// Apply a sparse update to one entity.
    pub fn update_entity(&mut self, id: &EntityId, partial: &PartialEntity) -> bool {
        if partial.is_empty() {
            return false;
        }
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        if !surface.apply_partial(id, partial) {
            return false;
        }
        if partial.locked == Some(true) {
            let changed = self.selection.forget(id);
            self.selection_changed(changed);
        }
        self.emit(&SurfaceEvent::ObjectModified(*id));
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        let Some(surface) = self.session.surface_mut() else {
            return;
        };
        let removed = surface.clear();
        let changed = self.selection.clear();
        self.selection_changed(changed);
        if removed.is_empty() {
            return;
        }
        for id in removed {
            self.emit(&SurfaceEvent::ObjectRemoved(id));
        }
        self.commit();
        self.pending.push(Action::RenderNeeded);
    }

    /// Set the surface background. Returns false for an unparseable color.
    pub fn set_background(&mut self, color: &str) -> bool {
        if parse_hex(color).is_none() {
            warn!(color, "rejected background color");
            return false;
        }
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        surface.set_background(color.trim());
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    /// Serialize the full surface. `None` without a surface.
    #[must_use]
    pub fn export_json(&self) -> Option<String> {
        let surface = self.session.surface()?;
        match surface.to_document().to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "surface serialization failed");
                None
            }
        }
    }

    /// Replace the surface contents with a serialized document and start a fresh history from it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] for malformed input or a missing surface. The surface is left untouched.
    pub fn load_document_json(&mut self, raw: &str) -> Result<(), LoadError> {
        if !self.session.is_initialized() {
            return Err(LoadError::NotInitialized);
        }
        let doc = SurfaceDocument::from_json(raw).inspect_err(|e| warn!(error = %e, "document load failed"))?;
        let changed = self.selection.clear();
        self.selection_changed(changed);
        self.replace_contents(doc);
        self.reset_history();
        self.pending.push(Action::RenderNeeded);
        Ok(())
    }

    // --- Clipboard / selection shortcuts ---

    /// Copy the selected entities. Returns the number copied.
    pub fn copy(&mut self) -> usize {
        let Some(surface) = self.session.surface() else {
            return 0;
        };
        self.clipboard = self.selection.ids().iter().filter_map(|id| surface.get(id).cloned()).collect();
        self.paste_count = 0;
        self.clipboard.len()
    }

    /// Insert copies of the clipboard with fresh ids, offset per paste, and select them.
    pub fn paste(&mut self) -> Vec<EntityId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let Some(surface) = self.session.surface_mut() else {
            return Vec::new();
        };
        self.paste_count += 1;
        let offset = PASTE_OFFSET * f64::from(self.paste_count);
        let mut ids = Vec::with_capacity(self.clipboard.len());
        for original in &self.clipboard {
            let mut copy = original.clone();
            copy.id = uuid::Uuid::new_v4();
            copy.x += offset;
            copy.y += offset;
            copy.locked = false;
            ids.push(copy.id);
            surface.insert(copy);
        }
        for id in &ids {
            self.emit(&SurfaceEvent::ObjectAdded(*id));
        }
        self.commit();
        let changed = self.selection.set(ids.clone());
        self.selection_changed(changed);
        self.pending.push(Action::RenderNeeded);
        ids
    }

    /// Select every visible, unlocked entity.
    pub fn select_all(&mut self) {
        let Some(surface) = self.session.surface() else {
            return;
        };
        let ids = surface.objects().iter().filter(|e| e.visible && !e.locked).map(|e| e.id).collect();
        let changed = self.selection.set(ids);
        self.selection_changed(changed);
    }

    pub fn deselect(&mut self) {
        let changed = self.selection.clear();
        self.selection_changed(changed);
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // --- History ---

    /// Step back one snapshot. Returns false at the baseline.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.begin_undo() else {
            return false;
        };
        let applied = self.replay(&snapshot);
        self.history.finish_replay(applied);
        debug!(cursor = self.history.cursor(), applied, "undo");
        applied
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.begin_redo() else {
            return false;
        };
        let applied = self.replay(&snapshot);
        self.history.finish_replay(applied);
        debug!(cursor = self.history.cursor(), applied, "redo");
        applied
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    fn replay(&mut self, snapshot: &str) -> bool {
        let doc = match SurfaceDocument::from_json(snapshot) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "history snapshot could not be restored");
                return false;
            }
        };
        if !self.session.is_initialized() {
            return false;
        }
        self.replace_contents(doc);
        self.prune_selection();
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    /// Load `doc` onto the surface and emit the add / remove / modify events for the difference.
    fn replace_contents(&mut self, doc: SurfaceDocument) {
        let Some(surface) = self.session.surface_mut() else {
            return;
        };
        let before: Vec<Entity> = surface.objects().to_vec();
        surface.load_document(doc);
        let after: HashSet<EntityId> = surface.ids().into_iter().collect();

        let mut events = Vec::new();
        for old in &before {
            if !after.contains(&old.id) {
                events.push(SurfaceEvent::ObjectRemoved(old.id));
            }
        }
        for new in surface.objects() {
            match before.iter().find(|o| o.id == new.id) {
                None => events.push(SurfaceEvent::ObjectAdded(new.id)),
                Some(old) if old != new => events.push(SurfaceEvent::ObjectModified(new.id)),
                Some(_) => {}
            }
        }
        for event in &events {
            self.emit(event);
        }
    }

    fn prune_selection(&mut self) {
        let Some(surface) = self.session.surface() else {
            return;
        };
        let stale: Vec<EntityId> = self
            .selection
            .ids()
            .into_iter()
            .filter(|id| surface.get(id).is_none_or(|e| e.locked))
            .collect();
        let mut changed = false;
        for id in &stale {
            changed |= self.selection.forget(id);
        }
        self.selection_changed(changed);
    }

    fn reset_history(&mut self) {
        match self.snapshot() {
            Some(baseline) => self.history.reset(baseline),
            None => self.history.clear(),
        }
    }

    fn snapshot(&self) -> Option<String> {
        let surface = self.session.surface()?;
        match surface.to_document().to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "failed to snapshot surface");
                None
            }
        }
    }

    /// Record the current surface. Refused by the tracker while a replay is running.
    fn commit(&mut self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if self.history.record(snapshot) {
            debug!(cursor = self.history.cursor(), len = self.history.len(), "history recorded");
        } else {
            debug!("history recording suppressed during replay");
        }
    }

    // --- Events ---

    fn emit(&self, event: &SurfaceEvent) {
        self.events.emit(event);
    }

    fn selection_changed(&self, changed: bool) {
        if !changed {
            return;
        }
        if self.selection.is_empty() {
            self.emit(&SurfaceEvent::SelectionCleared);
        } else {
            self.emit(&SurfaceEvent::SelectionChanged(self.selection.ids()));
        }
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
        self.pending.push(Action::RenderNeeded);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
        self.pending.push(Action::RenderNeeded);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.camera.zoom_by(delta);
        self.pending.push(Action::RenderNeeded);
    }

    pub fn zoom_to(&mut self, level: f64) {
        self.camera.zoom_to(level);
        self.pending.push(Action::RenderNeeded);
    }

    pub fn zoom_to_pointer(&mut self, pointer_x: f64, pointer_y: f64, factor: f64) {
        self.camera.zoom_to_pointer(pointer_x, pointer_y, factor);
        self.pending.push(Action::RenderNeeded);
    }

    /// Zoom 1, no pan.
    pub fn reset_viewport(&mut self) {
        self.camera.reset();
        self.pending.push(Action::RenderNeeded);
    }

    // --- Grid ---

    pub fn toggle_grid(&mut self) {
        self.grid.toggle();
        self.pending.push(Action::RenderNeeded);
    }

    pub fn grid_larger(&mut self) {
        self.grid.increase();
        self.pending.push(Action::RenderNeeded);
    }

    pub fn grid_smaller(&mut self) {
        self.grid.decrease();
        self.pending.push(Action::RenderNeeded);
    }

    pub fn set_grid_pitch(&mut self, pitch: f64) {
        self.grid.set_pitch(pitch);
        self.pending.push(Action::RenderNeeded);
    }

    // --- Layers ---

    /// Layers panel listing, topmost first. Empty without a surface.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.session.surface().map(layers).unwrap_or_default()
    }

    pub fn toggle_visibility(&mut self, id: &EntityId) -> bool {
        let Some(visible) = self.session.surface().and_then(|s| s.get(id)).map(|e| e.visible) else {
            return false;
        };
        self.update_entity(id, &PartialEntity { visible: Some(!visible), ..Default::default() })
    }

    /// Flip the lock flag. Locking also drops the entity from the selection.
    pub fn toggle_lock(&mut self, id: &EntityId) -> bool {
        let Some(locked) = self.session.surface().and_then(|s| s.get(id)).map(|e| e.locked) else {
            return false;
        };
        self.update_entity(id, &PartialEntity { locked: Some(!locked), ..Default::default() })
    }

    pub fn delete_layer(&mut self, id: &EntityId) -> bool {
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        if surface.remove(id).is_none() {
            return false;
        }
        let changed = self.selection.forget(id);
        self.selection_changed(changed);
        self.emit(&SurfaceEvent::ObjectRemoved(*id));
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    /// Make `id` the single selection. Locked and missing entities are ignored.
    pub fn select_layer(&mut self, id: &EntityId) -> bool {
        let Some(entity) = self.session.surface().and_then(|s| s.get(id)) else {
            return false;
        };
        if entity.locked {
            return false;
        }
        let changed = self.selection.click(Some(entity));
        self.selection_changed(changed);
        changed
    }

    pub fn bring_forward(&mut self, id: &EntityId) -> bool {
        self.restack(id, Restack::Forward)
    }

    pub fn send_backward(&mut self, id: &EntityId) -> bool {
        self.restack(id, Restack::Backward)
    }

    pub fn bring_to_front(&mut self, id: &EntityId) -> bool {
        self.restack(id, Restack::ToFront)
    }

    pub fn send_to_back(&mut self, id: &EntityId) -> bool {
        self.restack(id, Restack::ToBack)
    }

    fn restack(&mut self, id: &EntityId, op: Restack) -> bool {
        let Some(surface) = self.session.surface_mut() else {
            return false;
        };
        let Some(to) = restack_target(surface, id, op) else {
            return false;
        };
        if !surface.move_to(id, to) {
            return false;
        }
        self.emit(&SurfaceEvent::ObjectModified(*id));
        self.commit();
        self.pending.push(Action::RenderNeeded);
        true
    }

    // --- Properties / alignment ---

    /// The single active entity, if exactly one is selected.
    #[must_use]
    pub fn active(&self) -> Option<&Entity> {
        let id = self.selection.single()?;
        self.session.surface()?.get(&id)
    }

    /// Properties panel values for the active entity.
    #[must_use]
    pub fn active_properties(&self) -> Option<Properties> {
        self.active().map(Properties::of)
    }

    /// Edit one field of the active entity.
    pub fn set_property(&mut self, key: PropertyKey, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let Some(entity) = self.active() else {
            return false;
        };
        let (id, partial) = (entity.id, property_update(entity, key, value));
        self.update_entity(&id, &partial)
    }

    /// Align the active entity to the surface.
    pub fn align_active(&mut self, alignment: Alignment) -> bool {
        let Some(surface) = self.session.surface() else {
            return false;
        };
        let Some(entity) = self.active() else {
            return false;
        };
        let (id, partial) = (entity.id, align(entity, surface.width(), surface.height(), alignment));
        self.update_entity(&id, &partial)
    }

    // --- Tools ---

    /// Activate a tool, or deactivate it if it is already active.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.select(tool);
    }

    // --- Rendering ---

    /// Make decoded pixels available to the renderer for entities whose `src` matches.
    pub fn register_image(&mut self, src: impl Into<String>, pixels: RgbaImage) {
        self.images.insert(src.into(), pixels);
    }

    /// Draw the surface and grid at `scale`. Emits `AfterRender`.
    #[must_use]
    pub fn render(&self, scale: f64) -> Option<RgbaImage> {
        let surface = self.session.surface()?;
        let options = RenderOptions { scale, images: Some(&self.images) };
        let img = render(surface, &self.grid, &options);
        self.emit(&SurfaceEvent::AfterRender);
        Some(img)
    }

    // --- Input ---

    /// Begin a pan, or run a click against the topmost entity under the pointer.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if starts_pan(button, modifiers) {
            self.input = InputState::Panning { last_screen: screen_pt };
            self.pending.push(Action::SetCursor("grabbing".into()));
            return self.take_actions();
        }
        if button != Button::Primary {
            return self.take_actions();
        }

        let world = self.camera.screen_to_world(screen_pt);
        let Some(surface) = self.session.surface() else {
            return self.take_actions();
        };
        let target = hit_test(world, surface).and_then(|id| surface.get(&id));
        let changed = if modifiers.command() {
            match target {
                Some(entity) => self.selection.modifier_click(entity),
                None => false,
            }
        } else {
            self.selection.click(target)
        };
        self.selection_changed(changed);
        if changed {
            self.pending.push(Action::RenderNeeded);
        }
        self.take_actions()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if let InputState::Panning { last_screen } = self.input {
            self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
            self.input = InputState::Panning { last_screen: screen_pt };
            self.pending.push(Action::RenderNeeded);
        }
        self.take_actions()
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if matches!(self.input, InputState::Panning { .. }) {
            self.input = InputState::Idle;
            self.pending.push(Action::SetCursor("default".into()));
        }
        self.take_actions()
    }

    /// Wheel zoom anchored at the pointer.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        self.camera.zoom_wheel(screen_pt, delta.dy);
        self.pending.push(Action::RenderNeeded);
        self.take_actions()
    }

    /// Run the shortcut bound to a key press, if any.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, focus: FocusTarget) -> Vec<Action> {
        let Some(shortcut) = resolve_shortcut(key, modifiers, focus) else {
            return self.take_actions();
        };
        debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Save => self.pending.push(Action::SaveRequested),
            Shortcut::Export => self.pending.push(Action::ExportRequested(ExportFormat::Png)),
            Shortcut::Copy => {
                self.copy();
            }
            Shortcut::Paste => {
                self.paste();
            }
            Shortcut::SelectAll => self.select_all(),
            Shortcut::Delete => {
                self.remove_active();
            }
            Shortcut::Deselect => self.deselect(),
            Shortcut::SelectTool => self.set_tool(Tool::Select),
            Shortcut::ImageTool => self.set_tool(Tool::Image),
            Shortcut::TextTool => self.set_tool(Tool::Text),
            Shortcut::ShapeTool => self.set_tool(Tool::Shape),
            Shortcut::ToggleGrid => self.toggle_grid(),
        }
        self.take_actions()
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }
}
