//! Document model: drawable entities, their properties, and the surface that owns them.
//!
//! This module defines the core data types that describe what is on the canvas
//! (`Entity`, `EntityKind`), a sparse-update type for incremental edits
//! (`PartialEntity`), a typed accessor for the open-ended `props` JSON bag
//! (`Props`), the mutable `Surface` that owns all live entities, and the
//! serialized `SurfaceDocument` used for history snapshots and export.
//!
//! Entities are kept in insertion order; that order is the stacking order
//! (bottom first). The renderer and the layers inspector both read it directly.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{TEXT_ADVANCE_RATIO, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT};
use crate::session::{InitError, validate_surface};

/// Unique identifier for a drawable entity.
pub type EntityId = Uuid;

/// Current version tag written into serialized documents.
pub const DOCUMENT_VERSION: &str = "1";

/// Error returned when a serialized surface cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The payload is not a valid surface document.
    #[error("failed to parse surface document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document declares a version this build cannot read.
    #[error("unsupported document version: {0}")]
    UnsupportedVersion(String),
    /// There is no surface to load into.
    #[error("surface is not initialized")]
    NotInitialized,
    /// The document's dimensions or background are unusable.
    #[error("invalid surface in document: {0}")]
    InvalidSurface(#[source] InitError),
    /// The project carries no saved canvas state.
    #[error("project has no saved canvas state")]
    EmptyProject,
}

/// The kind of a drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Axis-aligned rectangle (before rotation).
    Rect,
    /// Ellipse inscribed within the bounding box.
    Ellipse,
    /// Isosceles triangle with its apex at the top-center of the box.
    Triangle,
    /// Single- or multi-line text; the string lives in `props.text`.
    Text,
    /// Raster image; the source lives in `props.src`.
    Image,
}

impl EntityKind {
    /// Lowercase name used for default layer names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

/// Horizontal placement anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    Left,
    Center,
    Right,
}

impl OriginX {
    /// Fraction of the displayed width between the box's left edge and the anchor.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Vertical placement anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    Top,
    Center,
    Bottom,
}

impl OriginY {
    /// Fraction of the displayed height between the box's top edge and the anchor.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

fn default_one() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_props() -> serde_json::Value {
    serde_json::json!({})
}

/// A drawable entity as stored on the surface and in serialized documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// Shape, text, or image.
    pub kind: EntityKind,
    /// Layer display name. Falls back to `"<kind> <n>"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Anchor x in surface coordinates.
    pub x: f64,
    /// Anchor y in surface coordinates.
    pub y: f64,
    /// Horizontal anchor. `None` until normalized by the mutation façade.
    #[serde(default)]
    pub origin_x: Option<OriginX>,
    /// Vertical anchor. `None` until normalized by the mutation façade.
    #[serde(default)]
    pub origin_y: Option<OriginY>,
    /// Intrinsic width before scaling.
    pub width: f64,
    /// Intrinsic height before scaling.
    pub height: f64,
    #[serde(default = "default_one")]
    pub scale_x: f64,
    #[serde(default = "default_one")]
    pub scale_y: f64,
    /// Clockwise rotation in degrees around the anchor point.
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked entities are drawn but can never become selection targets.
    #[serde(default)]
    pub locked: bool,
    /// Open-ended per-kind properties (fill, stroke, text, src, etc.).
    #[serde(default = "default_props")]
    pub props: serde_json::Value,
}

/// Axis-aligned box in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Entity {
    /// Create an entity with a fresh id, unit scale, full opacity and no anchors set.
    #[must_use]
    pub fn new(kind: EntityKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: None,
            x,
            y,
            origin_x: None,
            origin_y: None,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            props: default_props(),
        }
    }

    /// Create a text entity sized from its content and font size.
    #[must_use]
    pub fn text(content: &str, x: f64, y: f64, font_size: f64) -> Self {
        let (width, height) = measure_text(content, font_size);
        let mut entity = Self::new(EntityKind::Text, x, y, width, height);
        entity.props = serde_json::json!({ "text": content, "font_size": font_size });
        entity
    }

    /// Builder-style props replacement.
    #[must_use]
    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }

    /// Width after scaling.
    #[must_use]
    pub fn display_width(&self) -> f64 {
        self.width * self.scale_x
    }

    /// Height after scaling.
    #[must_use]
    pub fn display_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Fill in missing anchors with top-left. Returns true if anything changed.
    pub fn normalize_origin(&mut self) -> bool {
        let mut changed = false;
        if self.origin_x.is_none() {
            self.origin_x = Some(OriginX::Left);
            changed = true;
        }
        if self.origin_y.is_none() {
            self.origin_y = Some(OriginY::Top);
            changed = true;
        }
        changed
    }

    /// Unrotated displayed box, with the anchor taken into account.
    ///
    /// Unset anchors are read as top-left.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let w = self.display_width();
        let h = self.display_height();
        let fx = self.origin_x.map_or(0.0, OriginX::factor);
        let fy = self.origin_y.map_or(0.0, OriginY::factor);
        Bounds { left: self.x - fx * w, top: self.y - fy * h, width: w, height: h }
    }

    /// Move the entity so its unrotated displayed box has its top-left corner at `(left, top)`.
    pub fn set_bounds_origin(&mut self, left: f64, top: f64) {
        let b = self.bounds();
        self.x += left - b.left;
        self.y += top - b.top;
    }

    /// Display name for layer listings, given the entity's stacking index.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.kind.as_str(), index + 1),
        }
    }
}

/// Approximate text metrics: `(width, height)` for `content` at `font_size`.
///
/// Width follows the longest line at a fixed advance per character. There is
/// no font engine behind this; it only needs to be stable for hit-testing and
/// raster export.
#[must_use]
pub fn measure_text(content: &str, font_size: f64) -> (f64, f64) {
    let lines: Vec<&str> = content.split('\n').collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let width = longest as f64 * font_size * TEXT_ADVANCE_RATIO;
    #[allow(clippy::cast_precision_loss)]
    let height = lines.len() as f64 * font_size * TEXT_LINE_HEIGHT;
    (width, height)
}

/// Sparse update for an entity. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_x: Option<OriginX>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_y: Option<OriginY>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// Props keys to merge or remove (null values delete keys).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

impl PartialEntity {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Typed access to common props fields from an `Entity.props` JSON value.
pub struct Props<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Props<'a> {
    /// Wrap a reference to a `props` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Fill color as a CSS hex string. Defaults to `"#D94B4B"` when absent.
    #[must_use]
    pub fn fill(&self) -> &str {
        self.str_or("fill", "#D94B4B")
    }

    /// Stroke color as a CSS hex string. Defaults to `"#1F1A17"` when absent.
    #[must_use]
    pub fn stroke(&self) -> &str {
        self.str_or("stroke", "#1F1A17")
    }

    /// Stroke width in surface units. Defaults to `1.0` when absent.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.value
            .get("stroke_width")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0)
    }

    /// Text content. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.str_or("text", "")
    }

    /// Font size. Defaults to `32.0` when absent.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.value
            .get("font_size")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(TEXT_FONT_SIZE)
    }

    /// Image source (URL or path). Empty string when absent.
    #[must_use]
    pub fn src(&self) -> &str {
        self.str_or("src", "")
    }

    fn str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }
}

/// Serialized full-surface state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDocument {
    pub version: String,
    pub width: f64,
    pub height: f64,
    pub background: String,
    #[serde(default)]
    pub objects: Vec<Entity>,
}

impl SurfaceDocument {
    /// Parse a serialized document, rejecting unknown versions.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed JSON and
    /// [`LoadError::UnsupportedVersion`] for documents from another format revision,
    /// and [`LoadError::InvalidSurface`] for sizes or backgrounds a session would refuse.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let doc: Self = serde_json::from_str(raw)?;
        if doc.version != DOCUMENT_VERSION {
            return Err(LoadError::UnsupportedVersion(doc.version));
        }
        validate_surface(doc.width, doc.height, &doc.background).map_err(LoadError::InvalidSurface)?;
        Ok(doc)
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if a `props` value cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The mutable canvas state: ordered entities, background, and pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: f64,
    height: f64,
    background: String,
    objects: Vec<Entity>,
}

impl Surface {
    /// Create an empty surface. Dimensions and background are validated by the session manager.
    #[must_use]
    pub fn new(width: f64, height: f64, background: impl Into<String>) -> Self {
        Self { width, height, background: background.into(), objects: Vec::new() }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        self.background = background.into();
    }

    /// Append an entity on top of the stack. An entity with the same id is replaced in place.
    pub fn insert(&mut self, obj: Entity) {
        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == obj.id) {
            *existing = obj;
        } else {
            self.objects.push(obj);
        }
    }

    /// Remove an entity by id, returning it if it was present.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        Some(self.objects.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    /// Stacking index of an entity (0 = bottom).
    #[must_use]
    pub fn index_of(&self, id: &EntityId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    /// Entities in stacking order, bottom first.
    #[must_use]
    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    /// Ids in stacking order, bottom first.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    /// Apply a partial update to an existing entity. Returns false if the entity doesn't exist
    /// or the props patch is not a JSON object.
    pub fn apply_partial(&mut self, id: &EntityId, partial: &PartialEntity) -> bool {
        if partial.props.as_ref().is_some_and(|p| !p.is_object()) {
            return false;
        }
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if let Some(ref name) = partial.name {
            obj.name = Some(name.clone());
        }
        if let Some(x) = partial.x {
            obj.x = x;
        }
        if let Some(y) = partial.y {
            obj.y = y;
        }
        if let Some(ox) = partial.origin_x {
            obj.origin_x = Some(ox);
        }
        if let Some(oy) = partial.origin_y {
            obj.origin_y = Some(oy);
        }
        if let Some(w) = partial.width {
            obj.width = w;
        }
        if let Some(h) = partial.height {
            obj.height = h;
        }
        if let Some(sx) = partial.scale_x {
            obj.scale_x = sx;
        }
        if let Some(sy) = partial.scale_y {
            obj.scale_y = sy;
        }
        if let Some(r) = partial.rotation {
            obj.rotation = r;
        }
        if let Some(o) = partial.opacity {
            obj.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(v) = partial.visible {
            obj.visible = v;
        }
        if let Some(l) = partial.locked {
            obj.locked = l;
        }
        if let Some(incoming) = partial.props.as_ref().and_then(serde_json::Value::as_object) {
            if !obj.props.is_object() {
                obj.props = default_props();
            }

            if let Some(existing) = obj.props.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }

    /// Move an entity to a new stacking index, clamped to the valid range.
    /// Returns false if the entity doesn't exist or is already there.
    pub fn move_to(&mut self, id: &EntityId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let to = index.min(self.objects.len().saturating_sub(1));
        if from == to {
            return false;
        }
        let obj = self.objects.remove(from);
        self.objects.insert(to, obj);
        true
    }

    /// Remove every entity, returning the removed ids in stacking order.
    pub fn clear(&mut self) -> Vec<EntityId> {
        self.objects.drain(..).map(|o| o.id).collect()
    }

    /// Snapshot the full surface.
    #[must_use]
    pub fn to_document(&self) -> SurfaceDocument {
        SurfaceDocument {
            version: DOCUMENT_VERSION.to_string(),
            width: self.width,
            height: self.height,
            background: self.background.clone(),
            objects: self.objects.clone(),
        }
    }

    /// Replace dimensions, background and contents from a document.
    pub fn load_document(&mut self, doc: SurfaceDocument) {
        self.width = doc.width;
        self.height = doc.height;
        self.background = doc.background;
        self.objects = doc.objects;
    }

    /// Number of entities on the surface.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the surface holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
