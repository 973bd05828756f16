//! Input model: tools, modifier keys, mouse buttons, keyboard shortcuts, and
//! the pointer gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of an event.
//! `Shortcut` is the resolved meaning of a key press; [`resolve_shortcut`]
//! is the single place that maps raw keys to it. `InputState` is the gesture
//! being tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Pointer / selection tool.
    Select,
    /// Insert an image from a URL or path.
    Image,
    /// Insert text.
    Text,
    /// Insert a shape.
    Shape,
    /// Image adjustments (brightness, contrast, ...).
    Adjust,
    Crop,
    Resize,
    /// Surface background color.
    Background,
}

/// Active tool plus its free-form options.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    active: Option<Tool>,
    options: serde_json::Value,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { active: None, options: serde_json::json!({}) }
    }
}

impl ToolState {
    /// Activate `tool`, or deactivate it if it is already active.
    pub fn select(&mut self, tool: Tool) {
        self.active = if self.active == Some(tool) { None } else { Some(tool) };
    }

    /// Merge `options` (a JSON object) into the current tool options.
    pub fn update_options(&mut self, options: &serde_json::Value) {
        let Some(incoming) = options.as_object() else {
            return;
        };
        if let Some(existing) = self.options.as_object_mut() {
            for (k, v) in incoming {
                existing.insert(k.clone(), v.clone());
            }
        }
    }

    /// No tool, no options.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn active(&self) -> Option<Tool> {
        self.active
    }

    #[must_use]
    pub fn options(&self) -> &serde_json::Value {
        &self.options
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"z"`, `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Where keyboard focus is when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The canvas or any non-editable chrome.
    #[default]
    Canvas,
    /// A text input or textarea; shortcuts are suppressed.
    TextInput,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Export target requested from the keyboard or toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Png,
}

/// The resolved meaning of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Save,
    Export,
    Copy,
    Paste,
    SelectAll,
    Delete,
    Deselect,
    SelectTool,
    ImageTool,
    TextTool,
    ShapeTool,
    ToggleGrid,
}

/// Map a key press to a shortcut. Returns `None` for unbound keys and for any
/// key pressed while a text input has focus.
#[must_use]
pub fn resolve_shortcut(key: &Key, modifiers: Modifiers, focus: FocusTarget) -> Option<Shortcut> {
    if focus == FocusTarget::TextInput {
        return None;
    }
    let name = key.0.to_lowercase();
    if modifiers.command() {
        return match name.as_str() {
            "z" if modifiers.shift => Some(Shortcut::Redo),
            "z" => Some(Shortcut::Undo),
            "y" => Some(Shortcut::Redo),
            "s" => Some(Shortcut::Save),
            "e" => Some(Shortcut::Export),
            "c" => Some(Shortcut::Copy),
            "v" => Some(Shortcut::Paste),
            "a" => Some(Shortcut::SelectAll),
            _ => None,
        };
    }
    match name.as_str() {
        "v" => Some(Shortcut::SelectTool),
        "i" => Some(Shortcut::ImageTool),
        "t" => Some(Shortcut::TextTool),
        "s" => Some(Shortcut::ShapeTool),
        "g" => Some(Shortcut::ToggleGrid),
        "delete" | "backspace" => Some(Shortcut::Delete),
        "escape" => Some(Shortcut::Deselect),
        _ => None,
    }
}

/// Whether a pointer-down starts a pan gesture: a non-primary button, or primary with Shift held.
#[must_use]
pub fn starts_pan(button: Button, modifiers: Modifiers) -> bool {
    match button {
        Button::Middle | Button::Secondary => true,
        Button::Primary => modifiers.shift,
    }
}

/// Internal state for the pointer gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the viewport.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}
