use super::*;

fn key(k: &str) -> Key {
    Key::new(k)
}

fn none() -> Modifiers {
    Modifiers::default()
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn meta() -> Modifiers {
    Modifiers { meta: true, ..Default::default() }
}

fn ctrl_shift() -> Modifiers {
    Modifiers { ctrl: true, shift: true, ..Default::default() }
}

fn on_canvas(k: &str, m: Modifiers) -> Option<Shortcut> {
    resolve_shortcut(&key(k), m, FocusTarget::Canvas)
}

// --- Tool state ---

#[test]
fn tool_state_starts_empty() {
    let t = ToolState::default();
    assert_eq!(t.active(), None);
    assert_eq!(t.options(), &serde_json::json!({}));
}

#[test]
fn selecting_active_tool_toggles_off() {
    let mut t = ToolState::default();
    t.select(Tool::Text);
    assert_eq!(t.active(), Some(Tool::Text));
    t.select(Tool::Text);
    assert_eq!(t.active(), None);
}

#[test]
fn selecting_other_tool_switches() {
    let mut t = ToolState::default();
    t.select(Tool::Crop);
    t.select(Tool::Adjust);
    assert_eq!(t.active(), Some(Tool::Adjust));
}

#[test]
fn update_options_merges() {
    let mut t = ToolState::default();
    t.update_options(&serde_json::json!({ "brightness": 10 }));
    t.update_options(&serde_json::json!({ "contrast": 5, "brightness": 20 }));
    assert_eq!(t.options(), &serde_json::json!({ "brightness": 20, "contrast": 5 }));
}

#[test]
fn update_options_ignores_non_objects() {
    let mut t = ToolState::default();
    t.update_options(&serde_json::json!([1, 2]));
    assert_eq!(t.options(), &serde_json::json!({}));
}

#[test]
fn clear_resets_tool_and_options() {
    let mut t = ToolState::default();
    t.select(Tool::Resize);
    t.update_options(&serde_json::json!({ "blur": 3 }));
    t.clear();
    assert_eq!(t, ToolState::default());
}

// --- Command shortcuts ---

#[test]
fn ctrl_z_is_undo() {
    assert_eq!(on_canvas("z", ctrl()), Some(Shortcut::Undo));
}

#[test]
fn ctrl_shift_z_is_redo() {
    assert_eq!(on_canvas("Z", ctrl_shift()), Some(Shortcut::Redo));
}

#[test]
fn ctrl_y_is_redo() {
    assert_eq!(on_canvas("y", ctrl()), Some(Shortcut::Redo));
}

#[test]
fn meta_behaves_like_ctrl() {
    assert_eq!(on_canvas("s", meta()), Some(Shortcut::Save));
    assert_eq!(on_canvas("e", meta()), Some(Shortcut::Export));
}

#[test]
fn clipboard_and_select_all() {
    assert_eq!(on_canvas("c", ctrl()), Some(Shortcut::Copy));
    assert_eq!(on_canvas("v", ctrl()), Some(Shortcut::Paste));
    assert_eq!(on_canvas("a", ctrl()), Some(Shortcut::SelectAll));
}

#[test]
fn unbound_command_key_is_none() {
    assert_eq!(on_canvas("q", ctrl()), None);
}

// --- Single keys ---

#[test]
fn single_key_tools() {
    assert_eq!(on_canvas("v", none()), Some(Shortcut::SelectTool));
    assert_eq!(on_canvas("i", none()), Some(Shortcut::ImageTool));
    assert_eq!(on_canvas("t", none()), Some(Shortcut::TextTool));
    assert_eq!(on_canvas("s", none()), Some(Shortcut::ShapeTool));
    assert_eq!(on_canvas("G", none()), Some(Shortcut::ToggleGrid));
}

#[test]
fn delete_and_backspace_delete() {
    assert_eq!(on_canvas("Delete", none()), Some(Shortcut::Delete));
    assert_eq!(on_canvas("Backspace", none()), Some(Shortcut::Delete));
}

#[test]
fn escape_deselects() {
    assert_eq!(on_canvas("Escape", none()), Some(Shortcut::Deselect));
}

#[test]
fn text_input_focus_suppresses_everything() {
    for (k, m) in [("z", ctrl()), ("Delete", none()), ("g", none())] {
        assert_eq!(resolve_shortcut(&key(k), m, FocusTarget::TextInput), None);
    }
}

// --- Pan trigger ---

#[test]
fn middle_and_secondary_buttons_start_pan() {
    assert!(starts_pan(Button::Middle, none()));
    assert!(starts_pan(Button::Secondary, none()));
}

#[test]
fn shift_primary_starts_pan() {
    assert!(starts_pan(Button::Primary, Modifiers { shift: true, ..Default::default() }));
}

#[test]
fn plain_primary_does_not_pan() {
    assert!(!starts_pan(Button::Primary, none()));
    assert!(!starts_pan(Button::Primary, ctrl()));
}

#[test]
fn input_state_defaults_to_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}
