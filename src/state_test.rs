use super::*;

#[test]
fn new_project_has_no_state() {
    let project = EditorProject::new("poster", 800.0, 600.0, "#ffffff");
    assert_eq!(project.name, "poster");
    assert!(project.canvas_state.is_none());
    assert_eq!(project.created_at, project.updated_at);
}

#[test]
fn context_starts_empty() {
    let ctx = EditorContext::new();
    assert!(ctx.project().is_none());
    assert!(ctx.processing_message().is_none());
}

#[test]
fn touch_without_project_is_refused() {
    let mut ctx = EditorContext::new();
    assert!(!ctx.touch_project("{}".into()));
}

#[test]
fn touch_stores_state_and_keeps_updated_monotonic() {
    let mut ctx = EditorContext::new();
    let mut project = EditorProject::new("p", 100.0, 100.0, "#000");
    project.updated_at = u64::MAX - 1;
    ctx.set_project(Some(project));

    assert!(ctx.touch_project("{\"version\":\"1\"}".into()));
    let project = ctx.project().cloned().unwrap();
    assert_eq!(project.canvas_state.as_deref(), Some("{\"version\":\"1\"}"));
    assert_eq!(project.updated_at, u64::MAX - 1);
}

#[test]
fn processing_message_round_trips() {
    let mut ctx = EditorContext::new();
    ctx.set_processing_message(Some("Exporting".into()));
    assert_eq!(ctx.processing_message(), Some("Exporting"));
    ctx.set_processing_message(None);
    assert!(ctx.processing_message().is_none());
}

#[test]
fn project_serializes_without_state() {
    let raw = r##"{"id":"7d2f1f0e-3a43-4c0e-9b57-1c1f3a0d2e11","name":"x","width":10.0,"height":20.0,
        "background":"#fff","created_at":1,"updated_at":2}"##;
    let project: EditorProject = serde_json::from_str(raw).unwrap();
    assert!(project.canvas_state.is_none());
    assert_eq!(project.updated_at, 2);
}
