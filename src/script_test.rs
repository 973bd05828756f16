use super::*;

use canvas::doc::Props;
use canvas::session::SurfaceConfig;
use image::RgbaImage;
use uuid::Uuid;

struct Fixture {
    engine: EngineCore,
    ctx: EditorContext,
    config: EditorConfig,
}

impl Fixture {
    fn new() -> Self {
        let out_dir = std::env::temp_dir().join(format!("designer-script-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&out_dir).unwrap();
        let config = EditorConfig { out_dir, ..EditorConfig::default() };
        let mut engine = EngineCore::new();
        engine.initialize(&SurfaceConfig::new(800.0, 600.0)).unwrap();
        Self { engine, ctx: EditorContext::new(), config }
    }

    async fn run(&mut self, raw: &str) -> Result<RunReport, ScriptError> {
        let commands = parse_script(raw)?;
        ScriptRunner::new(&mut self.engine, &mut self.ctx, &self.config, reqwest::Client::new()).run(commands).await
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.config.out_dir) {
            eprintln!("cleanup failed: {e}");
        }
    }
}

#[test]
fn parses_tagged_commands() {
    let commands = parse_script(
        r#"[
            {"op": "add_shape", "shape": "ellipse"},
            {"op": "click", "x": 1, "y": 2, "held": {"shift": true}},
            {"op": "key", "key": "z", "held": {"ctrl": true}},
            {"op": "delete"},
            {"op": "export", "format": "png"}
        ]"#,
    )
    .unwrap();
    assert_eq!(commands[0], Command::AddShape { shape: EntityKind::Ellipse });
    assert_eq!(commands[1], Command::Click { x: 1.0, y: 2.0, held: Held { shift: true, ..Held::default() } });
    assert_eq!(commands[3], Command::Delete { layer: None });
    assert_eq!(commands[4].name(), "export");
}

#[test]
fn unknown_op_is_a_parse_error() {
    assert!(matches!(parse_script(r#"[{"op": "explode"}]"#), Err(ScriptError::Parse(_))));
}

#[tokio::test]
async fn click_then_edit_properties_and_align() {
    let mut f = Fixture::new();
    let report = f
        .run(
            r#"[
                {"op": "add_shape", "shape": "rect"},
                {"op": "click", "x": 150, "y": 150},
                {"op": "set_property", "key": "top", "value": 40},
                {"op": "align", "to": "right"}
            ]"#,
        )
        .await
        .unwrap();
    assert_eq!(report.steps, 4);
    let props = f.engine.active_properties().unwrap();
    assert_eq!(props.left, 600);
    assert_eq!(props.top, 40);
}

#[tokio::test]
async fn keyboard_undo_and_redo() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "add_shape", "shape": "rect"},
            {"op": "add_shape", "shape": "triangle"},
            {"op": "key", "key": "z", "held": {"ctrl": true}}
        ]"#,
    )
    .await
    .unwrap();
    assert_eq!(f.engine.surface().unwrap().len(), 1);

    f.run(r#"[{"op": "key", "key": "z", "held": {"ctrl": true, "shift": true}}]"#).await.unwrap();
    assert_eq!(f.engine.surface().unwrap().len(), 2);
}

#[tokio::test]
async fn keys_typed_into_text_fields_do_nothing() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "add_shape", "shape": "rect"},
            {"op": "key", "key": "z", "held": {"ctrl": true}, "in_text_field": true}
        ]"#,
    )
    .await
    .unwrap();
    assert_eq!(f.engine.surface().unwrap().len(), 1);
}

#[tokio::test]
async fn save_shortcut_stores_project_on_context() {
    let mut f = Fixture::new();
    let report = f
        .run(
            r#"[
                {"op": "add_text", "text": "hello"},
                {"op": "key", "key": "s", "held": {"meta": true}}
            ]"#,
        )
        .await
        .unwrap();
    assert_eq!(report.saves, 1);
    let project = f.ctx.project().unwrap();
    assert!(project.canvas_state.as_deref().unwrap().contains("hello"));
    assert!(f.ctx.processing_message().is_none());
}

#[tokio::test]
async fn exports_write_files_to_out_dir() {
    let mut f = Fixture::new();
    let report = f
        .run(
            r#"[
                {"op": "add_shape", "shape": "rect"},
                {"op": "export", "format": "json"},
                {"op": "key", "key": "e", "held": {"ctrl": true}}
            ]"#,
        )
        .await
        .unwrap();
    assert_eq!(report.exports.len(), 2);
    assert!(report.exports[0].extension().is_some_and(|e| e == "json"));
    assert!(report.exports[1].extension().is_some_and(|e| e == "png"));
    for path in &report.exports {
        assert!(path.starts_with(&f.config.out_dir));
        assert!(path.exists());
    }
    let png = image::open(&report.exports[1]).unwrap();
    assert_eq!((png.width(), png.height()), (1600, 1200));
}

#[tokio::test]
async fn unknown_property_stops_at_its_step() {
    let mut f = Fixture::new();
    let err = f
        .run(
            r#"[
                {"op": "add_shape", "shape": "rect"},
                {"op": "set_property", "key": "skew", "value": 3},
                {"op": "add_shape", "shape": "rect"}
            ]"#,
        )
        .await
        .unwrap_err();
    match err {
        ScriptError::Step { step, op, source } => {
            assert_eq!(step, 1);
            assert_eq!(op, "set_property");
            assert!(matches!(*source, ScriptError::UnknownProperty(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(f.engine.surface().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_layer_row_is_reported() {
    let mut f = Fixture::new();
    let err = f.run(r#"[{"op": "toggle_lock", "layer": 0}]"#).await.unwrap_err();
    assert!(matches!(err, ScriptError::Step { source, .. } if matches!(*source, ScriptError::NoSuchLayer(0))));
}

#[tokio::test]
async fn declined_operations_are_no_ops() {
    let mut f = Fixture::new();
    let report = f
        .run(
            r#"[
                {"op": "undo"},
                {"op": "align", "to": "center"},
                {"op": "set_property", "key": "width", "value": 10},
                {"op": "delete"}
            ]"#,
        )
        .await
        .unwrap();
    assert_eq!(report.steps, 4);
    assert!(f.engine.surface().unwrap().is_empty());
}

#[tokio::test]
async fn layer_rows_are_topmost_first() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "add_shape", "shape": "rect"},
            {"op": "add_shape", "shape": "ellipse"},
            {"op": "toggle_visibility", "layer": 0},
            {"op": "restack", "layer": 1, "to": "front"}
        ]"#,
    )
    .await
    .unwrap();
    let layers = f.engine.layers();
    assert_eq!(layers[0].kind, EntityKind::Rect);
    assert_eq!(layers[1].kind, EntityKind::Ellipse);
    assert!(!layers[1].visible);

    f.run(r#"[{"op": "delete", "layer": 1}]"#).await.unwrap();
    assert_eq!(f.engine.layers().len(), 1);
}

#[tokio::test]
async fn viewport_and_grid_commands() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "zoom_in"},
            {"op": "zoom_in"},
            {"op": "toggle_grid"},
            {"op": "grid_larger"},
            {"op": "grid_larger"},
            {"op": "grid_smaller"}
        ]"#,
    )
    .await
    .unwrap();
    assert!((f.engine.camera.zoom - 1.2).abs() < 1e-9);
    assert!(f.engine.grid.enabled());
    assert!((f.engine.grid.pitch() - 30.0).abs() < 1e-9);

    f.run(r#"[{"op": "zoom_to", "level": 9}, {"op": "zoom_out"}]"#).await.unwrap();
    assert!((f.engine.camera.zoom - 4.9).abs() < 1e-9);

    f.run(r#"[{"op": "zoom_fit"}]"#).await.unwrap();
    assert!((f.engine.camera.zoom - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn middle_button_drag_pans() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "pointer_down", "x": 10, "y": 10, "button": "middle"},
            {"op": "pointer_move", "x": 40, "y": 25},
            {"op": "pointer_up", "x": 40, "y": 25, "button": "middle"}
        ]"#,
    )
    .await
    .unwrap();
    assert!((f.engine.camera.pan_x - 30.0).abs() < 1e-9);
    assert!((f.engine.camera.pan_y - 15.0).abs() < 1e-9);
}

#[tokio::test]
async fn load_restores_saved_project() {
    let mut f = Fixture::new();
    f.run(
        r#"[
            {"op": "add_shape", "shape": "rect"},
            {"op": "add_shape", "shape": "ellipse"},
            {"op": "save"},
            {"op": "clear"},
            {"op": "load"}
        ]"#,
    )
    .await
    .unwrap();
    assert_eq!(f.engine.surface().unwrap().len(), 2);
    assert!(!f.engine.can_undo());
}

#[tokio::test]
async fn load_without_project_fails() {
    let mut f = Fixture::new();
    let err = f.run(r#"[{"op": "load"}]"#).await.unwrap_err();
    assert!(matches!(err, ScriptError::Step { source, .. } if matches!(*source, ScriptError::Load(LoadError::EmptyProject))));
}

#[tokio::test]
async fn image_batch_lands_in_script_order() {
    let mut f = Fixture::new();
    let big = f.config.out_dir.join("big.png");
    let small = f.config.out_dir.join("small.png");
    RgbaImage::new(300, 300).save(&big).unwrap();
    RgbaImage::new(3, 3).save(&small).unwrap();

    let script = serde_json::json!([
        {"op": "add_image", "src": big},
        {"op": "add_image", "src": small},
        {"op": "add_shape", "shape": "rect"}
    ])
    .to_string();
    let report = f.run(&script).await.unwrap();
    assert_eq!(report.steps, 3);

    let objects = f.engine.surface().unwrap().objects();
    assert_eq!(objects.len(), 3);
    assert_eq!(Props::new(&objects[0].props).src(), big.to_str().unwrap());
    assert_eq!(Props::new(&objects[1].props).src(), small.to_str().unwrap());
    assert_eq!(objects[2].kind, EntityKind::Rect);
}

#[tokio::test]
async fn trailing_image_batch_is_flushed() {
    let mut f = Fixture::new();
    let path = f.config.out_dir.join("tail.png");
    RgbaImage::new(4, 4).save(&path).unwrap();
    let script = serde_json::json!([{"op": "add_image", "src": path}]).to_string();
    f.run(&script).await.unwrap();
    assert_eq!(f.engine.surface().unwrap().len(), 1);
}
