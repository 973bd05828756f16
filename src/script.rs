//! Command runner: drives the editor core from a JSON script.
//!
//! DESIGN
//! ======
//! A script is a JSON array of commands tagged by `"op"`. Each command is one
//! toolbar, panel, pointer or keyboard action. The runner applies them in
//! order and, after each one, services the actions the engine queued:
//! `SaveRequested` stores the project on the context, `ExportRequested`
//! writes a file. Redraw and cursor actions have nothing to drive headless
//! and are only logged.
//!
//! Consecutive `add_image` commands form one batch. Their loads run
//! concurrently and the images land in script order.
//!
//! Layers are addressed by their row in the layers panel, topmost first.
//!
//! ERROR HANDLING
//! ==============
//! Operations the editor simply declines (aligning with nothing selected,
//! undo at the start of history) are no-ops, as they are in the toolbar.
//! Malformed commands and failed I/O stop the script with the step index.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::{Path, PathBuf};

use canvas::align::{Alignment, UnknownAlignment};
use canvas::camera::Point;
use canvas::doc::{EntityId, EntityKind, LoadError};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, ExportFormat, FocusTarget, Key, Modifiers, WheelDelta};
use canvas::properties::{PropertyKey, UnknownProperty};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::services::export::{ExportError, export};
use crate::services::images::ImageLoadQueue;
use crate::services::project::{ProjectFileError, load_project, read_project, save_project};
use crate::state::EditorContext;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("script is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownProperty(#[from] UnknownProperty),
    #[error(transparent)]
    UnknownAlignment(#[from] UnknownAlignment),
    #[error("no layer at row {0}")]
    NoSuchLayer(usize),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
    #[error("project file failed: {0}")]
    ProjectFile(#[from] ProjectFileError),
    #[error("step {step} ({op}) failed: {source}")]
    Step {
        step: usize,
        op: &'static str,
        #[source]
        source: Box<ScriptError>,
    },
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Modifier keys held during a pointer or key command.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Held {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl From<Held> for Modifiers {
    fn from(h: Held) -> Self {
        Self { shift: h.shift, ctrl: h.ctrl, alt: h.alt, meta: h.meta }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<PointerButton> for Button {
    fn from(b: PointerButton) -> Self {
        match b {
            PointerButton::Primary => Self::Primary,
            PointerButton::Middle => Self::Middle,
            PointerButton::Secondary => Self::Secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Json,
    Png,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => Self::Json,
            Format::Png => Self::Png,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestackOp {
    Forward,
    Backward,
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddText {
        #[serde(default)]
        text: String,
    },
    AddImage {
        src: String,
    },
    AddShape {
        shape: EntityKind,
    },
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        held: Held,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        held: Held,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        held: Held,
        /// The key is typed into a text field rather than the canvas.
        #[serde(default)]
        in_text_field: bool,
    },
    Undo,
    Redo,
    Copy,
    Paste,
    SelectAll,
    Deselect,
    ZoomIn,
    ZoomOut,
    ZoomTo {
        level: f64,
    },
    ZoomFit,
    ToggleGrid,
    GridLarger,
    GridSmaller,
    SetBackground {
        color: String,
    },
    SetProperty {
        key: String,
        value: f64,
    },
    Align {
        to: String,
    },
    SelectLayer {
        layer: usize,
    },
    ToggleVisibility {
        layer: usize,
    },
    ToggleLock {
        layer: usize,
    },
    Restack {
        layer: usize,
        to: RestackOp,
    },
    /// Delete one layer, or the selection when no layer is given.
    Delete {
        #[serde(default)]
        layer: Option<usize>,
    },
    Clear,
    Save,
    Export {
        format: Format,
    },
    /// Load the context project, or a project file when a path is given.
    Load {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddText { .. } => "add_text",
            Self::AddImage { .. } => "add_image",
            Self::AddShape { .. } => "add_shape",
            Self::Click { .. } => "click",
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::Wheel { .. } => "wheel",
            Self::Key { .. } => "key",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::SelectAll => "select_all",
            Self::Deselect => "deselect",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::ZoomTo { .. } => "zoom_to",
            Self::ZoomFit => "zoom_fit",
            Self::ToggleGrid => "toggle_grid",
            Self::GridLarger => "grid_larger",
            Self::GridSmaller => "grid_smaller",
            Self::SetBackground { .. } => "set_background",
            Self::SetProperty { .. } => "set_property",
            Self::Align { .. } => "align",
            Self::SelectLayer { .. } => "select_layer",
            Self::ToggleVisibility { .. } => "toggle_visibility",
            Self::ToggleLock { .. } => "toggle_lock",
            Self::Restack { .. } => "restack",
            Self::Delete { .. } => "delete",
            Self::Clear => "clear",
            Self::Save => "save",
            Self::Export { .. } => "export",
            Self::Load { .. } => "load",
        }
    }
}

/// Parse a script from its JSON text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for malformed JSON or unknown ops.
pub fn parse_script(raw: &str) -> Result<Vec<Command>, ScriptError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] or [`ScriptError::Parse`].
pub async fn read_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_script(&raw)
}

// =============================================================================
// RUNNER
// =============================================================================

/// What a finished script produced.
#[derive(Debug, Default, PartialEq)]
pub struct RunReport {
    /// Commands applied.
    pub steps: usize,
    /// Files written by exports, in order.
    pub exports: Vec<PathBuf>,
    /// Number of times the project was saved.
    pub saves: usize,
}

pub struct ScriptRunner<'a> {
    engine: &'a mut EngineCore,
    ctx: &'a mut EditorContext,
    config: &'a EditorConfig,
    images: ImageLoadQueue,
    report: RunReport,
}

impl<'a> ScriptRunner<'a> {
    #[must_use]
    pub fn new(
        engine: &'a mut EngineCore,
        ctx: &'a mut EditorContext,
        config: &'a EditorConfig,
        client: reqwest::Client,
    ) -> Self {
        Self { engine, ctx, config, images: ImageLoadQueue::new(client), report: RunReport::default() }
    }

    /// Apply every command in order.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Step`] wrapping the first failure.
    pub async fn run(mut self, commands: Vec<Command>) -> Result<RunReport, ScriptError> {
        for (step, command) in commands.into_iter().enumerate() {
            let op = command.name();
            debug!(step, op, "script step");
            let result = if let Command::AddImage { src } = command {
                self.images.push(src);
                Ok(())
            } else {
                self.step(command).await
            };
            result.map_err(|e| ScriptError::Step { step, op, source: Box::new(e) })?;
            self.report.steps += 1;
        }
        self.flush_images().await?;
        info!(steps = self.report.steps, exports = self.report.exports.len(), "script finished");
        Ok(self.report)
    }

    async fn flush_images(&mut self) -> Result<(), ScriptError> {
        if self.images.is_empty() {
            return Ok(());
        }
        self.ctx.set_processing_message(Some(format!("Loading {} image(s)", self.images.len())));
        self.log_progress();
        let inserted = self.images.drain_into(self.engine).await;
        self.ctx.set_processing_message(None);
        debug!(count = inserted.len(), "images placed");
        let actions = self.engine.take_actions();
        self.service(actions).await
    }

    /// Land any pending image batch, then apply a command.
    async fn step(&mut self, command: Command) -> Result<(), ScriptError> {
        self.flush_images().await?;
        self.apply(command).await
    }

    async fn apply(&mut self, command: Command) -> Result<(), ScriptError> {
        let mut actions = match command {
            Command::AddText { text } => {
                self.engine.add_text(&text);
                Vec::new()
            }
            Command::AddImage { src } => {
                self.images.push(src);
                return self.flush_images().await;
            }
            Command::AddShape { shape } => {
                self.engine.add_shape(shape);
                Vec::new()
            }
            Command::Click { x, y, held } => {
                let pt = Point::new(x, y);
                let mut actions = self.engine.on_pointer_down(pt, Button::Primary, held.into());
                actions.extend(self.engine.on_pointer_up(pt, Button::Primary, held.into()));
                actions
            }
            Command::PointerDown { x, y, button, held } => {
                self.engine.on_pointer_down(Point::new(x, y), button.into(), held.into())
            }
            Command::PointerMove { x, y } => self.engine.on_pointer_move(Point::new(x, y), Modifiers::default()),
            Command::PointerUp { x, y, button } => {
                self.engine.on_pointer_up(Point::new(x, y), button.into(), Modifiers::default())
            }
            Command::Wheel { x, y, delta_y } => {
                self.engine.on_wheel(Point::new(x, y), WheelDelta { dx: 0.0, dy: delta_y }, Modifiers::default())
            }
            Command::Key { key, held, in_text_field } => {
                let focus = if in_text_field { FocusTarget::TextInput } else { FocusTarget::Canvas };
                self.engine.on_key_down(&Key::new(key), held.into(), focus)
            }
            Command::Undo => {
                self.engine.undo();
                Vec::new()
            }
            Command::Redo => {
                self.engine.redo();
                Vec::new()
            }
            Command::Copy => {
                self.engine.copy();
                Vec::new()
            }
            Command::Paste => {
                self.engine.paste();
                Vec::new()
            }
            Command::SelectAll => {
                self.engine.select_all();
                Vec::new()
            }
            Command::Deselect => {
                self.engine.deselect();
                Vec::new()
            }
            Command::ZoomIn => {
                self.engine.zoom_in();
                Vec::new()
            }
            Command::ZoomOut => {
                self.engine.zoom_out();
                Vec::new()
            }
            Command::ZoomTo { level } => {
                self.engine.zoom_to(level);
                Vec::new()
            }
            Command::ZoomFit => {
                self.engine.reset_viewport();
                Vec::new()
            }
            Command::ToggleGrid => {
                self.engine.toggle_grid();
                Vec::new()
            }
            Command::GridLarger => {
                self.engine.grid_larger();
                Vec::new()
            }
            Command::GridSmaller => {
                self.engine.grid_smaller();
                Vec::new()
            }
            Command::SetBackground { color } => {
                self.engine.set_background(&color);
                Vec::new()
            }
            Command::SetProperty { key, value } => {
                let key: PropertyKey = key.parse()?;
                if !self.engine.set_property(key, value) {
                    debug!(?key, "set_property declined");
                }
                Vec::new()
            }
            Command::Align { to } => {
                let alignment: Alignment = to.parse()?;
                if !self.engine.align_active(alignment) {
                    debug!(?alignment, "align declined");
                }
                Vec::new()
            }
            Command::SelectLayer { layer } => {
                let id = self.layer(layer)?;
                self.engine.select_layer(&id);
                Vec::new()
            }
            Command::ToggleVisibility { layer } => {
                let id = self.layer(layer)?;
                self.engine.toggle_visibility(&id);
                Vec::new()
            }
            Command::ToggleLock { layer } => {
                let id = self.layer(layer)?;
                self.engine.toggle_lock(&id);
                Vec::new()
            }
            Command::Restack { layer, to } => {
                let id = self.layer(layer)?;
                match to {
                    RestackOp::Forward => self.engine.bring_forward(&id),
                    RestackOp::Backward => self.engine.send_backward(&id),
                    RestackOp::Front => self.engine.bring_to_front(&id),
                    RestackOp::Back => self.engine.send_to_back(&id),
                };
                Vec::new()
            }
            Command::Delete { layer: Some(layer) } => {
                let id = self.layer(layer)?;
                self.engine.delete_layer(&id);
                Vec::new()
            }
            Command::Delete { layer: None } => {
                self.engine.remove_active();
                Vec::new()
            }
            Command::Clear => {
                self.engine.clear();
                Vec::new()
            }
            Command::Save => vec![Action::SaveRequested],
            Command::Export { format } => vec![Action::ExportRequested(format.into())],
            Command::Load { path } => {
                let project = match path {
                    Some(path) => read_project(&path).await?,
                    None => self.ctx.project().cloned().ok_or(LoadError::EmptyProject)?,
                };
                load_project(self.engine, &project)?;
                self.ctx.set_project(Some(project));
                Vec::new()
            }
        };
        actions.extend(self.engine.take_actions());
        self.service(actions).await
    }

    fn log_progress(&self) {
        if let Some(message) = self.ctx.processing_message() {
            info!(status = message, "working");
        }
    }

    fn layer(&self, row: usize) -> Result<EntityId, ScriptError> {
        self.engine.layers().get(row).map(|l| l.id).ok_or(ScriptError::NoSuchLayer(row))
    }

    async fn service(&mut self, actions: Vec<Action>) -> Result<(), ScriptError> {
        for action in actions {
            match action {
                Action::SaveRequested => {
                    let project = save_project(self.ctx, self.engine)?;
                    info!(id = %project.id, "project saved");
                    self.report.saves += 1;
                }
                Action::ExportRequested(format) => {
                    self.ctx.set_processing_message(Some(format!("Exporting {format:?}")));
                    self.log_progress();
                    let result = export(self.engine, format, &self.config.out_dir, self.config.export_scale).await;
                    self.ctx.set_processing_message(None);
                    self.report.exports.push(result?);
                }
                Action::RenderNeeded => debug!("render requested"),
                Action::SetCursor(cursor) => debug!(%cursor, "cursor"),
            }
        }
        Ok(())
    }
}
