//! Project persistence: moves the serialized surface between the engine, the
//! context project, and project files on disk.
//!
//! DESIGN
//! ======
//! The project record stores the surface as the same JSON document the
//! history tracker snapshots. Loading replaces the surface and starts a fresh
//! history, so undo never crosses a project load.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use std::path::Path;

use canvas::doc::LoadError;
use canvas::engine::EngineCore;
use tracing::{debug, info, warn};

use crate::state::{EditorContext, EditorProject};

/// Name given to a project created by the first save.
pub const UNTITLED: &str = "Untitled design";

#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    #[error("project file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("project file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store the current surface on the context project, creating the project
/// from the surface's dimensions if there is none.
///
/// # Errors
///
/// Returns [`LoadError::NotInitialized`] without a surface.
pub fn save_project<'a>(ctx: &'a mut EditorContext, engine: &EngineCore) -> Result<&'a EditorProject, LoadError> {
    let surface = engine.surface().ok_or(LoadError::NotInitialized)?;
    let state = engine.export_json().ok_or(LoadError::NotInitialized)?;

    let mut project = ctx
        .project()
        .cloned()
        .unwrap_or_else(|| EditorProject::new(UNTITLED, surface.width(), surface.height(), surface.background()));
    project.width = surface.width();
    project.height = surface.height();
    project.background = surface.background().to_string();
    ctx.set_project(Some(project));
    ctx.touch_project(state);

    let project = ctx.project().ok_or(LoadError::NotInitialized)?;
    debug!(id = %project.id, objects = surface.len(), "project saved");
    Ok(project)
}

/// Replace the surface with a project's saved state.
///
/// # Errors
///
/// Returns [`LoadError::EmptyProject`] for a project that was never saved, or
/// the engine's load error. The surface is unchanged on error.
pub fn load_project(engine: &mut EngineCore, project: &EditorProject) -> Result<(), LoadError> {
    let Some(state) = project.canvas_state.as_deref() else {
        warn!(id = %project.id, "project has no canvas state");
        return Err(LoadError::EmptyProject);
    };
    engine.load_document_json(state)?;
    info!(id = %project.id, name = %project.name, "project loaded");
    Ok(())
}

/// Read a project record from a JSON file.
///
/// # Errors
///
/// Returns [`ProjectFileError`] when the file is unreadable or malformed.
pub async fn read_project(path: &Path) -> Result<EditorProject, ProjectFileError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a project record as pretty JSON.
///
/// # Errors
///
/// Returns [`ProjectFileError`] when serialization or the write fails.
pub async fn write_project(path: &Path, project: &EditorProject) -> Result<(), ProjectFileError> {
    let raw = serde_json::to_string_pretty(project)?;
    tokio::fs::write(path, raw).await?;
    info!(path = %path.display(), id = %project.id, "project written");
    Ok(())
}
