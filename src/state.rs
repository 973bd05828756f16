//! Application context.
//!
//! DESIGN
//! ======
//! `EditorContext` is created once in `main` and handed down by reference.
//! Anything that only reads the current project takes `&EditorContext`;
//! anything that changes it takes `&mut EditorContext`. There is no global
//! store.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// EDITOR PROJECT
// =============================================================================

/// A saved design. `canvas_state` holds the serialized surface document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorProject {
    pub id: Uuid,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background: String,
    #[serde(default)]
    pub canvas_state: Option<String>,
    /// Unix milliseconds.
    pub created_at: u64,
    /// Unix milliseconds.
    pub updated_at: u64,
}

impl EditorProject {
    #[must_use]
    pub fn new(name: impl Into<String>, width: f64, height: f64, background: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            background: background.into(),
            canvas_state: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Current wall-clock time in Unix milliseconds.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

// =============================================================================
// EDITOR CONTEXT
// =============================================================================

#[derive(Debug, Default)]
pub struct EditorContext {
    project: Option<EditorProject>,
    processing_message: Option<String>,
}

impl EditorContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn project(&self) -> Option<&EditorProject> {
        self.project.as_ref()
    }

    /// Status line shown while a long operation (loading, exporting) runs.
    #[must_use]
    pub fn processing_message(&self) -> Option<&str> {
        self.processing_message.as_deref()
    }

    pub fn set_project(&mut self, project: Option<EditorProject>) {
        self.project = project;
    }

    pub fn set_processing_message(&mut self, message: Option<String>) {
        self.processing_message = message;
    }

    /// Store a new canvas state on the current project and bump `updated_at`.
    /// Returns `false` when there is no project.
    pub fn touch_project(&mut self, canvas_state: String) -> bool {
        let Some(project) = self.project.as_mut() else {
            return false;
        };
        project.canvas_state = Some(canvas_state);
        project.updated_at = now_ms().max(project.updated_at);
        true
    }
}
