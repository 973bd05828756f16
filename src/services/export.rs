//! Export service: writes the design as a JSON document or a PNG.
//!
//! File names carry the export time in Unix milliseconds, so repeated
//! exports into one directory never overwrite each other.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use canvas::engine::EngineCore;
use canvas::input::ExportFormat;
use image::ImageFormat;
use tracing::info;

use crate::state::now_ms;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("png encode failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("canvas is not initialized")]
    NotInitialized,
}

#[must_use]
pub fn export_file_name(format: ExportFormat, timestamp_ms: u64) -> String {
    let ext = match format {
        ExportFormat::Json => "json",
        ExportFormat::Png => "png",
    };
    format!("design-{timestamp_ms}.{ext}")
}

/// Write the serialized surface to `dir`. Returns the written path.
///
/// # Errors
///
/// Returns [`ExportError::NotInitialized`] without a surface, or an I/O error.
pub async fn export_json(engine: &EngineCore, dir: &Path) -> Result<PathBuf, ExportError> {
    let json = engine.export_json().ok_or(ExportError::NotInitialized)?;
    let path = dir.join(export_file_name(ExportFormat::Json, now_ms()));
    tokio::fs::write(&path, json).await?;
    info!(path = %path.display(), "exported design json");
    Ok(path)
}

/// Render the surface at `scale` and write it to `dir` as PNG. Returns the written path.
///
/// # Errors
///
/// Returns [`ExportError::NotInitialized`] without a surface, or an encode or I/O error.
pub async fn export_png(engine: &EngineCore, dir: &Path, scale: f64) -> Result<PathBuf, ExportError> {
    let pixels = engine.render(scale).ok_or(ExportError::NotInitialized)?;
    let mut bytes = Vec::new();
    pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    let path = dir.join(export_file_name(ExportFormat::Png, now_ms()));
    tokio::fs::write(&path, bytes).await?;
    info!(path = %path.display(), width = pixels.width(), height = pixels.height(), "exported design png");
    Ok(path)
}

/// Export in either format.
///
/// # Errors
///
/// See [`export_json`] and [`export_png`].
pub async fn export(engine: &EngineCore, format: ExportFormat, dir: &Path, scale: f64) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Json => export_json(engine, dir).await,
        ExportFormat::Png => export_png(engine, dir, scale).await,
    }
}
