//! Export Gateway: turns a projected `VisualTree` into a downloadable file.
//!
//! `AppState` carries an `Arc<dyn DocumentExporter>`; the default backend is
//! `PdfExporter`, a text-only A4 PDF writer.

pub mod compose;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod wrap;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::layout::tree::{VisualTree, A4_HEIGHT_MM, A4_WIDTH_MM};

pub use pdf::PdfExporter;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const FALLBACK_NAME: &str = "Resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the projected document is empty")]
    EmptyDocument,

    #[error("invalid export options: {0}")]
    InvalidOptions(String),

    #[error("export task failed: {0}")]
    Task(String),
}

/// Page and raster settings for one export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// Output positions snap to a grid of 1/raster_scale pt.
    pub raster_scale: f32,
}

impl ExportOptions {
    /// A4 portrait, no margin, with the given raster scale.
    pub fn a4(raster_scale: f32) -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: 0.0,
            raster_scale,
        }
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if !(self.raster_scale.is_finite() && self.raster_scale > 0.0) {
            return Err(ExportError::InvalidOptions(format!(
                "raster scale must be positive, got {}",
                self.raster_scale
            )));
        }
        if !(self.margin_mm.is_finite() && self.margin_mm >= 0.0) {
            return Err(ExportError::InvalidOptions(format!(
                "margin must be non-negative, got {}",
                self.margin_mm
            )));
        }
        if self.margin_mm * 2.0 >= self.page_width_mm.min(self.page_height_mm) {
            return Err(ExportError::InvalidOptions(format!(
                "margin {}mm leaves no printable area",
                self.margin_mm
            )));
        }
        Ok(())
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::a4(2.0)
    }
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Renders `tree`. `full_name` names the file and the document title.
    async fn export(
        &self,
        tree: &VisualTree,
        full_name: &str,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError>;
}

/// `"{name} - CV.pdf"`, with characters that are unsafe in paths or headers replaced.
pub fn export_filename(full_name: &str) -> String {
    let name: String = full_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '\'' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let name = if name.trim_matches(|c| c == '_' || c == '.').is_empty() {
        FALLBACK_NAME
    } else {
        name.as_str()
    };
    format!("{name} - CV.pdf")
}
