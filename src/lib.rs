//! Receipt OCR line reconstruction
//!
//! This crate rebuilds the multi-line text layout of a photographed
//! receipt from the per-character bounding boxes reported by an external
//! OCR engine. It provides:
//! - A serde wire model for the engine's hierarchical JSON response
//! - Flattening of the page/block/paragraph/word/symbol hierarchy into
//!   positioned character glyphs
//! - Line reconstruction with skew-adaptive clustering and synthetic
//!   space insertion across wide horizontal gaps
//! - Per-line and per-hierarchy-level bounding quads for overlay drawing

pub mod document;
pub mod extractor;
pub mod geometry;
pub mod layout;

pub use document::{parse_response, parse_response_mem, AnnotateImageResponse, TextAnnotation};
pub use extractor::{document_bounds, flatten, Feature, Glyph, GlyphKind};
pub use geometry::{Point, Quad};
pub use layout::{lines_to_text, reconstruct, reconstruct_with_config, LayoutConfig, Line};

use std::path::Path;
use std::time::Instant;

/// High-level reconstruction result
#[derive(Debug)]
pub struct OcrProcessResult {
    /// Reconstructed plain text, lines joined by `'\n'`
    pub text: String,
    /// Reconstructed lines with their glyph boxes, for overlay drawing
    pub lines: Vec<Line>,
    /// Number of recognized characters fed into reconstruction
    pub glyph_count: usize,
    /// Page count reported by the engine
    pub page_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Reconstruct receipt text from an OCR response document on disk
///
/// This function will:
/// 1. Parse the engine's JSON response
/// 2. Flatten the annotation hierarchy into positioned glyphs
/// 3. Cluster the glyphs into lines and fill wide gaps with spaces
///
/// A response with no text annotation yields an empty result, not an
/// error.
pub fn process_response<P: AsRef<Path>>(path: P) -> Result<OcrProcessResult, OcrError> {
    let start = Instant::now();
    let response = document::parse_response(path)?;
    Ok(reconstruct_response(&response, start))
}

/// Reconstruct receipt text from a response document in memory
pub fn process_response_mem(buffer: &[u8]) -> Result<OcrProcessResult, OcrError> {
    let start = Instant::now();
    let response = document::parse_response_mem(buffer)?;
    Ok(reconstruct_response(&response, start))
}

fn reconstruct_response(response: &AnnotateImageResponse, start: Instant) -> OcrProcessResult {
    let annotation = response.full_text_annotation.as_ref();
    let glyphs = annotation.map(extractor::flatten).unwrap_or_default();
    let page_count = annotation.map(|a| a.pages.len()).unwrap_or(0);
    let glyph_count = glyphs.len();

    let lines = layout::reconstruct(glyphs);
    let text = layout::lines_to_text(&lines);

    OcrProcessResult {
        text,
        lines,
        glyph_count,
        page_count,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("response decode error: {0}")]
    Json(#[from] serde_json::Error),
}
