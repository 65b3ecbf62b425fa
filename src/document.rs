//! Wire model for the OCR engine's JSON response
//!
//! The engine reports recognized text as a hierarchy of pages -> blocks ->
//! paragraphs -> words -> symbols, where every node carries a bounding
//! polygon of integer pixel vertices. This module deserializes that shape
//! and nothing more; geometry and layout live downstream.
//!
//! Collections default to empty so a truncated or empty response decodes
//! to a document that flattens to zero glyphs instead of failing.

use crate::OcrError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level envelope of one text-detection response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    /// Dense per-symbol annotation; absent when no text was detected
    #[serde(default)]
    pub full_text_annotation: Option<TextAnnotation>,
}

/// Structured annotation for one image
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Text as assembled by the engine itself, kept for comparison in
    /// debug tools; reconstruction never reads it
    #[serde(default)]
    pub text: String,
}

/// One page of the annotated image
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A logical block of text on a page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph within a block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// A word within a paragraph
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

/// One recognized character
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub text: String,
}

/// Bounding polygon as reported by the engine: vertices ordered top-left,
/// top-right, bottom-right, bottom-left
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// A polygon vertex. The engine omits zero-valued coordinates from the
/// JSON, so both fields default to 0.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

/// Parse a response document from a file on disk
pub fn parse_response<P: AsRef<Path>>(path: P) -> Result<AnnotateImageResponse, OcrError> {
    let buffer = fs::read(path)?;
    parse_response_mem(&buffer)
}

/// Parse a response document from a memory buffer
pub fn parse_response_mem(buffer: &[u8]) -> Result<AnnotateImageResponse, OcrError> {
    Ok(serde_json::from_slice(buffer)?)
}
