//! Geometry Index: flattens the hierarchical OCR annotation
//!
//! The engine reports symbols nested five levels deep. Layout
//! reconstruction wants a flat list of positioned characters; overlay
//! rendering wants bounding boxes at a chosen level of the hierarchy.
//! Both projections live here, decoupled from the clustering logic.

use crate::document::TextAnnotation;
use crate::geometry::Quad;
use log::warn;

/// Hierarchy level for bounding-box extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Block,
    Paragraph,
    Word,
    Symbol,
}

/// Origin of a glyph: recognized by the engine, or synthesized as a space
/// filler during layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Text,
    Space,
}

/// One positioned character
#[derive(Debug, Clone)]
pub struct Glyph {
    /// X coordinate of the top-left corner
    pub origin_x: i32,
    /// Vertical midpoint of the box's left edge
    pub center_y: f32,
    /// Recognized text, a single character (or a synthesized `" "`)
    pub text: String,
    /// Bounding quadrilateral
    pub quad: Quad,
    /// Recognized text or synthetic space
    pub kind: GlyphKind,
}

impl Glyph {
    /// Build a recognized glyph from its text and box
    pub fn new(text: impl Into<String>, quad: Quad) -> Glyph {
        Glyph {
            origin_x: quad.top_left.x,
            center_y: quad.center_y(),
            text: text.into(),
            quad,
            kind: GlyphKind::Text,
        }
    }

    /// True for space glyphs injected by gap filling
    pub fn is_synthetic(&self) -> bool {
        self.kind == GlyphKind::Space
    }
}

/// Flatten the annotation into one glyph per leaf symbol
///
/// Glyphs come out in document traversal order, not spatially sorted.
/// Symbols whose bounding polygon is truncated are skipped with a warning;
/// an empty or malformed annotation yields an empty list.
pub fn flatten(annotation: &TextAnnotation) -> Vec<Glyph> {
    let mut glyphs = Vec::new();

    for page in &annotation.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                for word in &paragraph.words {
                    for symbol in &word.symbols {
                        match Quad::from_poly(&symbol.bounding_box) {
                            Some(quad) => glyphs.push(Glyph::new(symbol.text.clone(), quad)),
                            None => warn!(
                                "skipping symbol {:?}: bounding polygon has {} vertices",
                                symbol.text,
                                symbol.bounding_box.vertices.len()
                            ),
                        }
                    }
                }
            }
        }
    }

    glyphs
}

/// Collect bounding quads at the requested hierarchy level
///
/// A pure projection of the same hierarchy `flatten` walks, used to draw
/// debug overlays at block, paragraph, word, or symbol granularity.
pub fn document_bounds(annotation: &TextAnnotation, feature: Feature) -> Vec<Quad> {
    let mut bounds = Vec::new();

    for page in &annotation.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                for word in &paragraph.words {
                    if feature == Feature::Symbol {
                        for symbol in &word.symbols {
                            bounds.extend(Quad::from_poly(&symbol.bounding_box));
                        }
                    }
                    if feature == Feature::Word {
                        bounds.extend(Quad::from_poly(&word.bounding_box));
                    }
                }
                if feature == Feature::Paragraph {
                    bounds.extend(Quad::from_poly(&paragraph.bounding_box));
                }
            }
            if feature == Feature::Block {
                bounds.extend(Quad::from_poly(&block.bounding_box));
            }
        }
    }

    bounds
}
