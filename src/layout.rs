//! Line reconstruction from unordered character boxes
//!
//! The extractor yields glyphs in document traversal order, which for a
//! photographed receipt bears little relation to visual reading order.
//! This module rebuilds it: glyphs are sorted by vertical center,
//! clustered into lines with a skew-adaptive tolerance, ordered left to
//! right, and wide horizontal gaps are filled with synthetic spaces so
//! receipt columns stay aligned in the emitted text.

use crate::extractor::{Glyph, GlyphKind};
use crate::geometry::{Point, Quad};
use log::debug;
use std::cmp::Ordering;

/// Tuning knobs for clustering and gap filling
///
/// The defaults were tuned against photographed receipts and do not
/// necessarily transfer to other document types.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Fraction of the line's character height tolerated as vertical drift
    pub vertical_tolerance: f32,
    /// Extra tolerance per character width of horizontal travel, so the
    /// window widens across a skewed line
    pub skew_compensation: f32,
    /// Horizontal gap, in character widths, worth one inserted space
    pub space_gap_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_tolerance: 0.3,
            skew_compensation: 0.1,
            space_gap_ratio: 1.5,
        }
    }
}

/// One reconstructed line of text
#[derive(Debug, Clone)]
pub struct Line {
    /// Glyphs ordered left to right, synthetic spaces included
    pub glyphs: Vec<Glyph>,
}

impl Line {
    /// Concatenated line text, synthetic spaces included
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.text.as_str()).collect()
    }

    /// Number of glyphs that came from the OCR engine
    pub fn recognized_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.kind == GlyphKind::Text).count()
    }

    /// Number of synthetic space glyphs
    pub fn space_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.kind == GlyphKind::Space).count()
    }

    /// Bounding quad spanning the whole line: left corners from the first
    /// glyph, right corners from the last
    pub fn bounds(&self) -> Option<Quad> {
        let first = self.glyphs.first()?;
        let last = self.glyphs.last()?;
        Some(Quad {
            top_left: first.quad.top_left,
            top_right: last.quad.top_right,
            bottom_right: last.quad.bottom_right,
            bottom_left: first.quad.bottom_left,
        })
    }
}

/// Character cell measured from the first glyph of a cluster, the
/// cluster's unit of measure until it closes
///
/// Degenerate OCR boxes are clamped to 1x1 so the divisions in the
/// threshold and gap formulas stay defined.
#[derive(Debug, Clone, Copy)]
struct CharUnit {
    width: i32,
    height: i32,
}

impl CharUnit {
    fn measure(glyph: &Glyph) -> CharUnit {
        CharUnit {
            width: glyph.quad.width().max(1),
            height: glyph.quad.height().max(1),
        }
    }
}

/// Reconstruct lines with the default tuning
pub fn reconstruct(glyphs: Vec<Glyph>) -> Vec<Line> {
    reconstruct_with_config(glyphs, &LayoutConfig::default())
}

/// Reconstruct lines from a flat glyph list
///
/// Glyphs are stably sorted by vertical center, then clustered in one
/// sequential pass: each glyph joins the current line when its center
/// falls within an adaptive window around the previously accepted glyph,
/// otherwise the line is closed (sorted left to right and gap-filled) and
/// a new one starts. Empty input yields no lines.
pub fn reconstruct_with_config(glyphs: Vec<Glyph>, config: &LayoutConfig) -> Vec<Line> {
    let mut sorted = glyphs;
    sorted.sort_by(|a, b| a.center_y.partial_cmp(&b.center_y).unwrap_or(Ordering::Equal));

    let mut lines: Vec<Line> = Vec::new();
    let mut cluster: Vec<Glyph> = Vec::new();
    // Center of the most recently accepted glyph. None both before the
    // first glyph and right after a line break, so the glyph that follows
    // always joins and re-anchors the window.
    let mut reference_y: Option<f32> = None;
    let mut unit = CharUnit { width: 1, height: 1 };
    let mut previous_x = 0;

    for glyph in sorted {
        if cluster.is_empty() {
            unit = CharUnit::measure(&glyph);
            previous_x = glyph.origin_x;
        }

        let threshold = inclusion_threshold(unit, glyph.origin_x - previous_x, config);
        let fits = match reference_y {
            None => true,
            Some(y) => glyph.center_y >= y - threshold && glyph.center_y <= y + threshold,
        };

        if fits {
            reference_y = Some(glyph.center_y);
        } else {
            lines.push(close_cluster(std::mem::take(&mut cluster), config));
            unit = CharUnit::measure(&glyph);
            reference_y = None;
        }
        previous_x = glyph.origin_x;
        cluster.push(glyph);
    }

    if !cluster.is_empty() {
        lines.push(close_cluster(cluster, config));
    }

    debug!("reconstructed {} lines", lines.len());
    lines
}

/// Vertical inclusion window for the next glyph: a fraction of the
/// cluster's character height, widened in proportion to the horizontal
/// distance traveled since the last accepted glyph. Receipt photographs
/// accumulate skew across a line's width; a fixed tolerance would split
/// lines near the paper's edges.
fn inclusion_threshold(unit: CharUnit, travel_x: i32, config: &LayoutConfig) -> f32 {
    let vertical = (unit.height as f32 * config.vertical_tolerance).floor();
    let drift = (travel_x as f32 / unit.width as f32 * config.skew_compensation).floor();
    vertical + drift
}

/// Order a closed cluster left to right and fill its wide gaps
fn close_cluster(mut cluster: Vec<Glyph>, config: &LayoutConfig) -> Line {
    cluster.sort_by(|a, b| a.origin_x.cmp(&b.origin_x));
    Line {
        glyphs: fill_gaps(cluster, config),
    }
}

/// Insert synthetic spaces where the horizontal gap between neighboring
/// glyphs spans at least `space_gap_ratio` character widths
///
/// The gap is measured from the previous glyph's top-right x to the
/// current glyph's top-left x; the character width is the current glyph's
/// own (clamped) box width. Inserted spaces are one character wide, match
/// the current glyph's vertical extent, and tile from the previous glyph's
/// right edge. The first glyph of a line only seeds the right-edge
/// reference.
pub fn fill_gaps(glyphs: Vec<Glyph>, config: &LayoutConfig) -> Vec<Glyph> {
    let mut filled = Vec::with_capacity(glyphs.len());
    let mut last_right_x: Option<i32> = None;

    for glyph in glyphs {
        let char_width = glyph.quad.width().max(1);
        if let Some(right) = last_right_x {
            let gap = glyph.quad.top_left.x - right;
            let space_count =
                (gap as f32 / (char_width as f32 * config.space_gap_ratio)).floor() as i32;
            for i in 0..space_count.max(0) {
                filled.push(synthetic_space(right + char_width * i, char_width, &glyph));
            }
        }
        last_right_x = Some(glyph.quad.top_right.x);
        filled.push(glyph);
    }

    filled
}

/// A space glyph one character wide, matching the vertical extent of the
/// glyph it is inserted before
fn synthetic_space(left: i32, width: i32, next: &Glyph) -> Glyph {
    let top = next.quad.top_left.y;
    let bottom = next.quad.bottom_left.y;
    let quad = Quad {
        top_left: Point { x: left, y: top },
        top_right: Point { x: left + width, y: top },
        bottom_right: Point { x: left + width, y: bottom },
        bottom_left: Point { x: left, y: bottom },
    };
    Glyph {
        origin_x: left,
        center_y: quad.center_y(),
        text: " ".to_string(),
        quad,
        kind: GlyphKind::Space,
    }
}

/// Join reconstructed lines into the plain-text reply body
pub fn lines_to_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.text())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str, left: i32, top: i32, right: i32, bottom: i32) -> Glyph {
        Glyph::new(text, Quad::axis_aligned(left, top, right, bottom))
    }

    #[test]
    fn test_config_default() {
        let config = LayoutConfig::default();
        assert!((config.vertical_tolerance - 0.3).abs() < 0.001);
        assert!((config.skew_compensation - 0.1).abs() < 0.001);
        assert!((config.space_gap_ratio - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_reconstruct_empty() {
        assert!(reconstruct(Vec::new()).is_empty());
    }

    #[test]
    fn test_reconstruct_single_glyph() {
        let lines = reconstruct(vec![glyph("X", 0, 0, 10, 10)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "X");
    }

    #[test]
    fn test_adjacent_glyphs_share_a_line() {
        // B sits one pixel lower than A, well inside the 3px window for
        // a 10px character height
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 15, 1, 25, 11),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "AB");
    }

    #[test]
    fn test_vertical_break_starts_new_line() {
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 15, 1, 25, 11),
            glyph("C", 0, 50, 10, 60),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "AB");
        assert_eq!(lines[1].text(), "C");
    }

    #[test]
    fn test_line_ordered_by_x_not_arrival() {
        let lines = reconstruct(vec![
            glyph("B", 15, 1, 25, 11),
            glyph("A", 0, 0, 10, 10),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "AB");
    }

    #[test]
    fn test_inclusion_threshold_widens_with_travel() {
        let unit = CharUnit { width: 10, height: 10 };
        let config = LayoutConfig::default();
        let near = inclusion_threshold(unit, 0, &config);
        let far = inclusion_threshold(unit, 400, &config);
        assert!((near - 3.0).abs() < f32::EPSILON);
        assert!((far - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_inclusion_threshold_floors_leftward_travel() {
        let unit = CharUnit { width: 10, height: 10 };
        let config = LayoutConfig::default();
        // -15px of travel floors to a -1 contribution
        let threshold = inclusion_threshold(unit, -15, &config);
        assert!((threshold - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_glyph_after_break_always_joins() {
        // D is 4px below C, outside a fresh 3px window, but it directly
        // follows the break so it re-anchors C's line
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("C", 0, 50, 10, 60),
            glyph("D", 15, 54, 25, 64),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "A");
        assert_eq!(lines[1].text(), "CD");
    }

    #[test]
    fn test_narrow_gap_inserts_no_space() {
        // gap = 5, char width 10: 5 / 15 floors to 0
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 15, 1, 25, 11),
        ]);
        assert_eq!(lines[0].text(), "AB");
        assert_eq!(lines[0].space_count(), 0);
    }

    #[test]
    fn test_wide_gap_inserts_spaces() {
        // gap = 30, char width 10: 30 / 15 = 2 spaces
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 40, 0, 50, 10),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "A  B");
        assert_eq!(lines[0].space_count(), 2);
    }

    #[test]
    fn test_space_boxes_tile_from_previous_right_edge() {
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 40, 0, 50, 10),
        ]);
        let spaces: Vec<&Glyph> = lines[0].glyphs.iter().filter(|g| g.is_synthetic()).collect();
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[0].quad.top_left, Point { x: 10, y: 0 });
        assert_eq!(spaces[0].quad.top_right, Point { x: 20, y: 0 });
        assert_eq!(spaces[1].quad.top_left, Point { x: 20, y: 0 });
        assert_eq!(spaces[1].quad.bottom_right, Point { x: 30, y: 10 });
        assert!(spaces.iter().all(|s| s.text == " "));
    }

    #[test]
    fn test_zero_width_box_does_not_panic() {
        // Degenerate box clamps to a 1px character cell
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 0, 0),
            glyph("B", 40, 0, 50, 10),
        ]);
        let total: usize = lines.iter().map(|l| l.recognized_count()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_final_cluster_is_gap_filled() {
        // Both lines get the same treatment, including the last one
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 40, 0, 50, 10),
            glyph("C", 0, 50, 10, 60),
            glyph("D", 40, 50, 50, 60),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "A  B");
        assert_eq!(lines[1].text(), "C  D");
    }

    #[test]
    fn test_fill_gaps_first_glyph_seeds_reference() {
        let config = LayoutConfig::default();
        let filled = fill_gaps(vec![glyph("A", 100, 0, 110, 10)], &config);
        assert_eq!(filled.len(), 1);
        assert!(!filled[0].is_synthetic());
    }

    #[test]
    fn test_line_bounds_span_first_to_last() {
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 40, 0, 50, 10),
        ]);
        let bounds = lines[0].bounds().unwrap();
        assert_eq!(bounds.top_left, Point { x: 0, y: 0 });
        assert_eq!(bounds.top_right, Point { x: 50, y: 0 });
        assert_eq!(bounds.bottom_right, Point { x: 50, y: 10 });
        assert_eq!(bounds.bottom_left, Point { x: 0, y: 10 });
    }

    #[test]
    fn test_lines_to_text() {
        let lines = reconstruct(vec![
            glyph("A", 0, 0, 10, 10),
            glyph("B", 15, 1, 25, 11),
            glyph("C", 0, 50, 10, 60),
        ]);
        assert_eq!(lines_to_text(&lines), "AB\nC");
    }

    #[test]
    fn test_lines_to_text_empty() {
        assert_eq!(lines_to_text(&[]), "");
    }
}
