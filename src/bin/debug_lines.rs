//! Debug tool: Print reconstructed lines with Y positions and gaps
//!
//! Usage: debug_lines <response_json>
//!
//! Shows each reconstructed line with the vertical center of its first
//! glyph, the gap from the previous line, glyph and space counts, and gap
//! statistics for the whole document.

use receipt_ocr::layout::LayoutConfig;
use receipt_ocr::{flatten, parse_response, reconstruct};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <response_json>", args[0]);
        eprintln!();
        eprintln!("Prints reconstructed lines with vertical positions and gaps.");
        process::exit(1);
    }

    let response = match parse_response(&args[1]) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error parsing response: {}", e);
            process::exit(1);
        }
    };

    let annotation = match response.full_text_annotation {
        Some(annotation) => annotation,
        None => {
            eprintln!("No text annotation in response.");
            process::exit(0);
        }
    };

    let glyphs = flatten(&annotation);
    if glyphs.is_empty() {
        eprintln!("No glyphs found in annotation.");
        process::exit(0);
    }

    let config = LayoutConfig::default();
    eprintln!(
        "Clustering: vertical_tolerance={}, skew_compensation={}, space_gap_ratio={}",
        config.vertical_tolerance, config.skew_compensation, config.space_gap_ratio
    );
    eprintln!();

    let lines = reconstruct(glyphs);

    println!("===== {} lines =====", lines.len());
    println!(
        "{:>8} {:>8} {:>7} {:>7}  {}",
        "CenterY", "Gap", "Glyphs", "Spaces", "Text (first 60 chars)"
    );
    println!("{}", "-".repeat(100));

    let mut prev_y: Option<f32> = None;
    for line in &lines {
        let y = line.glyphs.first().map(|g| g.center_y).unwrap_or(0.0);
        let gap_str = match prev_y {
            Some(py) => format!("{:8.1}", y - py),
            None => "     ---".to_string(),
        };
        let text = line.text();
        let preview: String = text.chars().take(60).collect();

        println!(
            "{:8.1} {} {:7} {:7}  {}",
            y,
            gap_str,
            line.recognized_count(),
            line.space_count(),
            preview
        );
        prev_y = Some(y);
    }
    println!();

    // Vertical gap statistics between consecutive line centers
    let centers: Vec<f32> = lines
        .iter()
        .filter_map(|l| l.glyphs.first().map(|g| g.center_y))
        .collect();
    let mut gaps: Vec<f32> = centers.windows(2).map(|w| w[1] - w[0]).collect();

    if !gaps.is_empty() {
        gaps.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let min = gaps.first().unwrap();
        let max = gaps.last().unwrap();
        let median = gaps[gaps.len() / 2];
        let mean: f32 = gaps.iter().sum::<f32>() / gaps.len() as f32;

        println!("  Line gap statistics:");
        println!("    Count:  {}", gaps.len());
        println!("    Min:    {:6.1}", min);
        println!("    Max:    {:6.1}", max);
        println!("    Median: {:6.1}", median);
        println!("    Mean:   {:6.1}", mean);
    }
}
