use receipt_ocr::layout::LayoutConfig;
use receipt_ocr::{flatten, parse_response, reconstruct, Glyph};
use std::env;

fn main() {
    let path = env::args().nth(1).expect("Need response path");
    let response = parse_response(&path).expect("Failed");

    let annotation = response.full_text_annotation.unwrap_or_default();
    let lines = reconstruct(flatten(&annotation));
    let config = LayoutConfig::default();

    // Walk consecutive recognized glyphs per line and show what the gap
    // filler computed for each pair
    for (i, line) in lines.iter().enumerate() {
        let real: Vec<&Glyph> = line.glyphs.iter().filter(|g| !g.is_synthetic()).collect();
        for pair in real.windows(2) {
            let gap = pair[1].quad.top_left.x - pair[0].quad.top_right.x;
            let char_width = pair[1].quad.width().max(1);
            let spaces =
                ((gap as f32 / (char_width as f32 * config.space_gap_ratio)).floor() as i32).max(0);

            println!(
                "Line {:3} | Gap: {:4} (charW: {:3}, spaces: {}) | '{}' -> '{}'",
                i,
                gap,
                char_width,
                spaces,
                pair[0].text,
                pair[1].text
            );
        }
    }
}
