//! CLI tool for reconstructing receipt text from an OCR response

use receipt_ocr::process_response;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <response_json> [output_file]", args[0]);
        eprintln!("       {} <response_json> --json", args[0]);
        eprintln!();
        eprintln!("Reconstructs receipt text lines from an OCR response document.");
        process::exit(1);
    }

    let response_path = &args[1];
    let json_output = args.get(2).map(|a| a == "--json").unwrap_or(false);
    let output_file = if !json_output { args.get(2) } else { None };

    match process_response(response_path) {
        Ok(result) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::json!({
                        "line_count": result.lines.len(),
                        "glyph_count": result.glyph_count,
                        "page_count": result.page_count,
                        "processing_time_ms": result.processing_time_ms,
                        "text": result.text,
                    })
                );
            } else {
                println!("Receipt Text Reconstruction");
                println!("===========================");
                println!("File: {}", response_path);
                println!();
                println!("Pages: {}", result.page_count);
                println!("Glyphs: {}", result.glyph_count);
                println!("Lines: {}", result.lines.len());
                println!("Processing time: {}ms", result.processing_time_ms);
                println!();

                if let Some(output) = output_file {
                    fs::write(output, &result.text).expect("Failed to write output file");
                    println!("Text written to: {}", output);
                    println!("Length: {} characters", result.text.len());
                } else {
                    println!("--- Reconstructed Text ---");
                    println!();
                    println!("{}", result.text);
                }
            }
        }
        Err(e) => {
            if json_output {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    }
}
