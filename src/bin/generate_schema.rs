//! Schema generator for normalized event parameters.
//!
//! Writes `normalized_schema.json` describing the queue metadata block, the
//! change-stream record and the target enumeration, for teams validating
//! payloads produced by the normalizer.

use std::fs;

fn main() {
    let document = bifrost::schema::schemas_document();
    let count = document.as_array().map_or(0, Vec::len);

    let json = serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
        eprintln!("Failed to serialize schema: {e}");
        std::process::exit(1);
    });

    fs::write("normalized_schema.json", json).unwrap_or_else(|e| {
        eprintln!("Failed to write normalized_schema.json: {e}");
        std::process::exit(1);
    });

    println!("✅ Generated normalized_schema.json with {count} shape(s)");
}
