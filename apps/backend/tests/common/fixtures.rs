//! Test fixtures and factory functions for request bodies.

use serde_json::{json, Value};

/// A tiny transparent PNG as a data URI.
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Generate quiz text with `num_questions` questions.
///
/// # Arguments
/// * `num_questions` - Number of questions to generate
/// * `with_markers` - Whether option `a` carries `{correta}`
pub fn sample_quiz_text(num_questions: usize, with_markers: bool) -> String {
    (0..num_questions)
        .map(|i| {
            let marker = if with_markers { " {correta}" } else { "" };
            format!(
                "{}. Question {}?\na) Answer {}{}\nb) Other {}\n",
                i + 1,
                i + 1,
                i + 1,
                marker,
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create a parse request body.
pub fn parse_request(text: &str) -> Value {
    json!({ "text": text })
}

/// Create a convert request body.
pub fn convert_request(text: &str, shuffle: bool) -> Value {
    json!({ "text": text, "shuffle": shuffle })
}

/// Create a convert request body with an image table.
pub fn convert_request_with_images(text: &str, images: &[(&str, &str)]) -> Value {
    let table: serde_json::Map<String, Value> = images
        .iter()
        .map(|(token, uri)| (token.to_string(), json!(uri)))
        .collect();
    json!({ "text": text, "images": table })
}
