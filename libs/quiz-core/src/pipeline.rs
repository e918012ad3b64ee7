//! One-shot conversion: parse, summarize, serialize.

use serde::{Deserialize, Serialize};

use crate::images::ImageTable;
use crate::parser::parse_with;
use crate::serializer::serialize_with;
use crate::summary::{summarize, Summary};
use crate::types::{ParsePolicy, XmlOptions};

/// Result of converting quiz text to Moodle XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub xml: String,
    pub summary: Summary,
    /// Placeholders referenced by the parsed questions with no image registered.
    pub unresolved_images: Vec<String>,
}

/// Convert raw quiz text into a Moodle XML document plus its summary.
pub fn convert(
    input: &str,
    policy: &ParsePolicy,
    options: &XmlOptions,
    images: &ImageTable,
) -> Conversion {
    let questions = parse_with(input, policy);
    let summary = summarize(&questions);

    let mut unresolved_images = Vec::new();
    for question in &questions {
        for token in images.unresolved(&question.question_text) {
            if !unresolved_images.contains(&token) {
                unresolved_images.push(token);
            }
        }
    }

    tracing::debug!(
        questions = summary.total,
        warnings = summary.warnings.len(),
        unresolved = unresolved_images.len(),
        "converted quiz text"
    );

    Conversion {
        xml: serialize_with(&questions, options, images),
        summary,
        unresolved_images,
    }
}
