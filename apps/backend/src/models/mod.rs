//! API request and response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Re-export shared types from quiz-core
pub use quiz_core::types::{
    AnswerFormat, EscapeMode, LetterAlphabet, OptionScan, ParsePolicy, Question, QuizOption,
    SeparatorPolicy, XmlOptions,
};
pub use quiz_core::Summary;

// === Overrides ===

/// Per-request parse policy overrides (unset fields keep the service default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<SeparatorPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<LetterAlphabet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_scan: Option<OptionScan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaping: Option<EscapeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<bool>,
}

impl PolicyOverrides {
    /// Merge onto the service default policy.
    pub fn apply(&self, base: &ParsePolicy) -> ParsePolicy {
        ParsePolicy {
            separator: self.separator.unwrap_or(base.separator),
            alphabet: self.alphabet.unwrap_or(base.alphabet),
            option_scan: self.option_scan.unwrap_or(base.option_scan),
            escaping: self.escaping.unwrap_or(base.escaping),
            emphasis: self.emphasis.unwrap_or(base.emphasis),
        }
    }
}

/// Per-request document layout overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_paragraph: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_format: Option<AnswerFormat>,
}

impl LayoutOverrides {
    /// Merge onto the service default layout with the request's shuffle flag.
    pub fn apply(&self, base: &XmlOptions, shuffle: bool) -> XmlOptions {
        XmlOptions {
            shuffle,
            wrap_paragraph: self.wrap_paragraph.unwrap_or(base.wrap_paragraph),
            answer_format: self.answer_format.unwrap_or(base.answer_format),
        }
    }
}

// === API Request/Response Types ===

/// POST /api/quiz/parse request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    #[serde(default)]
    pub policy: PolicyOverrides,
}

/// POST /api/quiz/parse response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub questions: Vec<Question>,
    pub summary: Summary,
}

/// POST /api/quiz/convert and /api/quiz/download request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub text: String,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub policy: PolicyOverrides,
    #[serde(default)]
    pub layout: LayoutOverrides,
    /// `imagemN` token to data URI.
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

/// POST /api/quiz/convert response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub xml: String,
    pub total: usize,
    pub warnings: Vec<String>,
    pub unresolved_images: Vec<String>,
}

/// GET /api/quiz/defaults response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsResponse {
    pub policy: ParsePolicy,
    pub layout: XmlOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_base() {
        let base = ParsePolicy {
            alphabet: LetterAlphabet::Narrow,
            ..ParsePolicy::default()
        };
        assert_eq!(PolicyOverrides::default().apply(&base), base);
    }

    #[test]
    fn test_overrides_replace_fields() {
        let overrides = PolicyOverrides {
            option_scan: Some(OptionScan::Sticky),
            emphasis: Some(false),
            ..PolicyOverrides::default()
        };
        let merged = overrides.apply(&ParsePolicy::default());
        assert_eq!(merged.option_scan, OptionScan::Sticky);
        assert!(!merged.emphasis);
        assert_eq!(merged.alphabet, LetterAlphabet::Wide);
    }

    #[test]
    fn test_layout_takes_request_shuffle() {
        let base = XmlOptions::default();
        let layout = LayoutOverrides {
            answer_format: Some(AnswerFormat::PlainText),
            ..LayoutOverrides::default()
        }
        .apply(&base, true);
        assert!(layout.shuffle);
        assert!(layout.wrap_paragraph);
        assert_eq!(layout.answer_format, AnswerFormat::PlainText);
    }

    #[test]
    fn test_convert_request_defaults() {
        let request: ConvertRequest = serde_json::from_str(r#"{"text": "1. Q\na) A"}"#).unwrap();
        assert!(!request.shuffle);
        assert!(request.images.is_empty());
        assert!(request.policy.alphabet.is_none());
    }
}
