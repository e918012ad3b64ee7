//! Core quiz conversion library.
//!
//! Provides:
//! - Block parser turning loosely structured text into questions
//! - Moodle XML serializer with image placeholder substitution
//! - Summary of parsed questions (count and missing-answer warnings)
//! - Caller-owned image table for `[imagemN]` placeholders
//! - Shared types (Question, QuizOption, ParsePolicy, XmlOptions)

pub mod error;
pub mod images;
pub mod markup;
pub mod parser;
pub mod pipeline;
pub mod serializer;
pub mod summary;
pub mod types;

pub use error::{ImageError, Result};
pub use images::ImageTable;
pub use markup::{cdata, escape_xml, render_inline, resolve_images, text_to_html};
pub use parser::{parse, parse_with};
pub use pipeline::{convert, Conversion};
pub use serializer::{serialize, serialize_with};
pub use summary::{summarize, Summary};
pub use types::{
    AnswerFormat, EscapeMode, LetterAlphabet, OptionScan, ParsePolicy, Question, QuizOption,
    SeparatorPolicy, XmlOptions,
};
