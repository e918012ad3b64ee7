//! Core types for quiz conversion.

use serde::{Deserialize, Serialize};

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Lowercase label taken from the input line (`a`, `b`, ...).
    pub letter: char,
    /// Display text, already escaped for XML. Never contains the correctness marker.
    pub text: String,
}

/// One multiple-choice quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Header token as written (`"1."`, `"Questão 2"`) or a positional fallback.
    pub identifier: String,
    /// Question prose, lines joined with `\n`. May contain `[imagemN]` placeholders.
    pub question_text: String,
    /// Options in input order.
    pub options: Vec<QuizOption>,
    /// Letter of the option carrying the correctness marker.
    pub correct_answer: Option<char>,
}

impl Question {
    /// Whether `option` is the one marked correct.
    pub fn is_correct(&self, option: &QuizOption) -> bool {
        self.correct_answer == Some(option.letter)
    }
}

/// Whether option lines need an `ALTERNATIVAS:` line before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPolicy {
    Optional,
    Required,
}

impl Default for SeparatorPolicy {
    fn default() -> Self {
        Self::Optional
    }
}

/// Letters accepted as option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterAlphabet {
    /// `a` through `h`.
    Narrow,
    /// `a` through `j`.
    Standard,
    /// `a` through `z`.
    Wide,
}

impl Default for LetterAlphabet {
    fn default() -> Self {
        Self::Wide
    }
}

impl LetterAlphabet {
    /// Last letter accepted by this alphabet.
    pub fn last(self) -> char {
        match self {
            Self::Narrow => 'h',
            Self::Standard => 'j',
            Self::Wide => 'z',
        }
    }

    /// Check a label case-insensitively and return it lowered.
    pub fn accept(self, label: char) -> Option<char> {
        let lower = label.to_ascii_lowercase();
        ('a'..=self.last()).contains(&lower).then_some(lower)
    }
}

/// How lines that are not options are handled once options have started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionScan {
    /// Every line is re-tested; stray text goes back to the question body.
    PerLine,
    /// Entering options is a one-way latch; stray text is discarded.
    Sticky,
}

impl Default for OptionScan {
    fn default() -> Self {
        Self::PerLine
    }
}

/// Which texts are XML-escaped by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Option text only; question text keeps author HTML.
    OptionsOnly,
    /// Option and question text.
    All,
}

impl Default for EscapeMode {
    fn default() -> Self {
        Self::OptionsOnly
    }
}

/// Parsing configuration. The default is the most permissive variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsePolicy {
    pub separator: SeparatorPolicy,
    pub alphabet: LetterAlphabet,
    pub option_scan: OptionScan,
    pub escaping: EscapeMode,
    /// Convert `*text*` into `<strong>text</strong>`.
    pub emphasis: bool,
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self {
            separator: SeparatorPolicy::default(),
            alphabet: LetterAlphabet::default(),
            option_scan: OptionScan::default(),
            escaping: EscapeMode::default(),
            emphasis: true,
        }
    }
}

/// How answer text is embedded in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFormat {
    /// `<answer format="html">` with a CDATA paragraph.
    Html,
    /// Escaped text directly inside `<text>`.
    PlainText,
}

impl Default for AnswerFormat {
    fn default() -> Self {
        Self::Html
    }
}

/// Serializer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    /// Forwarded to `<shuffleanswers>`; never evaluated here.
    pub shuffle: bool,
    /// Wrap the question body in `<p>...</p>`.
    pub wrap_paragraph: bool,
    pub answer_format: AnswerFormat,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            shuffle: false,
            wrap_paragraph: true,
            answer_format: AnswerFormat::default(),
        }
    }
}

impl XmlOptions {
    /// Copy of these options with the shuffle flag replaced.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}
