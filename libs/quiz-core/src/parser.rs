//! Block parser for plain-text quizzes.
//!
//! # Format
//! ```text
//! 1. What is the capital of Brazil?
//! a) São Paulo
//! b) Brasília {correta}
//!
//! Questão 2 Which one is *prime*?
//! ALTERNATIVAS:
//! a) 4
//! b) 7 {correto}
//! ```
//!
//! A header (`1.`, `2)`, `Questão 3`) opens a block that runs up to the next
//! header. Inside a block, lines labelled `a)`/`b.` are options and everything
//! else is question text. Blocks without text or without options are dropped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::markup::render_inline;
use crate::types::{EscapeMode, OptionScan, ParsePolicy, Question, QuizOption, SeparatorPolicy};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((?:quest[ãa]o|question)\s*\d+|\d+[.)])[.):\-]?")
        .expect("header pattern is valid")
});

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^alternativas\s*:?$").expect("separator pattern is valid")
});

static CORRECT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\s*)\{\s*corret[oa]\s*\}(\s*)").expect("marker pattern is valid")
});

/// Parse quiz text with the default (most permissive) policy.
pub fn parse(input: &str) -> Vec<Question> {
    parse_with(input, &ParsePolicy::default())
}

/// Parse quiz text into questions, in source order.
///
/// Never fails: empty input yields no questions and incomplete blocks are
/// skipped.
pub fn parse_with(input: &str, policy: &ParsePolicy) -> Vec<Question> {
    if input.trim().is_empty() {
        return vec![];
    }

    let mut parser = Parser::new(policy);
    for (idx, line) in input.lines().enumerate() {
        parser.process_line(line, idx + 1);
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    SeekHeader,
    InQuestionBody,
    InOptions,
}

enum LineType<'a> {
    Header { token: &'a str, rest: &'a str },
    Separator,
    Option { letter: char, text: &'a str, line: &'a str },
    Text(&'a str),
    Empty,
}

struct BlockBuilder {
    identifier: Option<String>,
    position: usize,
    start_line: usize,
    body: Vec<String>,
    options: Vec<QuizOption>,
    correct_answer: Option<char>,
    separator_seen: bool,
}

impl BlockBuilder {
    fn new(identifier: Option<String>, position: usize, start_line: usize) -> Self {
        Self {
            identifier,
            position,
            start_line,
            body: Vec::new(),
            options: Vec::new(),
            correct_answer: None,
            separator_seen: false,
        }
    }

    fn push_option(&mut self, letter: char, text: &str, policy: &ParsePolicy) {
        if CORRECT_MARKER.is_match(text) {
            self.correct_answer = Some(letter);
        }
        // A marker glued to a neighbour on one side leaves no gap, so
        // `*A {correta}*` still closes its emphasis span.
        let stripped = CORRECT_MARKER.replace_all(text, |caps: &Captures| {
            if caps[1].is_empty() || caps[2].is_empty() {
                ""
            } else {
                " "
            }
        });

        self.options.push(QuizOption {
            letter,
            text: render_inline(stripped.trim(), policy.emphasis, true),
        });
    }

    fn build(self, policy: &ParsePolicy) -> Option<Question> {
        let raw_text = self.body.join("\n");
        if raw_text.trim().is_empty() || self.options.is_empty() {
            tracing::debug!(
                line = self.start_line,
                options = self.options.len(),
                "dropping incomplete question block"
            );
            return None;
        }

        let escape = policy.escaping == EscapeMode::All;
        Some(Question {
            identifier: self
                .identifier
                .unwrap_or_else(|| format!("Questão {}", self.position)),
            question_text: render_inline(&raw_text, policy.emphasis, escape),
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

struct Parser<'p> {
    policy: &'p ParsePolicy,
    state: State,
    current: Option<BlockBuilder>,
    blocks_seen: usize,
    questions: Vec<Question>,
}

impl<'p> Parser<'p> {
    fn new(policy: &'p ParsePolicy) -> Self {
        Self {
            policy,
            state: State::SeekHeader,
            current: None,
            blocks_seen: 0,
            questions: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        match self.classify(line) {
            LineType::Empty => {}
            LineType::Header { token, rest } => {
                self.start_block(Some(token.to_string()), line_num);
                self.handle_text(rest);
            }
            other => {
                // Content before the first header forms an unnamed block.
                if self.current.is_none() {
                    self.start_block(None, line_num);
                }
                match other {
                    LineType::Separator => self.handle_separator(),
                    LineType::Option { letter, text, line } => {
                        self.handle_option(letter, text, line)
                    }
                    LineType::Text(text) => self.handle_text(text),
                    LineType::Header { .. } | LineType::Empty => {}
                }
            }
        }
    }

    fn classify<'a>(&self, line: &'a str) -> LineType<'a> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineType::Empty;
        }
        if let Some(caps) = HEADER.captures(trimmed) {
            if let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) {
                return LineType::Header {
                    token: token.as_str(),
                    rest: trimmed[whole.end()..].trim(),
                };
            }
        }
        if SEPARATOR.is_match(trimmed) {
            return LineType::Separator;
        }
        if let Some((letter, text)) = self.split_option(trimmed) {
            return LineType::Option {
                letter,
                text,
                line: trimmed,
            };
        }
        LineType::Text(trimmed)
    }

    /// `x)` or `x.` followed by at least one whitespace character.
    fn split_option<'a>(&self, line: &'a str) -> Option<(char, &'a str)> {
        let mut chars = line.chars();
        let letter = self.policy.alphabet.accept(chars.next()?)?;
        if !matches!(chars.next()?, '.' | ')') {
            return None;
        }
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some((letter, rest.trim()))
    }

    fn start_block(&mut self, identifier: Option<String>, line_num: usize) {
        self.flush_block();
        self.blocks_seen += 1;
        self.current = Some(BlockBuilder::new(identifier, self.blocks_seen, line_num));
        self.state = State::InQuestionBody;
    }

    fn handle_separator(&mut self) {
        if let Some(ref mut block) = self.current {
            block.separator_seen = true;
        }
    }

    fn handle_option(&mut self, letter: char, text: &str, line: &str) {
        let Some(ref mut block) = self.current else {
            return;
        };

        if self.policy.separator == SeparatorPolicy::Required && !block.separator_seen {
            self.handle_text(line);
            return;
        }

        block.push_option(letter, text, self.policy);
        self.state = State::InOptions;
    }

    fn handle_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(ref mut block) = self.current else {
            return;
        };

        match (self.state, self.policy.option_scan) {
            (State::InOptions, OptionScan::Sticky) => {
                tracing::debug!(text, "discarding text after options");
            }
            _ => block.body.push(text.to_string()),
        }
    }

    fn flush_block(&mut self) {
        if let Some(block) = self.current.take() {
            if let Some(question) = block.build(self.policy) {
                self.questions.push(question);
            }
        }
        self.state = State::SeekHeader;
    }

    fn finish(mut self) -> Vec<Question> {
        self.flush_block();
        self.questions
    }
}
