//! Caller-owned table of images referenced by `[imagemN]` placeholders.
//!
//! The parser never touches this table; the serializer only reads it. Whoever
//! captures images (paste, upload, an HTTP request) owns the table and the
//! counter used to name new entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ImageError, Result};
use crate::markup::IMAGE_PLACEHOLDER;

const TOKEN_PREFIX: &str = "imagem";

/// Mapping of `imagemN` tokens to data-URI payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ImageTable {
    entries: BTreeMap<String, String>,
    next_index: u64,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data_uri` under an explicit token such as `imagem3`.
    pub fn insert(&mut self, token: &str, data_uri: &str) -> Result<()> {
        let index = token_index(token).ok_or_else(|| ImageError::InvalidToken {
            token: token.to_string(),
        })?;
        if !data_uri.starts_with("data:") {
            return Err(ImageError::InvalidDataUri {
                token: token.to_string(),
            });
        }

        self.entries.insert(token.to_string(), data_uri.to_string());
        self.next_index = self.next_index.max(index);
        Ok(())
    }

    /// Register `data_uri` under the next free token.
    ///
    /// Returns the placeholder (`[imagemN]`) to insert into the quiz text.
    pub fn push(&mut self, data_uri: &str) -> Result<String> {
        let next = self.next_index.checked_add(1).ok_or(ImageError::Exhausted)?;
        let token = format!("{}{}", TOKEN_PREFIX, next);
        self.insert(&token, data_uri)?;
        Ok(format!("[{}]", token))
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by token.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tokens referenced by placeholders in `text`, in order of appearance.
    pub fn placeholders(text: &str) -> Vec<String> {
        IMAGE_PLACEHOLDER
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Placeholders in `text` that have no entry in this table.
    pub fn unresolved(&self, text: &str) -> Vec<String> {
        Self::placeholders(text)
            .into_iter()
            .filter(|token| !self.entries.contains_key(token))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, String>> for ImageTable {
    type Error = ImageError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let mut table = Self::new();
        for (token, uri) in &map {
            table.insert(token, uri)?;
        }
        Ok(table)
    }
}

impl From<ImageTable> for BTreeMap<String, String> {
    fn from(table: ImageTable) -> Self {
        table.entries
    }
}

/// Numeric suffix of a well-formed token, which must be at least 1.
fn token_index(token: &str) -> Option<u64> {
    let digits = token.strip_prefix(TOKEN_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|n| *n >= 1)
}
