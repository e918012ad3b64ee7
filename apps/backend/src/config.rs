//! Service configuration from environment variables

use anyhow::{Context, Result};
use quiz_core::{ParsePolicy, XmlOptions};
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};

const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Request body limit. Pasted images arrive as base64 data URIs.
    pub max_body_bytes: usize,
    /// Parse policy used when a request does not override it.
    pub policy: ParsePolicy,
    /// Document layout used when a request does not override it.
    pub layout: XmlOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            policy: ParsePolicy::default(),
            layout: XmlOptions::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for unset keys.
    ///
    /// Enum values use their snake_case names (`QUIZ_ALPHABET=standard`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = ParsePolicy {
            separator: parse_enum(&lookup, "QUIZ_SEPARATOR", defaults.policy.separator)?,
            alphabet: parse_enum(&lookup, "QUIZ_ALPHABET", defaults.policy.alphabet)?,
            option_scan: parse_enum(&lookup, "QUIZ_OPTION_SCAN", defaults.policy.option_scan)?,
            escaping: parse_enum(&lookup, "QUIZ_ESCAPING", defaults.policy.escaping)?,
            emphasis: parse_value(&lookup, "QUIZ_EMPHASIS", defaults.policy.emphasis)?,
        };

        let layout = XmlOptions {
            shuffle: false,
            wrap_paragraph: parse_value(
                &lookup,
                "QUIZ_WRAP_PARAGRAPH",
                defaults.layout.wrap_paragraph,
            )?,
            answer_format: parse_enum(&lookup, "QUIZ_ANSWER_FORMAT", defaults.layout.answer_format)?,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_value(&lookup, "PORT", defaults.port)?,
            max_body_bytes: parse_value(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
            policy,
            layout,
        })
    }

    /// Socket address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_enum<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: DeserializeOwned,
{
    match lookup(key) {
        Some(raw) => {
            let normalized = raw.trim().to_lowercase();
            let deserializer: StrDeserializer<'_, ValueError> = normalized.as_str().into_deserializer();
            T::deserialize(deserializer).with_context(|| format!("invalid {}: {:?}", key, raw))
        }
        None => Ok(default),
    }
}
