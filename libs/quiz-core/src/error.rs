//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ImageError.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors raised while registering images in an [`ImageTable`](crate::ImageTable).
///
/// Parsing and serialization never fail; only the image table validates input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image token {token:?}: expected imagemN with N >= 1")]
    InvalidToken { token: String },

    #[error("invalid payload for {token}: expected a data: URI")]
    InvalidDataUri { token: String },

    #[error("no image token left to assign")]
    Exhausted,
}
