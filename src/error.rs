//! Error types for the recipe finder.
//!
//! Everything the library can fail on funnels into [`RecipeError`]. Most variants are
//! startup failures (a missing corpus, an unreadable index, a model that cannot be
//! loaded); the only per-turn failures are encoder/index errors raised while a query
//! is being answered.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, RecipeError>;

/// Errors raised by the corpus, encoder, index, retriever and configuration layers.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The per-platform configuration directory could not be determined.
    #[error("unable to determine config directory")]
    ConfigDir,

    /// No embedding model could be located or downloaded.
    #[error("embedding model unavailable: {0}")]
    MissingModel(String),

    /// Tokenizer failed to load or to encode text.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A vector does not match the index/encoder dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Recipe table and corpus text do not have the same number of rows.
    #[error("corpus misaligned: {recipes} recipes but {corpus} corpus texts")]
    CorpusMisaligned { recipes: usize, corpus: usize },

    /// Index vector count does not match the recipe table.
    #[error("index misaligned: {vectors} vectors but {recipes} recipes")]
    IndexMisaligned { vectors: usize, recipes: usize },

    /// Index was built from a different corpus than the one loaded.
    #[error("index was built from a different corpus (expected digest {expected}, found {actual})")]
    DigestMismatch { expected: String, actual: String },

    /// Errors surfaced by the HNSW index (`hora` reports plain strings).
    #[error("index error: {0}")]
    Index(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("model download failed: {0}")]
    Hub(#[from] hf_hub::api::sync::ApiError),

    #[error("index encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("index decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

impl From<&'static str> for RecipeError {
    fn from(message: &'static str) -> Self {
        RecipeError::Index(message.to_string())
    }
}
