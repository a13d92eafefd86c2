//! # Awful Recipes (library root)
//!
//! A conversational recipe finder. The user names a dish in free text; the crate embeds
//! the query with a sentence-transformer, looks up the nearest recipes in a vector index,
//! and answers with ingredient lists or numbered cooking steps through a small
//! menu-driven dialogue.
//!
//! - Recipe records and the search corpus (`corpus`).
//! - Text embedding (`encoder`) and nearest-neighbour lookup (`index`).
//! - Query → recipes with a relevance cutoff (`retriever`).
//! - The conversation state machine (`dialogue`) and its text formatting (`formatter`).
//! - Transcript display for terminals and HTML (`render`, `pretty`).
//! - CLI parsing (`commands`), YAML configuration (`config`) and the error type (`error`).
//!
//! ## Model discovery
//! The sentence model (`all-MiniLM-L6-v2` by default) is looked up, in order, in:
//!
//! 1. the `model_dir` set in `config.yaml`,
//! 2. `config_dir()/models/<model name>`,
//! 3. the Hugging Face Hub cache (downloaded on first use).
//!
//! See [`resolve_model_dir`].

use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod commands;
pub mod config;
pub mod corpus;
pub mod dialogue;
pub mod encoder;
pub mod error;
pub mod formatter;
pub mod index;
pub mod pretty;
pub mod render;
pub mod retriever;

#[cfg(test)]
mod testing;

use config::RecipeConfig;
use corpus::CorpusStore;
use encoder::{SentenceEmbeddingsModel, model_source};
use error::{RecipeError, Result};
use index::RecipeIndex;
use retriever::RecipeRetriever;

/// The retriever the CLI runs with: BERT sentence embeddings over a persisted index.
pub type Retriever = RecipeRetriever<SentenceEmbeddingsModel, RecipeIndex>;

/// Return the per-platform configuration directory.
///
/// Uses [`directories::ProjectDirs`] with `("com", "awful-sec", "recipes")`. The
/// directory is **not** created here.
///
/// # Errors
/// [`RecipeError::ConfigDir`] if the platform has no home/config directory.
pub fn config_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("com", "awful-sec", "recipes").ok_or(RecipeError::ConfigDir)?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Internal: does `p` look like a **non-empty directory**?
fn exists_nonempty_dir(p: &Path) -> bool {
    p.is_dir()
        && fs::read_dir(p)
            .map(|mut it| it.next().is_some())
            .unwrap_or(false)
}

/// Last path segment of a hub id: `sentence-transformers/all-MiniLM-L6-v2` → `all-MiniLM-L6-v2`.
fn model_dir_name(model_id: &str) -> &str {
    model_id.rsplit('/').next().unwrap_or(model_id)
}

/// Resolve a local model directory **without downloading**.
///
/// 1. An explicit override must be a non-empty directory.
/// 2. Otherwise `config_dir()/models/<model name>` is used when it is non-empty.
/// 3. Otherwise `Ok(None)`: the caller falls back to the Hub.
///
/// # Errors
/// - [`RecipeError::MissingModel`] if the override is missing or empty.
/// - [`RecipeError::ConfigDir`] if no config directory exists on this platform.
pub fn resolve_model_dir(model_id: &str, model_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(dir) = model_dir {
        if !exists_nonempty_dir(dir) {
            return Err(RecipeError::MissingModel(format!(
                "model_dir points to a non-existent/empty directory: {}",
                dir.display()
            )));
        }
        return Ok(Some(dir.to_path_buf()));
    }

    let default = config_dir()?.join("models").join(model_dir_name(model_id));
    if exists_nonempty_dir(&default) {
        tracing::debug!("Using local model at {}", default.display());
        return Ok(Some(default));
    }
    Ok(None)
}

/// Load the sentence model named by the config.
pub fn load_encoder(config: &RecipeConfig) -> Result<SentenceEmbeddingsModel> {
    let source = model_source(
        &config.model_id,
        &config.model_revision,
        config.model_dir.as_deref(),
    )?;
    SentenceEmbeddingsModel::load(&source)
}

/// Load corpus, index and model, and assemble the retriever.
///
/// # Errors
/// Fails when any artefact is missing or they do not line up (corpus digest, counts,
/// embedding dimension).
pub fn open_retriever(config: &RecipeConfig) -> Result<Retriever> {
    let corpus = CorpusStore::load(&config.recipes_path, &config.corpus_path)?;
    let (index, manifest) = RecipeIndex::open(&config.index_path, &corpus)?;
    if manifest.model_id != config.model_id {
        tracing::warn!(
            "Index was built with {} but config names {}; rebuild with `recipes build-index`",
            manifest.model_id,
            config.model_id
        );
    }
    let encoder = load_encoder(config)?;
    tracing::info!(
        "Loaded {} recipes ({:?} index, dimension {})",
        corpus.len(),
        manifest.kind,
        manifest.dimension
    );
    Ok(RecipeRetriever::new(encoder, index, corpus)?.with_threshold(config.distance_threshold))
}
