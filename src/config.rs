//! This module provides functionality for loading and handling the application's configuration.
//!
//! It defines the [`RecipeConfig`] struct, which holds the data file locations, the
//! embedding model to use, and the retrieval knobs, plus a [`load_config`] function to
//! load the configuration from a YAML file.
//!
//! # Examples
//!
//! Loading the configuration from a file:
//!
//! ```no_run
//! use awful_recipes::config::{RecipeConfig, load_config};
//!
//! let config_file_path = "/path/to/config.yaml";
//! let config: RecipeConfig = load_config(config_file_path).unwrap();
//! println!("{:?}", config);
//! ```

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::Result;
use crate::index::IndexKind;

/// Maximum squared-Euclidean distance for a hit to count as a match.
///
/// Embeddings are L2-normalized, so squared distances fall in `[0, 4]`; `1.5`
/// corresponds to a cosine similarity of at least `0.25`. Anything further is
/// treated as a false match rather than "close enough".
pub const DISTANCE_THRESHOLD: f32 = 1.5;

/// Number of candidates the dialogue asks for, which bounds how many times the user
/// can answer "yes" to "see another recipe?".
pub const DIALOGUE_TOP_K: usize = 5;

/// Number of candidates returned by one-shot searches (`recipes ask`).
pub const SEARCH_TOP_K: usize = 3;

/// Sentence embedding model used when none is configured.
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Represents the application's configuration.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct RecipeConfig {
    /// JSON array of `{title, ingredients, directions}` records.
    pub recipes_path: PathBuf,

    /// JSON array of strings, one per recipe, in the same order.
    pub corpus_path: PathBuf,

    /// Binary index file. Its manifest lives next to it.
    pub index_path: PathBuf,

    /// Which index implementation `build-index` writes.
    #[serde(default)]
    pub index_kind: IndexKind,

    /// Hugging Face model id for the sentence encoder.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default = "default_model_revision")]
    pub model_revision: String,

    /// Local directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`. Skips the Hugging Face download when set.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,

    #[serde(default = "default_dialogue_top_k")]
    pub dialogue_top_k: usize,

    #[serde(default = "default_search_top_k")]
    pub search_top_k: usize,

    // Shown in the chat banner only.
    #[serde(default)]
    pub recipe_of_the_day: Option<RecipeOfTheDay>,
}

/// The featured recipe shown when a chat session starts.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct RecipeOfTheDay {
    pub image: Option<PathBuf>,
    pub caption: String,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_model_revision() -> String {
    "main".to_string()
}

fn default_distance_threshold() -> f32 {
    DISTANCE_THRESHOLD
}

fn default_dialogue_top_k() -> usize {
    DIALOGUE_TOP_K
}

fn default_search_top_k() -> usize {
    SEARCH_TOP_K
}

impl RecipeConfig {
    /// A configuration whose data files live under `base`.
    ///
    /// This is what `recipes init` writes to disk.
    pub fn with_data_dir(base: &std::path::Path) -> Self {
        Self {
            recipes_path: base.join("recipes.json"),
            corpus_path: base.join("corpus.json"),
            index_path: base.join("recipes.index"),
            index_kind: IndexKind::default(),
            model_id: default_model_id(),
            model_revision: default_model_revision(),
            model_dir: None,
            distance_threshold: DISTANCE_THRESHOLD,
            dialogue_top_k: DIALOGUE_TOP_K,
            search_top_k: SEARCH_TOP_K,
            recipe_of_the_day: Some(RecipeOfTheDay {
                image: Some(base.join("aglio.jpg")),
                caption: "Spaghetti Aglio e Olio: a simple and quick Italian pasta dish made \
                          with garlic, olive oil, and chili flakes."
                    .to_string(),
            }),
        }
    }
}

/// Loads the application's configuration from a YAML file.
///
/// # Returns
///
/// - `Ok(RecipeConfig)`: The loaded configuration.
/// - `Err(RecipeError)`: The file could not be read or is not valid YAML.
pub fn load_config(file: &str) -> Result<RecipeConfig> {
    tracing::debug!("Loading config: {}", file);
    let content = fs::read_to_string(file)?;
    let config: RecipeConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
