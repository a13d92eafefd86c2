//! # Corpus store
//!
//! The immutable, in-memory recipe table plus the parallel raw-text corpus the index
//! was built from.
//!
//! Both are loaded once at startup from JSON files:
//!
//! - `recipes.json`: an array of `{title, ingredients, directions}` records.
//! - `corpus.json`: an array of strings, one per recipe, in the **same order**.
//!
//! Row position is the join key: index id `i` means `recipes[i]`, which was embedded
//! from `corpus[i]`. Nothing here reorders rows, and [`CorpusStore::new`] refuses
//! to build a store whose two halves have different lengths.
//!
//! The ingredient and direction columns come from a scraped dataset and are not
//! always strings, so they are kept as [`RawField`] values and passed to the
//! formatter untouched.

use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};

use crate::error::{RecipeError, Result};

/// A raw ingredient/direction cell.
///
/// Usually a string: either a stringified list (`"['Salt', 'Pepper']"`) or
/// period-delimited prose. Anything else (numbers, `null`, nested arrays) is kept as
/// the original JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Other(serde_json::Value),
}

impl RawField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawField::Text(text) => Some(text),
            RawField::Other(_) => None,
        }
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Text(text) => f.write_str(text),
            RawField::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for RawField {
    fn from(text: &str) -> Self {
        RawField::Text(text.to_string())
    }
}

/// One row of the recipe table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row position in the store. Assigned on load, never read from disk.
    #[serde(skip)]
    pub id: usize,
    pub title: String,
    pub ingredients: RawField,
    pub directions: RawField,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        ingredients: impl Into<RawField>,
        directions: impl Into<RawField>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            ingredients: ingredients.into(),
            directions: directions.into(),
        }
    }
}

/// Recipe table and corpus text, aligned row for row.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    recipes: Vec<Recipe>,
    corpus: Vec<String>,
}

impl CorpusStore {
    /// Build a store from already-parsed rows.
    ///
    /// Recipe ids are rewritten to their row position.
    ///
    /// # Errors
    /// [`RecipeError::CorpusMisaligned`] if the two sequences differ in length.
    pub fn new(mut recipes: Vec<Recipe>, corpus: Vec<String>) -> Result<Self> {
        if recipes.len() != corpus.len() {
            return Err(RecipeError::CorpusMisaligned {
                recipes: recipes.len(),
                corpus: corpus.len(),
            });
        }
        for (position, recipe) in recipes.iter_mut().enumerate() {
            recipe.id = position;
        }
        Ok(Self { recipes, corpus })
    }

    /// Load `recipes.json` and `corpus.json`.
    ///
    /// Any failure here is fatal: the chat cannot answer anything without its corpus.
    pub fn load(recipes_path: &Path, corpus_path: &Path) -> Result<Self> {
        tracing::info!("Loading recipes from {}", recipes_path.display());
        let recipes: Vec<Recipe> = serde_json::from_str(&fs::read_to_string(recipes_path)?)?;

        tracing::info!("Loading corpus text from {}", corpus_path.display());
        let corpus: Vec<String> = serde_json::from_str(&fs::read_to_string(corpus_path)?)?;

        let store = Self::new(recipes, corpus)?;
        tracing::info!("Corpus ready: {} recipes", store.len());
        Ok(store)
    }

    pub fn get(&self, id: usize) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// The text each index vector was (or will be) embedded from.
    pub fn corpus_text(&self) -> &[String] {
        &self.corpus
    }

    /// blake3 fingerprint of the corpus text, order-sensitive.
    ///
    /// Stored in the index manifest so an index built from a different corpus (or the
    /// same corpus in another order) is rejected at startup instead of silently
    /// returning the wrong recipes.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for text in &self.corpus {
            hasher.update(&(text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}
