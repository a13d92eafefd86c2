//! # Recipe retriever
//!
//! Free text in, matching recipes out:
//!
//! 1. embed the query with the [`Encoder`],
//! 2. ask the [`SimilarityIndex`] for the `k` nearest vectors,
//! 3. drop absent ids and anything farther than the distance threshold,
//! 4. map the surviving ids to [`CorpusStore`] rows, nearest first.
//!
//! There is no other ranking: no dedup (a repeated id yields a repeated recipe), no
//! diversity, no re-scoring. An empty result means "no match".

use crate::config::DISTANCE_THRESHOLD;
use crate::corpus::{CorpusStore, Recipe};
use crate::encoder::Encoder;
use crate::error::{RecipeError, Result};
use crate::index::SimilarityIndex;

/// A recipe together with its distance from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub distance: f32,
    pub recipe: Recipe,
}

/// Anything that can answer "which recipes match this text?".
///
/// The dialogue engine depends on this rather than on [`RecipeRetriever`] directly.
pub trait RecipeFinder {
    /// At most `k` recipes, closest first. Empty when nothing is close enough.
    fn find(&self, query: &str, k: usize) -> Result<Vec<Recipe>>;
}

/// Encoder + index + corpus, loaded once and read-only afterwards.
pub struct RecipeRetriever<E, I> {
    encoder: E,
    index: I,
    corpus: CorpusStore,
    threshold: f32,
}

impl<E: Encoder, I: SimilarityIndex> RecipeRetriever<E, I> {
    /// Assemble a retriever, checking that the three parts line up.
    ///
    /// # Errors
    /// - [`RecipeError::IndexMisaligned`] if the index and corpus differ in size.
    /// - [`RecipeError::DimensionMismatch`] if encoder and index disagree on dimension.
    pub fn new(encoder: E, index: I, corpus: CorpusStore) -> Result<Self> {
        if index.len() != corpus.len() {
            return Err(RecipeError::IndexMisaligned {
                vectors: index.len(),
                recipes: corpus.len(),
            });
        }
        if encoder.dimension() != index.dimension() {
            return Err(RecipeError::DimensionMismatch {
                expected: index.dimension(),
                actual: encoder.dimension(),
            });
        }
        Ok(Self {
            encoder,
            index,
            corpus,
            threshold: DISTANCE_THRESHOLD,
        })
    }

    /// Override the relevance cutoff (squared distance).
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    /// Like [`RecipeFinder::find`] but keeps the distances.
    pub fn find_scored(&self, query: &str, k: usize) -> Result<Vec<ScoredRecipe>> {
        let vector = self.encoder.encode(query)?;
        let neighbors = self.index.search(&vector, k)?;

        let mut matches = Vec::new();
        for neighbor in neighbors {
            let Some(id) = neighbor.id else { continue };
            if neighbor.distance > self.threshold {
                continue;
            }
            match self.corpus.get(id) {
                Some(recipe) => matches.push(ScoredRecipe {
                    distance: neighbor.distance,
                    recipe: recipe.clone(),
                }),
                None => tracing::warn!("Index returned id {id} outside the corpus"),
            }
        }

        tracing::debug!(
            "Query {:?}: {} of {} candidates within {}",
            query,
            matches.len(),
            k,
            self.threshold
        );
        Ok(matches)
    }
}

impl<E: Encoder, I: SimilarityIndex> RecipeFinder for RecipeRetriever<E, I> {
    fn find(&self, query: &str, k: usize) -> Result<Vec<Recipe>> {
        Ok(self
            .find_scored(query, k)?
            .into_iter()
            .map(|scored| scored.recipe)
            .collect())
    }
}
