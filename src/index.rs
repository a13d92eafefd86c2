//! # Similarity index
//!
//! Nearest-neighbour search over the corpus embeddings. Two implementations sit behind
//! the [`SimilarityIndex`] trait:
//!
//! - [`FlatIndex`]: exact brute-force search. Small corpora, tests, and the default.
//! - [`HnswIndex`]: a [HNSW](https://arxiv.org/abs/1603.09320) approximate index from
//!   the `hora` crate for larger corpora.
//!
//! Both report **squared Euclidean** distances in ascending order and close the result
//! with one absent neighbour ([`Neighbor::absent`]) when fewer than `k` candidates
//! exist, so callers always filter on [`Neighbor::id`].
//!
//! ## Persistence layout
//! An index is written once by `recipes build-index` and is read-only afterwards:
//!
//! - `<index_path>`: the index body. bincode for flat, `hora`'s own dump for HNSW.
//! - `<index_path>.manifest.yaml`: an [`IndexManifest`] with the kind, dimension,
//!   vector count and the blake3 digest of the corpus text it was built from.
//!
//! [`RecipeIndex::open`] checks the manifest against the loaded corpus before any
//! query is served. Vector `i` must be `recipes[i]`; a mismatch is a startup error.

use hora::core::ann_index::{ANNIndex, SerializableIndex};
use hora::core::metrics::Metric;
use hora::core::node::Node;
use hora::index::hnsw_idx::HNSWIndex;
use hora::index::hnsw_params::HNSWParams;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::corpus::CorpusStore;
use crate::error::{RecipeError, Result};

/// Which index implementation backs a [`RecipeIndex`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Flat,
    Hnsw,
}

/// One search hit. `id == None` means "no candidate" and must be skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f32,
    pub id: Option<usize>,
}

impl Neighbor {
    pub fn new(distance: f32, id: usize) -> Self {
        Self {
            distance,
            id: Some(id),
        }
    }

    /// Padding entry for searches that found fewer than `k` candidates.
    pub fn absent() -> Self {
        Self {
            distance: f32::INFINITY,
            id: None,
        }
    }
}

/// Read-only nearest-neighbour search.
pub trait SimilarityIndex: Send + Sync {
    fn dimension(&self) -> usize;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// At most `k` neighbours, ascending by distance. When fewer than `k` candidates
    /// exist, one absent entry closes the list.
    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>>;
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn check_dimension(expected: usize, vector: &[f32]) -> Result<()> {
    if vector.len() != expected {
        return Err(RecipeError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

/// Sort hits by distance (ties by id), keep `k`, mark a shortfall with one absent entry.
///
/// `k` is caller-supplied (`recipes ask -k`), so the output never grows past the
/// number of hits plus that one marker.
fn rank(mut hits: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
    hits.truncate(k);
    if hits.len() < k {
        hits.push(Neighbor::absent());
    }
    hits
}

/// Exact search over every stored vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Append a vector; its id is its position.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<usize> {
        check_dimension(self.dimension, &vector)?;
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::standard())?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let (index, _) = bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
        Ok(index)
    }
}

impl SimilarityIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        check_dimension(self.dimension, vector)?;
        let hits = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, stored)| Neighbor::new(squared_l2(vector, stored), id))
            .collect();
        Ok(rank(hits, k))
    }
}

/// Approximate search backed by `hora`'s HNSW graph.
pub struct HnswIndex {
    index: HNSWIndex<f32, usize>,
    dimension: usize,
    count: usize,
}

impl HnswIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            index: HNSWIndex::new(dimension, &HNSWParams::default()),
            dimension,
            count: 0,
        }
    }

    pub fn add(&mut self, vector: &[f32], id: usize) -> Result<()> {
        check_dimension(self.dimension, vector)?;
        self.index.add(vector, id)?;
        self.count += 1;
        Ok(())
    }

    /// Finalize the graph. Must run after the last [`HnswIndex::add`] and before
    /// any search.
    pub fn build(&mut self) -> Result<()> {
        self.index.build(Metric::Euclidean)?;
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        self.index.dump(path_str(path)?)?;
        Ok(())
    }

    /// Load a dump written by [`HnswIndex::save`].
    ///
    /// hora panics on a missing file, so existence is checked first. hora exposes the
    /// graph's dimension but not its node count; `count` is taken from the manifest.
    fn load(path: &Path, dimension: usize, count: usize) -> Result<Self> {
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("index file not found: {}", path.display()),
            )
            .into());
        }
        let index: HNSWIndex<f32, usize> = HNSWIndex::load(path_str(path)?)?;
        if index.dimension() != dimension {
            return Err(RecipeError::DimensionMismatch {
                expected: dimension,
                actual: index.dimension(),
            });
        }
        Ok(Self {
            index,
            dimension,
            count,
        })
    }
}

impl SimilarityIndex for HnswIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.count
    }

    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        check_dimension(self.dimension, vector)?;
        if k == 0 || self.count == 0 {
            return Ok(rank(Vec::new(), k));
        }
        // hora's own score depends on its metric implementation; recompute the
        // squared distance from the stored vector so both indexes agree.
        let hits = self
            .index
            .search_nodes(vector, k.min(self.count))
            .into_iter()
            .map(|(node, _score): (Node<f32, usize>, f32)| Neighbor {
                distance: squared_l2(vector, node.vectors()),
                id: *node.idx(),
            })
            .collect();
        Ok(rank(hits, k))
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| RecipeError::Index(format!("non UTF-8 index path: {}", path.display())))
}

/// Sidecar metadata written next to every index body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexManifest {
    pub kind: IndexKind,
    pub dimension: usize,
    pub count: usize,
    /// [`CorpusStore::digest`] of the corpus the vectors were embedded from.
    pub corpus_digest: String,
    pub model_id: String,
}

impl IndexManifest {
    /// `<index_path>.manifest.yaml`
    pub fn path_for(index_path: &Path) -> PathBuf {
        let mut name = index_path.as_os_str().to_owned();
        name.push(".manifest.yaml");
        PathBuf::from(name)
    }

    pub fn load(index_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(Self::path_for(index_path))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, index_path: &Path) -> Result<()> {
        fs::write(Self::path_for(index_path), serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

/// The index the retriever searches, whichever implementation backs it.
pub enum RecipeIndex {
    Flat(FlatIndex),
    Hnsw(HnswIndex),
}

impl RecipeIndex {
    /// Build an index from vectors in corpus order (vector `i` gets id `i`).
    pub fn build(kind: IndexKind, dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
        tracing::info!("Building {:?} index over {} vectors", kind, vectors.len());
        match kind {
            IndexKind::Flat => {
                let mut index = FlatIndex::new(dimension);
                for vector in vectors {
                    index.add(vector)?;
                }
                Ok(RecipeIndex::Flat(index))
            }
            IndexKind::Hnsw => {
                let mut index = HnswIndex::new(dimension);
                for (id, vector) in vectors.iter().enumerate() {
                    index.add(vector, id)?;
                }
                index.build()?;
                Ok(RecipeIndex::Hnsw(index))
            }
        }
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            RecipeIndex::Flat(_) => IndexKind::Flat,
            RecipeIndex::Hnsw(_) => IndexKind::Hnsw,
        }
    }

    /// Write the index body and its manifest.
    pub fn save(
        &mut self,
        index_path: &Path,
        corpus: &CorpusStore,
        model_id: &str,
    ) -> Result<IndexManifest> {
        let manifest = IndexManifest {
            kind: self.kind(),
            dimension: self.dimension(),
            count: self.len(),
            corpus_digest: corpus.digest(),
            model_id: model_id.to_string(),
        };

        match self {
            RecipeIndex::Flat(index) => index.save(index_path)?,
            RecipeIndex::Hnsw(index) => index.save(index_path)?,
        }
        manifest.save(index_path)?;

        tracing::info!("Index written to {}", index_path.display());
        Ok(manifest)
    }

    /// Load an index and verify it was built from `corpus`.
    ///
    /// # Errors
    /// - I/O or decode failures on either file.
    /// - [`RecipeError::DigestMismatch`] when the corpus text differs from the one
    ///   the index was built from.
    /// - [`RecipeError::IndexMisaligned`] when vector and recipe counts differ.
    pub fn open(index_path: &Path, corpus: &CorpusStore) -> Result<(Self, IndexManifest)> {
        tracing::info!("Loading index from {}", index_path.display());
        let manifest = IndexManifest::load(index_path)?;

        let actual = corpus.digest();
        if manifest.corpus_digest != actual {
            return Err(RecipeError::DigestMismatch {
                expected: manifest.corpus_digest,
                actual,
            });
        }

        let index = match manifest.kind {
            IndexKind::Flat => RecipeIndex::Flat(FlatIndex::load(index_path)?),
            IndexKind::Hnsw => RecipeIndex::Hnsw(HnswIndex::load(
                index_path,
                manifest.dimension,
                manifest.count,
            )?),
        };

        if index.len() != corpus.len() {
            return Err(RecipeError::IndexMisaligned {
                vectors: index.len(),
                recipes: corpus.len(),
            });
        }

        Ok((index, manifest))
    }
}

impl SimilarityIndex for RecipeIndex {
    fn dimension(&self) -> usize {
        match self {
            RecipeIndex::Flat(index) => index.dimension(),
            RecipeIndex::Hnsw(index) => index.dimension(),
        }
    }

    fn len(&self) -> usize {
        match self {
            RecipeIndex::Flat(index) => index.len(),
            RecipeIndex::Hnsw(index) => index.len(),
        }
    }

    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        match self {
            RecipeIndex::Flat(index) => index.search(vector, k),
            RecipeIndex::Hnsw(index) => index.search(vector, k),
        }
    }
}
