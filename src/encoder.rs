//! # Embedding encoder
//!
//! Maps text to a fixed-length dense vector. The production implementation is
//! [`SentenceEmbeddingsModel`], all-MiniLM-L6-v2 run through Candle (pure Rust, no
//! Python), producing L2-normalized 384-d vectors. The model is loaded once at
//! startup; a model that cannot be found or downloaded is fatal.
//!
//! Everything above this layer talks to the [`Encoder`] trait so the retriever and
//! dialogue can be exercised without model weights.
//!
//! ## Quick Example
//! ```no_run
//! use awful_recipes::encoder::{Encoder, ModelSource, SentenceEmbeddingsModel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = SentenceEmbeddingsModel::load(&ModelSource::hub(
//!     "sentence-transformers/all-MiniLM-L6-v2",
//!     "main",
//! ))?;
//! let v = model.encode("spaghetti aglio e olio")?;
//! assert_eq!(v.len(), model.dimension());
//! # Ok(()) }
//! ```

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::{Repo, RepoType, api::sync::Api};
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{RecipeError, Result};

/// Longest token sequence fed to the model; longer text is truncated.
const MAX_SEQUENCE_TOKENS: usize = 256;

/// Text → vector. Deterministic for a given model, no side effects.
pub trait Encoder: Send + Sync {
    /// Length of every vector returned by [`Encoder::encode`].
    fn dimension(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

/// Where to get model files from.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    /// Download (or reuse the cached copy) from the Hugging Face Hub.
    Hub { model_id: String, revision: String },
    /// A directory holding `config.json`, `tokenizer.json` and `model.safetensors`.
    Dir(PathBuf),
}

impl ModelSource {
    pub fn hub(model_id: impl Into<String>, revision: impl Into<String>) -> Self {
        ModelSource::Hub {
            model_id: model_id.into(),
            revision: revision.into(),
        }
    }

    /// Resolve the three files the model needs.
    fn files(&self) -> Result<(PathBuf, PathBuf, PathBuf)> {
        match self {
            ModelSource::Hub { model_id, revision } => {
                tracing::info!("Fetching {model_id}@{revision} from Hugging Face");
                let repo = Repo::with_revision(model_id.clone(), RepoType::Model, revision.clone());
                let api = Api::new()?;
                let api_repo = api.repo(repo);
                Ok((
                    api_repo.get("config.json")?,
                    api_repo.get("tokenizer.json")?,
                    api_repo.get("model.safetensors")?,
                ))
            }
            ModelSource::Dir(dir) => {
                let files = (
                    dir.join("config.json"),
                    dir.join("tokenizer.json"),
                    dir.join("model.safetensors"),
                );
                for file in [&files.0, &files.1, &files.2] {
                    if !file.is_file() {
                        return Err(RecipeError::MissingModel(format!(
                            "{} is missing",
                            file.display()
                        )));
                    }
                }
                Ok(files)
            }
        }
    }
}

/// Sentence embeddings model using Candle (pure Rust)
pub struct SentenceEmbeddingsModel {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl SentenceEmbeddingsModel {
    /// Load the model and measure its output dimension.
    pub fn load(source: &ModelSource) -> Result<Self> {
        let device = Device::Cpu;
        let (config_filename, tokenizer_filename, weights_filename) = source.files()?;

        let config = std::fs::read_to_string(config_filename)?;
        let config: Config = serde_json::from_str(&config)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_filename)
            .map_err(|e| RecipeError::Tokenizer(format!("failed to load tokenizer: {e}")))?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| RecipeError::Tokenizer(e.to_string()))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_filename], DTYPE, &device)? };
        let model = BertModel::load(vb, &config)?;

        let mut encoder = Self {
            model,
            tokenizer,
            device,
            dimension: 0,
        };
        encoder.dimension = encoder.embed("dimension check")?.len();
        tracing::info!("Embedding model ready ({} dimensions)", encoder.dimension);

        Ok(encoder)
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let tokens = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| RecipeError::Tokenizer(e.to_string()))?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;

        let output = self.model.forward(&token_ids, &token_type_ids, None)?;
        let embedding = self.mean_pooling(&output, tokens.get_attention_mask())?;
        let embedding = Self::normalize(&embedding)?;

        Ok(embedding.to_vec1::<f32>()?)
    }

    /// Mean pooling over token embeddings, considering attention mask
    fn mean_pooling(&self, embeddings: &Tensor, attention_mask: &[u32]) -> Result<Tensor> {
        // embeddings: [1, seq_len, hidden]; mask broadcast as [1, seq_len, 1]
        let mask = Tensor::new(attention_mask, &self.device)?
            .to_dtype(DType::F32)?
            .unsqueeze(0)?
            .unsqueeze(2)?;

        let sum = embeddings.broadcast_mul(&mask)?.sum(1)?;
        let count = mask.sum(1)?.clamp(1f32, f32::INFINITY)?;

        Ok(sum.broadcast_div(&count)?.squeeze(0)?)
    }

    /// L2 normalize the embedding vector
    fn normalize(tensor: &Tensor) -> Result<Tensor> {
        let norm = tensor.sqr()?.sum_all()?.sqrt()?;
        Ok(tensor.broadcast_div(&norm)?)
    }
}

impl Encoder for SentenceEmbeddingsModel {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(text)
    }
}

/// Pick a [`ModelSource`]: an explicit local directory wins, then a copy under
/// `config_dir()/models/<name>`, then the Hugging Face Hub.
pub fn model_source(
    model_id: &str,
    revision: &str,
    model_dir: Option<&Path>,
) -> Result<ModelSource> {
    match crate::resolve_model_dir(model_id, model_dir)? {
        Some(dir) => Ok(ModelSource::Dir(dir)),
        None => Ok(ModelSource::hub(model_id, revision)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_source_requires_all_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let err = ModelSource::Dir(dir.path().to_path_buf()).files().unwrap_err();
        assert!(matches!(err, RecipeError::MissingModel(_)));
    }

    #[test]
    fn test_model_source_falls_back_to_hub() {
        let source = model_source("nobody/not-a-cached-model", "main", None).unwrap();
        assert_eq!(source, ModelSource::hub("nobody/not-a-cached-model", "main"));
    }
}
