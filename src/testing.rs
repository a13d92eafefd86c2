//! Test doubles shared by the retriever and dialogue tests.

use crate::corpus::{CorpusStore, RawField, Recipe};
use crate::encoder::Encoder;
use crate::error::Result;
use crate::index::FlatIndex;
use crate::retriever::RecipeRetriever;

/// Deterministic stand-in for the sentence model.
///
/// Each keyword owns one axis; text with no keyword lands on a final axis no recipe
/// uses, which puts it at squared distance 2.0 from everything (past the cutoff).
pub struct KeywordEncoder;

impl KeywordEncoder {
    const AXES: [&'static [&'static str]; 6] = [
        &["pasta", "spaghetti", "penne"],
        &["garlic"],
        &["cake"],
        &["chocolate"],
        &["soup"],
        &["tomato"],
    ];

    pub const DIMENSION: usize = Self::AXES.len() + 1;
}

impl Encoder for KeywordEncoder {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let text = text.to_lowercase();
        let mut vector: Vec<f32> = Self::AXES
            .iter()
            .map(|words| {
                if words.iter().any(|w| text.contains(w)) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            vector.push(1.0);
        } else {
            vector.iter_mut().for_each(|x| *x /= norm);
            vector.push(0.0);
        }
        Ok(vector)
    }
}

pub fn kitchen_corpus() -> CorpusStore {
    let recipes = vec![
        Recipe::new(
            "Garlic Pasta",
            "['spaghetti', 'garlic', 'olive oil']",
            "Boil the pasta. Fry the garlic. Toss together.",
        ),
        Recipe::new(
            "Tomato Pasta",
            "['penne', 'tomato sauce']",
            "Boil the penne. Stir in the sauce.",
        ),
        Recipe::new(
            "Chocolate Cake",
            r#"["flour", "cocoa", "sugar"]"#,
            "Mix everything. Bake for 30 minutes.",
        ),
        Recipe::new(
            "Tomato Soup",
            "tomatoes, stock, basil",
            "Simmer the tomatoes. Blend until smooth.",
        ),
        Recipe::new(
            "Lemon Cake",
            RawField::Other(serde_json::Value::Null),
            "Whisk. Bake.",
        ),
    ];
    let corpus = vec![
        "garlic pasta".to_string(),
        "tomato pasta".to_string(),
        "chocolate cake".to_string(),
        "tomato soup".to_string(),
        "lemon cake".to_string(),
    ];
    CorpusStore::new(recipes, corpus).expect("kitchen corpus is aligned")
}

pub fn kitchen_retriever() -> RecipeRetriever<KeywordEncoder, FlatIndex> {
    let corpus = kitchen_corpus();
    let mut index = FlatIndex::new(KeywordEncoder::DIMENSION);
    for text in corpus.corpus_text() {
        index
            .add(KeywordEncoder.encode(text).expect("keyword encoding"))
            .expect("dimension matches");
    }
    RecipeRetriever::new(KeywordEncoder, index, corpus).expect("retriever parts line up")
}
