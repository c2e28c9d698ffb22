use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Serialized form of a fitted TF-IDF vectorizer: the learned vocabulary and
/// the per-term inverse document frequency weights.
#[derive(Debug, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
}

/// Sparse feature vector: (term index, weight) pairs sorted by index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector(Vec<(usize, f64)>);

impl SparseVector {
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Fitted TF-IDF vectorizer, immutable after load and shared by every request.
///
/// Tokenization matches the fitted vectorizer's: input is lowercased and split
/// on word boundaries, keeping tokens of two or more word characters. Term
/// counts are scaled by IDF and the result is L2-normalized.
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        if artifact.idf.is_empty() {
            return Err(Error::artifact("vectorizer has no IDF weights"));
        }
        let dimension = artifact.idf.len();
        for (term, &index) in &artifact.vocabulary {
            if index >= dimension {
                return Err(Error::artifact(format!(
                    "vocabulary term '{}' has index {} outside feature dimension {}",
                    term, index, dimension
                )));
            }
        }

        let token_pattern = Regex::new(r"\b\w\w+\b")
            .map_err(|e| Error::artifact(format!("invalid token pattern: {}", e)))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            token_pattern,
        })
    }

    /// Number of features every classifier row must match.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Maps raw text to a sparse TF-IDF feature vector.
    ///
    /// Out-of-vocabulary terms are dropped; text with no known terms yields an
    /// empty vector (classifiers then decide on intercepts alone).
    pub fn transform(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.token_pattern.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        let norm = entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }

        SparseVector(entries)
    }
}
