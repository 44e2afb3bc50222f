use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::SIMILARITY_EPSILON,
    utils::math::vector::{cosine_similarity, DenseVecOps},
    vectorizer::{corpus::Corpus, tfidf::TFIDFEngine},
};

/// Enum for similarity algorithms used to rank corpus documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityAlgorithm {
    /// Cosine similarity
    /// Considers only direction; the denominator carries a small epsilon
    /// so zero vectors score 0
    #[default]
    CosineSimilarity,
    /// Dot product
    /// Equal to cosine similarity on unit vectors, which is what the
    /// corpus stores
    Dot,
}

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// Document identifier
    pub key: String,
    pub score: f64,
}

/// Structure to store ranked results
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score, ties by ascending key.
    /// NaN scores are dropped.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.key.cmp(&b.key),
            other => other,
        });
        self
    }

    /// Keep only the first `n` results
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Best match, if any
    #[inline]
    pub fn best(&self) -> Option<&HitEntry> {
        self.list.first()
    }

    /// `(key, score)` pairs in current order
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.list
            .iter()
            .map(|hit| (hit.key.as_str(), hit.score))
            .collect()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // each hit on its own line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, hit.score)))
                .finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.score, hit.key)?;
        }
        Ok(())
    }
}

impl<E> Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    /// Score every stored document vector against `query_vec`.
    ///
    /// Results are unsorted. Documents without a vector (none computed
    /// yet) score 0.
    pub fn similarity(&self, query_vec: &[f64], algorithm: &SimilarityAlgorithm) -> Hits {
        let list = self
            .documents()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|doc| {
                let score = match doc.vector() {
                    Some(vec) if vec.len() == query_vec.len() => match algorithm {
                        SimilarityAlgorithm::CosineSimilarity => {
                            cosine_similarity(vec, query_vec, SIMILARITY_EPSILON)
                        }
                        SimilarityAlgorithm::Dot => vec.dot(query_vec),
                    },
                    _ => 0.0,
                };
                HitEntry {
                    key: doc.id().to_string(),
                    score,
                }
            })
            .collect();
        Hits::new(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(pairs: &[(&str, f64)]) -> Hits {
        Hits::new(
            pairs
                .iter()
                .map(|(key, score)| HitEntry {
                    key: key.to_string(),
                    score: *score,
                })
                .collect(),
        )
    }

    #[test]
    fn sorts_descending_with_key_tiebreak() {
        let mut h = hits(&[("c", 0.5), ("a", 0.9), ("b", 0.5), ("d", f64::NAN)]);
        h.sort_by_score();
        assert_eq!(h.pairs(), vec![("a", 0.9), ("b", 0.5), ("c", 0.5)]);
    }

    #[test]
    fn truncate_and_best() {
        let mut h = hits(&[("x", 0.1), ("y", 0.7)]);
        h.sort_by_score().truncate(1);
        assert_eq!(h.len(), 1);
        assert_eq!(h.best().map(|hit| hit.key.as_str()), Some("y"));
        assert!(Hits::default().best().is_none());
    }

    #[test]
    fn display_is_tab_separated() {
        let h = hits(&[("lincoln0", 0.25)]);
        assert_eq!(h.to_string(), "0.250000\tlincoln0\n");
    }

    #[test]
    fn dot_and_cosine_agree_on_stored_unit_vectors() {
        let mut corpus: Corpus = Corpus::new();
        corpus.add_text("a", "cat cat owl");
        corpus.add_text("b", "dog dog owl");
        corpus.add_text("c", "hen");
        corpus.create_vectors(5);

        let query = crate::Document::new("q", "cat owl owl");
        let query_vec = corpus.query_vector(&query);
        let mut cos = corpus.similarity(&query_vec, &SimilarityAlgorithm::CosineSimilarity);
        let mut dot = corpus.similarity(&query_vec, &SimilarityAlgorithm::Dot);
        cos.sort_by_score();
        dot.sort_by_score();
        for (c, d) in cos.list.iter().zip(dot.list.iter()) {
            assert_eq!(c.key, d.key);
            assert!((c.score - d.score).abs() < 1e-5);
        }
    }

    #[test]
    fn documents_without_vectors_score_zero() {
        let mut corpus: Corpus = Corpus::new();
        corpus.add_text("a", "cat");
        let h = corpus.similarity(&[1.0], &SimilarityAlgorithm::CosineSimilarity);
        assert_eq!(h.pairs(), vec![("a", 0.0)]);
    }
}
