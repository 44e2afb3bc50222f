use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Ordered feature terms shared by every TF-IDF vector of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorTemplate {
    terms: Vec<String>,
    /// k that was asked for; `terms` may be shorter
    requested: usize,
}

impl VectorTemplate {
    /// Pick up to `k` of the most frequent corpus terms.
    ///
    /// Terms contained in every one of the `doc_num` documents cannot
    /// discriminate between authors and are skipped whatever their rank.
    /// Ties in corpus frequency are broken by ascending term.
    ///
    /// A corpus of one document therefore yields an empty template, as does
    /// `k == 0`.
    ///
    /// # Arguments
    /// * `term_freq` - corpus-wide term frequencies
    /// * `doc_freq` - corpus document frequencies
    /// * `doc_num` - number of documents in the corpus
    /// * `k` - requested template length
    pub fn select(
        term_freq: &TermFrequency,
        doc_freq: &TermFrequency,
        doc_num: u64,
        k: usize,
    ) -> Self {
        let mut candidates: Vec<(&str, u64)> = term_freq
            .iter()
            .filter(|(term, _)| doc_freq.term_count(term) != doc_num)
            .collect();
        candidates.sort_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(b.0),
            other => other,
        });
        candidates.truncate(k);

        Self {
            terms: candidates
                .into_iter()
                .map(|(term, _)| term.to_string())
                .collect(),
            requested: k,
        }
    }

    /// Build a template from an explicit term list.
    pub fn from_terms(terms: Vec<String>, requested: usize) -> Self {
        Self { terms, requested }
    }

    #[inline]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }
}
