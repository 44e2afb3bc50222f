use num::Float;

use crate::{
    utils::math::vector::DenseVecOps,
    vectorizer::{template::VectorTemplate, term::TermFrequency},
};

/// TF-IDF calculation engine.
///
/// Plugged into [`Corpus`](crate::Corpus) as a type parameter so that the
/// weighting can be swapped without touching aggregation or ranking.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Term frequency of a term seen `count` times in a document of
    /// `doc_len` non-stopword words.
    fn tf(count: u64, doc_len: u64) -> N;

    /// Inverse document frequency of a term contained in `doc_freq` of the
    /// `doc_num` corpus documents.
    fn idf(doc_num: u64, doc_freq: u64) -> N;

    /// TF-IDF vector of a document over `template`, L2-normalized.
    ///
    /// # Arguments
    /// * `freq` - the document's term frequencies
    /// * `template` - ordered feature terms
    /// * `doc_freq` - corpus document frequencies
    /// * `doc_num` - number of documents in the corpus
    ///
    /// # Returns
    /// * `Vec<N>` - one weight per template term; all zeros when the
    ///   document is empty or shares no term with the template
    fn tfidf_vec(
        freq: &TermFrequency,
        template: &VectorTemplate,
        doc_freq: &TermFrequency,
        doc_num: u64,
    ) -> Vec<N> {
        let doc_len = freq.term_sum();
        let mut vec: Vec<N> = template
            .iter()
            .map(|term| match freq.get(term) {
                Some(count) if doc_len > 0 => {
                    Self::tf(count, doc_len) * Self::idf(doc_num, doc_freq.term_count(term))
                }
                _ => N::zero(),
            })
            .collect();
        vec.l2_normalize();
        vec
    }
}

/// Default TF-IDF engine
/// tf = count / doc_len
/// idf = ln(doc_num / (1 + doc_freq))
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    #[inline]
    fn tf(count: u64, doc_len: u64) -> N {
        if doc_len == 0 {
            return N::zero();
        }
        N::from(count as f64 / doc_len as f64).unwrap_or_else(N::zero)
    }

    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> N {
        if doc_num == 0 {
            return N::zero();
        }
        N::from((doc_num as f64 / (1.0 + doc_freq as f64)).ln()).unwrap_or_else(N::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(terms: &[&str]) -> VectorTemplate {
        VectorTemplate::from_terms(terms.iter().map(|t| t.to_string()).collect(), terms.len())
    }

    #[test]
    fn default_formula() {
        let tf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(2, 8);
        assert!((tf - 0.25).abs() < 1e-12);
        let idf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(3, 1);
        assert!((idf - (1.5_f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn zero_length_and_zero_corpus_are_guarded() {
        let tf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(0, 0);
        assert_eq!(tf, 0.0);
        let idf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(0, 0);
        assert_eq!(idf, 0.0);
    }

    #[test]
    fn vector_is_normalized_and_absent_terms_are_zero() {
        let freq = TermFrequency::from(&["cat", "cat", "sat"][..]);
        let mut doc_freq = TermFrequency::new();
        doc_freq.add_term_count("cat", 1).add_term_count("dog", 1);

        let vec: Vec<f64> =
            DefaultTFIDFEngine::tfidf_vec(&freq, &template(&["cat", "dog"]), &doc_freq, 4);
        assert_eq!(vec.len(), 2);
        assert!((vec[0] - 1.0).abs() < 1e-12);
        assert_eq!(vec[1], 0.0);
    }

    #[test]
    fn weights_follow_tf_times_idf_before_normalization() {
        // cat: tf 2/4, df 1 -> 0.5 * ln(5/2); owl: tf 1/4, df 2 -> 0.25 * ln(5/3)
        let freq = TermFrequency::from(&["cat", "cat", "owl", "sat"][..]);
        let mut doc_freq = TermFrequency::new();
        doc_freq.add_term_count("cat", 1).add_term_count("owl", 2);

        let vec: Vec<f64> =
            DefaultTFIDFEngine::tfidf_vec(&freq, &template(&["cat", "owl"]), &doc_freq, 5);
        let raw = [0.5 * (2.5_f64).ln(), 0.25 * (5.0_f64 / 3.0).ln()];
        let norm = (raw[0] * raw[0] + raw[1] * raw[1]).sqrt();
        assert!((vec[0] - raw[0] / norm).abs() < 1e-12);
        assert!((vec[1] - raw[1] / norm).abs() < 1e-12);
    }

    #[test]
    fn empty_document_or_template_yields_zero_vector() {
        let empty = TermFrequency::new();
        let doc_freq = TermFrequency::from(&["cat"][..]);
        let vec: Vec<f64> = DefaultTFIDFEngine::tfidf_vec(&empty, &template(&["cat"]), &doc_freq, 2);
        assert_eq!(vec, vec![0.0]);

        let freq = TermFrequency::from(&["cat"][..]);
        let vec: Vec<f64> = DefaultTFIDFEngine::tfidf_vec(&freq, &template(&[]), &doc_freq, 2);
        assert!(vec.is_empty());
    }
}
