use serde::{Deserialize, Serialize};

use crate::{
    utils::{normalizer::normalize, stemmer::stem, stopwords::is_stop_word, tokenizer},
    vectorizer::term::TermFrequency,
};

/// Document struct
/// One input text, analyzed once at construction.
///
/// Holds:
/// - the normalized text
/// - its sentences and lowercase words (stopwords included)
/// - stemmed term frequencies (stopwords excluded)
/// - the document length (number of non-stopword words)
/// - the TF-IDF vector, once a template has been applied
///
/// Everything but the vector is fixed after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: String,
    text: String,
    sentences: Vec<String>,
    words: Vec<String>,
    term_freq: TermFrequency,
    vector: Option<Vec<f64>>,
}

impl Document {
    /// Analyze `raw` text under the identifier `id`.
    ///
    /// # Examples
    /// ```
    /// use authorship::Document;
    /// let doc = Document::new("a", "The cats sat. The cat ran!");
    /// assert_eq!(doc.sentences(), ["The cats sat", "The cat ran"]);
    /// assert_eq!(doc.term_frequency().term_count("cat"), 2);
    /// assert_eq!(doc.len(), 4);
    /// ```
    pub fn new(id: impl Into<String>, raw: &str) -> Self {
        let text = normalize(raw);
        let sentences = tokenizer::sentences(&text).map(str::to_string).collect();
        let words: Vec<String> = tokenizer::words(&text).collect();

        let mut term_freq = TermFrequency::new();
        for word in words.iter().filter(|word| !is_stop_word(word)) {
            term_freq.add_term(&stem(word));
        }

        Self {
            id: id.into(),
            text,
            sentences,
            words,
            term_freq,
            vector: None,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Normalized text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Lowercase words, stopwords included
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    pub fn term_frequency(&self) -> &TermFrequency {
        &self.term_freq
    }

    /// Number of non-stopword words
    #[inline]
    pub fn len(&self) -> u64 {
        self.term_freq.term_sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// TF-IDF vector over the current template, if one was computed
    #[inline]
    pub fn vector(&self) -> Option<&[f64]> {
        self.vector.as_deref()
    }

    pub(crate) fn set_vector(&mut self, vector: Vec<f64>) {
        self.vector = Some(vector);
    }
}
