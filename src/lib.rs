/// This crate attributes an unlabeled text to the most likely author of a
/// closed set, using TF-IDF vectors and cosine similarity.
pub mod config;
pub mod error;
pub mod loader;
pub mod utils;
pub mod vectorizer;

/// Corpus of known-author documents
/// The top-level struct of this crate.
///
/// It holds:
/// - The analyzed documents, keyed by identifier
/// - Corpus-wide term frequencies
/// - Document frequencies (number of documents containing each term)
/// - The vector template and one TF-IDF vector per document
///
/// Lifecycle: create empty, add documents, then identify unknown texts.
/// Identification selects a template of `k` terms and vectorizes every
/// document on first use, and again whenever `k` changes or documents were
/// added in between.
///
/// `Corpus<E>` takes the TF-IDF calculation engine as a type parameter
/// (`DefaultTFIDFEngine` unless specified).
///
/// # Examples
/// ```
/// use authorship::Corpus;
///
/// let mut corpus: Corpus = Corpus::new();
/// corpus.add_text("a", "The cat sat. The cat ran.");
/// corpus.add_text("b", "The dog sat. The dog ran.");
/// corpus.add_text("c", "The bird sat. The bird ran.");
///
/// let hits = corpus.identify_text("unknown", "cats running", 2, 3).unwrap();
/// assert_eq!(hits.best().unwrap().key, "a");
/// ```
pub use vectorizer::corpus::{Corpus, CorpusStats};

/// Document
/// One analyzed text: normalized text, sentences, words, stemmed term
/// frequencies without stopwords, and its TF-IDF vector once computed.
pub use vectorizer::document::Document;

/// Term Frequency structure
/// Counts of each stemmed term, with the total count.
///
/// Used both per document and, summed, for the whole corpus.
pub use vectorizer::term::TermFrequency;

/// Vector Template
/// The ordered feature terms that define the dimensions of every TF-IDF
/// vector in one analysis run.
pub use vectorizer::template::VectorTemplate;

/// TF IDF Calculation Engine Trait
/// Defines how term frequency and inverse document frequency are computed.
///
/// `DefaultTFIDFEngine` uses `count / length` for TF and
/// `ln(N / (1 + df))` for IDF, and returns L2-normalized vectors.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Similarity Algorithm and Search Hits
/// - `SimilarityAlgorithm`: cosine similarity (default) or dot product
/// - `Hits`: ranked results, best first after `sort_by_score`
/// - `HitEntry`: a document identifier and its score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, SimilarityAlgorithm};

pub use config::AnalysisConfig;
pub use error::{AuthorshipError, Result};
