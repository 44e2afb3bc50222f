use std::{marker::PhantomData, path::Path};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{AuthorshipError, Result},
    loader,
    vectorizer::{
        document::Document,
        evaluate::scoring::{Hits, SimilarityAlgorithm},
        template::VectorTemplate,
        term::TermFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Corpus of documents by known authors.
///
/// Owns the documents and the two corpus-wide maps derived from them:
/// - term frequencies summed over all documents
/// - document frequencies (how many documents contain each term)
///
/// Both maps change only through [`Corpus::add_document`].
///
/// The vector template and the stored document vectors are derived state:
/// they are rebuilt whenever a different `k` is requested or documents were
/// added since they were last computed.
#[derive(Debug, Clone)]
pub struct Corpus<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine<f64>,
{
    documents: IndexMap<String, Document>,
    term_freq: TermFrequency,
    doc_freq: TermFrequency,
    template: VectorTemplate,
    /// bumped on every inserted document
    gen_num: u64,
    /// generation the stored vectors were computed for
    vector_gen: Option<u64>,
    _marker: PhantomData<E>,
}

/// Summary numbers of a corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub vocabulary: usize,
    pub total_terms: u64,
    pub template_len: usize,
}

impl<E> Default for Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    /// Create an empty corpus
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            term_freq: TermFrequency::new(),
            doc_freq: TermFrequency::new(),
            template: VectorTemplate::default(),
            gen_num: 0,
            vector_gen: None,
            _marker: PhantomData,
        }
    }

    /// Add a document and fold its term frequencies into the corpus maps.
    ///
    /// A document whose identifier is already present is ignored.
    ///
    /// # Returns
    /// * `bool` - true if the document was inserted
    pub fn add_document(&mut self, doc: Document) -> bool {
        if self.documents.contains_key(doc.id()) {
            debug!(doc = %doc.id(), "document already in corpus, skipped");
            return false;
        }
        self.update_freqs(doc.term_frequency());
        self.gen_num += 1;
        debug!(doc = %doc.id(), len = doc.len(), terms = doc.term_frequency().term_num(), "document added");
        self.documents.insert(doc.id().to_string(), doc);
        true
    }

    /// Analyze `text` and add it under `id`.
    pub fn add_text(&mut self, id: impl Into<String>, text: &str) -> bool {
        self.add_document(Document::new(id, text))
    }

    /// Load the document at `path` and add it.
    pub fn add_path(&mut self, path: &Path) -> Result<bool> {
        let doc = loader::load_document(path)?;
        Ok(self.add_document(doc))
    }

    /// Build a corpus from every `extension` file in `dir`, skipping the
    /// paths listed in `exclude`.
    ///
    /// Files are read and analyzed in parallel, then added one by one in
    /// path order. Any unreadable file aborts the whole load.
    pub fn from_dir(dir: &Path, extension: &str, exclude: &[&Path]) -> Result<Self> {
        let paths: Vec<_> = loader::collect_paths(dir, extension)?
            .into_iter()
            .filter(|path| !exclude.iter().any(|skip| same_file(path, skip)))
            .collect();
        Self::from_paths(&paths)
    }

    /// Build a corpus from the given files, in order.
    pub fn from_paths<P>(paths: &[P]) -> Result<Self>
    where
        P: AsRef<Path> + Sync,
    {
        let docs: Vec<Document> = paths
            .par_iter()
            .map(|path| loader::load_document(path.as_ref()))
            .collect::<Result<_>>()?;
        let mut corpus = Self::new();
        for doc in docs {
            corpus.add_document(doc);
        }
        info!(documents = corpus.doc_num(), vocabulary = corpus.term_freq.term_num(), "corpus loaded");
        Ok(corpus)
    }

    /// Merge a document's term frequencies into the corpus maps.
    /// Each distinct term raises its document frequency by exactly one.
    fn update_freqs(&mut self, freq: &TermFrequency) {
        self.term_freq.add_terms_from_freq(freq);
        for term in freq.term_set_iter() {
            self.doc_freq.add_term(term);
        }
    }
}

/// Template and vectors
impl<E> Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    /// Select a template of up to `k` terms and recompute every stored
    /// document vector against it.
    pub fn create_vectors(&mut self, k: usize) {
        let doc_num = self.doc_num() as u64;
        self.template = VectorTemplate::select(&self.term_freq, &self.doc_freq, doc_num, k);

        let template = &self.template;
        let doc_freq = &self.doc_freq;
        self.documents.par_values_mut().for_each(|doc| {
            let vector = E::tfidf_vec(doc.term_frequency(), template, doc_freq, doc_num);
            doc.set_vector(vector);
        });
        self.vector_gen = Some(self.gen_num);
        if k > 0 && self.template.is_empty() {
            warn!(documents = doc_num, "no term separates the documents, every score will be 0");
        }
        info!(requested = k, template_len = self.template.len(), documents = doc_num, "vectors computed");
    }

    /// Recompute template and vectors only if they are stale for `k`.
    ///
    /// # Returns
    /// * `bool` - true if a recomputation happened
    pub fn update_vectors(&mut self, k: usize) -> bool {
        if self.vector_gen == Some(self.gen_num) && self.template.requested() == k {
            return false;
        }
        self.create_vectors(k);
        true
    }

    /// TF-IDF vector of a document that is not part of the corpus, against
    /// the current template.
    pub fn query_vector(&self, query: &Document) -> Vec<f64> {
        E::tfidf_vec(
            query.term_frequency(),
            &self.template,
            &self.doc_freq,
            self.doc_num() as u64,
        )
    }
}

/// Identification
impl<E> Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    /// Rank the corpus documents by similarity to `query`.
    ///
    /// Vectors of length `k` are (re)built first when needed; the query
    /// itself is never added to the corpus.
    ///
    /// # Returns
    /// * `Hits` - at most `j` matches, best first
    pub fn identify_document(&mut self, query: &Document, k: usize, j: usize) -> Result<Hits> {
        self.identify_with(query, k, j, &SimilarityAlgorithm::CosineSimilarity)
    }

    /// Same as [`Corpus::identify_document`] with an explicit similarity
    /// algorithm.
    pub fn identify_with(
        &mut self,
        query: &Document,
        k: usize,
        j: usize,
        algorithm: &SimilarityAlgorithm,
    ) -> Result<Hits> {
        if self.documents.is_empty() {
            return Err(AuthorshipError::EmptyCorpus);
        }
        self.update_vectors(k);
        let query_vec = self.query_vector(query);
        let mut hits = self.similarity(&query_vec, algorithm);
        hits.sort_by_score().truncate(j);
        debug!(query = %query.id(), matches = hits.len(), "identified");
        Ok(hits)
    }

    /// Identify raw text.
    pub fn identify_text(&mut self, id: &str, text: &str, k: usize, j: usize) -> Result<Hits> {
        let query = Document::new(id, text);
        self.identify_document(&query, k, j)
    }

    /// Identify the document stored at `path`.
    pub fn identify_path(&mut self, path: &Path, k: usize, j: usize) -> Result<Hits> {
        let query = loader::load_document(path)?;
        self.identify_document(&query, k, j)
    }
}

/// Accessors
impl<E> Corpus<E>
where
    E: TFIDFEngine<f64>,
{
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn get_document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    #[inline]
    pub fn contains_document(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Documents in insertion order
    #[inline]
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Corpus-wide term frequencies
    #[inline]
    pub fn term_frequency(&self) -> &TermFrequency {
        &self.term_freq
    }

    /// Corpus document frequencies
    #[inline]
    pub fn doc_frequency(&self) -> &TermFrequency {
        &self.doc_freq
    }

    #[inline]
    pub fn template(&self) -> &VectorTemplate {
        &self.template
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.doc_num(),
            vocabulary: self.term_freq.term_num(),
            total_terms: self.term_freq.term_sum(),
            template_len: self.template.len(),
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        let mut corpus = Corpus::new();
        for (id, text) in docs {
            corpus.add_text(*id, text);
        }
        corpus
    }

    #[test]
    fn add_document_updates_both_maps() {
        let corpus = corpus(&[
            ("a", "The cat sat. The cat ran."),
            ("b", "The dog sat. The dog ran."),
        ]);
        let tf = corpus.term_frequency();
        let df = corpus.doc_frequency();
        assert_eq!(tf.term_count("cat"), 2);
        assert_eq!(df.term_count("cat"), 1);
        assert_eq!(tf.term_count("sat"), 2);
        assert_eq!(df.term_count("sat"), 2);
        assert_eq!(corpus.doc_num(), 2);
    }

    #[test]
    fn corpus_frequency_bounds_hold() {
        let corpus = corpus(&[
            ("a", "liberty liberty union. nation"),
            ("b", "union of states. liberty"),
            ("c", "war and peace, war"),
        ]);
        let n = corpus.doc_num() as u64;
        for (term, tf) in corpus.term_frequency().iter() {
            let df = corpus.doc_frequency().term_count(term);
            assert!(tf >= df, "{term}: tf {tf} < df {df}");
            assert!(df <= n, "{term}: df {df} > {n}");
        }
    }

    #[test]
    fn duplicate_identifier_is_a_noop() {
        let mut corpus = corpus(&[("a", "The cat sat."), ("b", "The dog sat.")]);
        let tf_before = corpus.term_frequency().clone();
        let df_before = corpus.doc_frequency().clone();

        assert!(!corpus.add_text("a", "completely different words here"));
        assert_eq!(corpus.term_frequency(), &tf_before);
        assert_eq!(corpus.doc_frequency(), &df_before);
        assert_eq!(corpus.doc_num(), 2);
    }

    #[test]
    fn template_excludes_terms_in_every_document() {
        let mut corpus = corpus(&[
            ("a", "The cat sat. The cat ran."),
            ("b", "The dog sat. The dog ran."),
        ]);
        corpus.create_vectors(2);
        assert_eq!(corpus.template().terms(), ["cat", "dog"]);
        for term in corpus.template().iter() {
            assert_ne!(corpus.doc_frequency().term_count(term), corpus.doc_num() as u64);
        }
    }

    #[test]
    fn single_document_gives_empty_template_and_zero_scores() {
        let mut corpus = corpus(&[("solo", "The cat sat.")]);
        let hits = corpus.identify_text("q", "cat", 5, 3).unwrap();
        assert!(corpus.template().is_empty());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.list[0].score, 0.0);
    }

    #[test]
    fn changing_k_resizes_every_vector() {
        let mut corpus = corpus(&[
            ("a", "cat cat owl. fox"),
            ("b", "dog dog owl. hen"),
            ("c", "eel eel ape. bee"),
        ]);
        corpus.create_vectors(2);
        assert!(corpus.documents().all(|d| d.vector().map(<[f64]>::len) == Some(2)));

        assert!(corpus.update_vectors(4));
        assert_eq!(corpus.template().len(), 4);
        assert!(corpus.documents().all(|d| d.vector().map(<[f64]>::len) == Some(4)));

        assert!(!corpus.update_vectors(4));
    }

    #[test]
    fn adding_a_document_invalidates_vectors() {
        let mut corpus = corpus(&[("a", "cat cat"), ("b", "dog dog")]);
        corpus.create_vectors(3);
        assert!(!corpus.update_vectors(3));
        corpus.add_text("c", "owl");
        assert!(corpus.update_vectors(3));
        assert_eq!(corpus.get_document("c").and_then(|d| d.vector()).map(<[f64]>::len), Some(3));
    }

    #[test]
    fn stored_vectors_are_unit_or_zero() {
        let mut corpus = corpus(&[
            ("a", "cat cat owl. fox"),
            ("b", "dog dog owl. hen"),
            ("c", "eel eel ape. bee"),
        ]);
        corpus.create_vectors(10);
        for doc in corpus.documents() {
            let norm: f64 = doc.vector().unwrap().iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9, "{}: {norm}", doc.id());
        }
    }

    #[test]
    fn identify_prefers_shared_vocabulary() {
        let mut corpus = corpus(&[
            ("a", "The cat sat. The cat ran."),
            ("b", "The dog sat. The dog ran."),
            ("c", "The bird sat. The bird ran."),
        ]);
        let hits = corpus.identify_text("query", "cats running", 3, 3).unwrap();
        assert_eq!(hits.list[0].key, "a");
        assert!(hits.list[0].score > hits.list[1].score);
        assert!((hits.list[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn two_document_corpus_scores_zero() {
        // a term in one of two documents has idf ln(2 / 2) = 0
        let mut corpus = corpus(&[
            ("a", "The cat sat. The cat ran."),
            ("b", "The dog sat. The dog ran."),
        ]);
        let hits = corpus.identify_text("query", "cats running", 2, 2).unwrap();
        assert_eq!(corpus.template().terms(), ["cat", "dog"]);
        assert_eq!(hits.pairs(), vec![("a", 0.0), ("b", 0.0)]);
        assert!(corpus.documents().all(|d| d.vector().unwrap().iter().all(|v| *v == 0.0)));
    }

    #[test]
    fn identify_truncates_to_j_and_breaks_ties_by_id() {
        let mut corpus = corpus(&[("b", "dog dog"), ("a", "cat cat"), ("c", "owl owl")]);
        // the query shares nothing with the corpus: every score is 0
        let hits = corpus.identify_text("q", "zebra", 3, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.list[0].key, "a");
        assert_eq!(hits.list[1].key, "b");
    }

    #[test]
    fn empty_corpus_cannot_identify() {
        let mut corpus: Corpus = Corpus::new();
        let err = corpus.identify_text("q", "cat", 3, 1).unwrap_err();
        assert!(matches!(err, AuthorshipError::EmptyCorpus));
    }

    #[test]
    fn stats_reflect_contents() {
        let mut corpus = corpus(&[("a", "cat cat sat"), ("b", "dog sat")]);
        corpus.create_vectors(5);
        let stats = corpus.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.vocabulary, 3);
        assert_eq!(stats.total_terms, 5);
        assert_eq!(stats.template_len, 2);
    }
}
