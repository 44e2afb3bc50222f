use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how many times each (stemmed) term occurs.
///
/// Insertion order is kept, so enumeration is stable within a run.
///
/// # Examples
/// ```
/// use authorship::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("cat");
/// term_freq.add_term("dog");
/// term_freq.add_term("cat");
///
/// assert_eq!(term_freq.term_count("cat"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        self.add_term_count(term, 1)
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Add `count` occurrences of a term at once.
    /// A count of 0 leaves the map untouched.
    #[inline]
    pub fn add_term_count(&mut self, term: &str, count: u64) -> &mut Self {
        if count == 0 {
            return self;
        }
        match self.term_count.get_mut(term) {
            Some(existing) => *existing += count,
            None => {
                self.term_count.insert(term.to_string(), count);
            }
        }
        self.total_term_count += count;
        self
    }

    /// Merge with another TermFrequency (counts are summed)
    ///
    /// # Arguments
    /// * `other` - Another TermFrequency to merge with
    pub fn add_terms_from_freq(&mut self, other: &TermFrequency) -> &mut Self {
        for (term, count) in other.iter() {
            self.add_term_count(term, count);
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterator over all terms and their counts, in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Iterator over the distinct terms
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|s| s.as_str())
    }

    /// Total count of all terms
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Occurrence count for a term, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Occurrence count for a term, `None` when absent
    #[inline]
    pub fn get(&self, term: &str) -> Option<u64> {
        self.term_count.get(term).copied()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// The `n` most frequent terms, count descending then term ascending
    pub fn most_frequent_terms(&self, n: usize) -> Vec<(String, u64)> {
        let mut term_list: Vec<(&str, u64)> = self.iter().collect();
        term_list.sort_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(b.0),
            other => other,
        });
        term_list
            .into_iter()
            .take(n)
            .map(|(term, count)| (term.to_string(), count))
            .collect()
    }

    /// Unique terms over total terms
    /// 1.0 means every term occurs once, 0.0 for an empty frequency map
    #[inline]
    pub fn unique_term_ratio(&self) -> f64 {
        if self.total_term_count == 0 {
            return 0.0;
        }
        self.term_count.len() as f64 / self.total_term_count as f64
    }
}
