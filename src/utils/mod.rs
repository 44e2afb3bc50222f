pub mod math;
pub mod normalizer;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;
