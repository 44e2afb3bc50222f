pub mod corpus;
pub mod document;
pub mod evaluate;
pub mod template;
pub mod term;
pub mod tfidf;
