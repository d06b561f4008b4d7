mod similarity;
mod tfidf_index;

pub use similarity::cosine_similarity;
pub use tfidf_index::{terms, SparseVector, TfidfIndex};
