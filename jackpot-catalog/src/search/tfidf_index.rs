//! Sparse TF-IDF vectors over entity documents, unigrams plus bigrams.

use std::collections::{HashMap, HashSet};

/// Term id to weight. Vectors produced by the index are L2-normalized.
pub type SparseVector = HashMap<u32, f64>;

/// Vocabulary, smoothed IDF table and one vector per document.
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl TfidfIndex {
    pub fn build(documents: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| terms(d)).collect();

        // Document frequency per term id.
        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for doc_terms in &tokenized {
            let unique: HashSet<&String> = doc_terms.iter().collect();
            for term in unique {
                let next_id = vocabulary.len() as u32;
                let id = *vocabulary.entry(term.clone()).or_insert(next_id);
                if id as usize == df.len() {
                    df.push(0);
                }
                df[id as usize] += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            documents: Vec::with_capacity(tokenized.len()),
        };
        index.documents = tokenized.iter().map(|t| index.vectorize(t)).collect();
        index
    }

    /// Vectorize free text against the built vocabulary. Unknown terms are ignored.
    pub fn query_vector(&self, query: &str) -> SparseVector {
        self.vectorize(&terms(query))
    }

    pub fn document(&self, index: usize) -> Option<&SparseVector> {
        self.documents.get(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, doc_terms: &[String]) -> SparseVector {
        let mut vector: SparseVector = HashMap::new();
        for term in doc_terms {
            if let Some(&id) = self.vocabulary.get(term) {
                *vector.entry(id).or_insert(0.0) += 1.0;
            }
        }
        for (id, weight) in vector.iter_mut() {
            *weight *= self.idf[*id as usize];
        }
        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Lowercased word unigrams (two or more chars) followed by adjacent bigrams.
pub fn terms(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect();
    let bigrams: Vec<String> = words
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();
    words.into_iter().chain(bigrams).collect()
}
