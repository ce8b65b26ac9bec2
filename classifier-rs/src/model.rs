//! Trained Naive Bayes model
//!
//! A [`Model`] is only produced by the trainer and exposes no mutation, so a
//! single instance can be read from any number of threads without locking.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::corpus::ClassLabel;

/// Distinct tokens seen across the whole corpus
pub type Vocabulary = HashSet<String>;

/// Token frequencies observed for one class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassStatistics {
    pub(crate) document_count: u64,
    pub(crate) token_frequency: HashMap<String, u64>,
    pub(crate) total_token_count: u64,
}

impl ClassStatistics {
    /// Number of training documents in this class
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// Occurrences of `token` in this class, 0 when never seen
    pub fn count(&self, token: &str) -> u64 {
        self.token_frequency.get(token).copied().unwrap_or(0)
    }

    /// Sum of all token frequencies in this class
    pub fn total_token_count(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens seen in this class
    pub fn distinct_tokens(&self) -> usize {
        self.token_frequency.len()
    }

    /// Laplace-smoothed `P(token | class)`.
    ///
    /// `(count + 1) / (total + |V|)`, strictly positive for every token.
    pub fn smoothed_likelihood(&self, token: &str, vocabulary_size: usize) -> f64 {
        (self.count(token) as f64 + 1.0)
            / (self.total_token_count as f64 + vocabulary_size as f64)
    }

    pub(crate) fn observe(&mut self, tokens: &[String]) {
        self.document_count += 1;
        for token in tokens {
            *self.token_frequency.entry(token.clone()).or_insert(0) += 1;
        }
    }

    pub(crate) fn merge(mut self, other: ClassStatistics) -> Self {
        self.document_count += other.document_count;
        for (token, count) in other.token_frequency {
            *self.token_frequency.entry(token).or_insert(0) += count;
        }
        self
    }

    /// Recompute the total from the frequency map
    pub(crate) fn seal(mut self) -> Self {
        self.total_token_count = self.token_frequency.values().sum();
        self
    }
}

/// Immutable vocabulary and per-class statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    vocabulary: Vocabulary,
    spam: ClassStatistics,
    ham: ClassStatistics,
    total_documents: u64,
}

impl Model {
    pub(crate) fn new(vocabulary: Vocabulary, spam: ClassStatistics, ham: ClassStatistics) -> Self {
        let total_documents = spam.document_count + ham.document_count;
        Self {
            vocabulary,
            spam,
            ham,
            total_documents,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Statistics for one class
    pub fn class(&self, label: ClassLabel) -> &ClassStatistics {
        match label {
            ClassLabel::Spam => &self.spam,
            ClassLabel::Ham => &self.ham,
        }
    }

    /// Fraction of training documents in `label`
    pub fn prior(&self, label: ClassLabel) -> f64 {
        self.class(label).document_count as f64 / self.total_documents as f64
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            total_documents: self.total_documents,
            spam_documents: self.spam.document_count,
            ham_documents: self.ham.document_count,
            vocabulary_size: self.vocabulary.len(),
            spam_tokens: self.spam.total_token_count,
            ham_tokens: self.ham.total_token_count,
        }
    }
}

/// Read-only model statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    /// Documents used for training
    pub total_documents: u64,
    /// Spam documents
    pub spam_documents: u64,
    /// Ham documents
    pub ham_documents: u64,
    /// Distinct tokens across both classes
    pub vocabulary_size: usize,
    /// Token occurrences in spam documents
    pub spam_tokens: u64,
    /// Token occurrences in ham documents
    pub ham_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(tokens: &[&str]) -> ClassStatistics {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        let mut stats = ClassStatistics::default();
        stats.observe(&tokens);
        stats.seal()
    }

    #[test]
    fn test_smoothed_likelihood_positive_for_unseen() {
        let stats = stats(&["free", "prize", "free"]);
        assert_eq!(stats.count("lunch"), 0);
        let p = stats.smoothed_likelihood("lunch", 5);
        assert!(p > 0.0);
        assert_eq!(p, 1.0 / 8.0);
        assert_eq!(stats.smoothed_likelihood("free", 5), 3.0 / 8.0);
    }

    #[test]
    fn test_smoothed_likelihood_empty_class() {
        let stats = ClassStatistics::default().seal();
        assert_eq!(stats.smoothed_likelihood("anything", 4), 0.25);
    }

    #[test]
    fn test_merge_sums_counts() {
        let merged = stats(&["free", "prize"]).merge(stats(&["free"])).seal();
        assert_eq!(merged.document_count(), 2);
        assert_eq!(merged.count("free"), 2);
        assert_eq!(merged.count("prize"), 1);
        assert_eq!(merged.total_token_count(), 3);
        assert_eq!(merged.distinct_tokens(), 2);
    }

    #[test]
    fn test_model_totals() {
        let vocabulary: Vocabulary = ["free", "lunch"].iter().map(|t| t.to_string()).collect();
        let model = Model::new(vocabulary, stats(&["free"]), stats(&["lunch"]));
        assert_eq!(model.total_documents(), 2);
        assert_eq!(model.prior(ClassLabel::Spam), 0.5);

        let summary = model.summary();
        assert_eq!(summary.vocabulary_size, 2);
        assert_eq!(summary.spam_tokens, 1);
        assert_eq!(summary.ham_documents, 1);
    }
}
