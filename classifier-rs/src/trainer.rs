//! Model training
//!
//! Training is a fold over the corpus into [`TrainingStats`], which are then
//! validated and frozen into a [`Model`]. Partial statistics merge additively,
//! so the corpus can also be split across a rayon pool.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::corpus::{ClassLabel, Corpus, Document};
use crate::error::{ClassifierError, Result};
use crate::model::{ClassStatistics, Model, Vocabulary};
use crate::preprocess::preprocess;

/// Partial training statistics
#[derive(Debug, Clone, Default)]
pub struct TrainingStats {
    vocabulary: Vocabulary,
    spam: ClassStatistics,
    ham: ClassStatistics,
}

impl TrainingStats {
    /// Fold one document into the statistics
    pub fn observe(mut self, document: &Document) -> Self {
        let tokens = preprocess(&document.text);
        self.class_mut(document.label).observe(&tokens);
        self.vocabulary.extend(tokens);
        self
    }

    /// Combine two partial results; associative and commutative
    pub fn merge(self, other: TrainingStats) -> Self {
        let mut vocabulary = self.vocabulary;
        vocabulary.extend(other.vocabulary);
        Self {
            vocabulary,
            spam: self.spam.merge(other.spam),
            ham: self.ham.merge(other.ham),
        }
    }

    /// Validate class coverage and freeze into a model
    pub fn finish(self) -> Result<Model> {
        for label in ClassLabel::ALL {
            if self.class(label).document_count() == 0 {
                return Err(ClassifierError::Configuration(format!(
                    "corpus contains no {} documents, the class prior is undefined",
                    label
                )));
            }
        }

        if self.vocabulary.is_empty() {
            return Err(ClassifierError::Configuration(
                "corpus produced an empty vocabulary, every document preprocesses to nothing"
                    .to_string(),
            ));
        }

        let model = Model::new(self.vocabulary, self.spam.seal(), self.ham.seal());
        let summary = model.summary();
        info!(
            "Trained model: {} documents ({} spam, {} ham), {} vocabulary tokens",
            summary.total_documents,
            summary.spam_documents,
            summary.ham_documents,
            summary.vocabulary_size
        );

        Ok(model)
    }

    fn class(&self, label: ClassLabel) -> &ClassStatistics {
        match label {
            ClassLabel::Spam => &self.spam,
            ClassLabel::Ham => &self.ham,
        }
    }

    fn class_mut(&mut self, label: ClassLabel) -> &mut ClassStatistics {
        match label {
            ClassLabel::Spam => &mut self.spam,
            ClassLabel::Ham => &mut self.ham,
        }
    }
}

/// Train a model from `corpus` in a single pass
pub fn train(corpus: &Corpus) -> Result<Model> {
    debug!("Training on {} documents", corpus.len());

    corpus
        .documents()
        .iter()
        .fold(TrainingStats::default(), TrainingStats::observe)
        .finish()
}

/// Train a model by folding `chunk_size`-document partitions in parallel.
///
/// Produces the same model as [`train`].
pub fn train_parallel(corpus: &Corpus, chunk_size: usize) -> Result<Model> {
    if chunk_size == 0 {
        return Err(ClassifierError::Configuration(
            "training chunk size must be greater than zero".to_string(),
        ));
    }

    debug!(
        "Training on {} documents in chunks of {}",
        corpus.len(),
        chunk_size
    );

    corpus
        .documents()
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .fold(TrainingStats::default(), TrainingStats::observe)
        })
        .reduce(TrainingStats::default, TrainingStats::merge)
        .finish()
}
