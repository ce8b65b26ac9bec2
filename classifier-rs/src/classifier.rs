//! Classifier lifecycle
//!
//! [`SpamClassifier`] holds the model through its two states, uninitialized
//! and trained. The only transition is [`SpamClassifier::initialize`]; once a
//! model is set it is never replaced, so the classifier can be shared behind
//! an `Arc` and read without locks.

use std::sync::OnceLock;
use tracing::{info, warn};

use crate::corpus::Corpus;
use crate::error::{ClassifierError, Result};
use crate::model::{Model, ModelSummary};
use crate::predictor::{predict, PredictionResult};
use crate::trainer::{train, train_parallel};

/// How the model is built from the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingMode {
    /// Single pass on the calling thread
    #[default]
    Sequential,
    /// Rayon fold over partitions of the given size
    Parallel { chunk_size: usize },
}

/// Spam classifier with an explicit initialization step
#[derive(Debug, Default)]
pub struct SpamClassifier {
    model: OnceLock<Model>,
}

impl SpamClassifier {
    /// Create an uninitialized classifier
    pub fn new() -> Self {
        Self {
            model: OnceLock::new(),
        }
    }

    /// Train and initialize from `corpus` in one step
    pub fn trained(corpus: &Corpus, mode: TrainingMode) -> Result<Self> {
        let classifier = Self::new();
        classifier.initialize(corpus, mode)?;
        Ok(classifier)
    }

    /// Train a model from `corpus` and move to the trained state.
    ///
    /// If a model is already present it is kept and returned unchanged.
    pub fn initialize(&self, corpus: &Corpus, mode: TrainingMode) -> Result<&Model> {
        if let Some(model) = self.model.get() {
            warn!("Classifier already trained, keeping existing model");
            return Ok(model);
        }

        let model = match mode {
            TrainingMode::Sequential => train(corpus)?,
            TrainingMode::Parallel { chunk_size } => train_parallel(corpus, chunk_size)?,
        };

        if self.model.set(model).is_err() {
            warn!("Classifier was trained concurrently, keeping the first model");
        } else {
            info!("Classifier initialized");
        }

        self.model()
    }

    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }

    /// The trained model
    pub fn model(&self) -> Result<&Model> {
        self.model.get().ok_or(ClassifierError::UninitializedModel)
    }

    /// Classify `text`; fails only when no model has been trained
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        Ok(predict(text, self.model()?))
    }

    pub fn summary(&self) -> Result<ModelSummary> {
        Ok(self.model()?.summary())
    }
}
