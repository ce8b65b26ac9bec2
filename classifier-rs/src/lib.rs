//! classifier-rs: Naive Bayes spam classification
//!
//! A tokenizer and a multinomial Naive Bayes model that turn a free-text
//! message into a spam / not-spam label with a confidence percentage.
//!
//! The model is trained once from a static labeled corpus and is immutable
//! afterwards; predictions are pure functions of the text and the model.
//!
//! # Example
//!
//! ```
//! use classifier_rs::{Corpus, SpamClassifier, TrainingMode, Verdict};
//!
//! let corpus = Corpus::builtin()?;
//! let classifier = SpamClassifier::trained(&corpus, TrainingMode::Sequential)?;
//!
//! let result = classifier.predict("Congratulations you have won a free prize")?;
//! assert_eq!(result.label, Verdict::Spam);
//! assert!(result.confidence > 50.0);
//! # Ok::<(), classifier_rs::ClassifierError>(())
//! ```
//!
//! # Modules
//!
//! - [`preprocess`]: text normalization
//! - [`corpus`]: labeled training documents
//! - [`trainer`]: corpus to model
//! - [`predictor`]: scoring and decision rule
//! - [`classifier`]: model lifecycle

pub mod classifier;
pub mod corpus;
pub mod error;
pub mod model;
pub mod predictor;
pub mod preprocess;
pub mod stopwords;
pub mod trainer;

pub use classifier::{SpamClassifier, TrainingMode};
pub use corpus::{ClassLabel, Corpus, Document};
pub use error::{ClassifierError, Result};
pub use model::{ClassStatistics, Model, ModelSummary, Vocabulary};
pub use predictor::{log_scores, predict, spam_probability, LogScores, PredictionResult, Verdict};
pub use preprocess::preprocess;
pub use trainer::{train, train_parallel, TrainingStats};
