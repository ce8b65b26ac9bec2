//! Scoring and decision rule
//!
//! Scores are summed log-probabilities per class. They are converted back to
//! a probability with the exp-normalize trick: subtracting the larger score
//! before exponentiating keeps both terms in `(0, 1]`, so long messages do not
//! underflow to `0 / 0`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::ClassLabel;
use crate::model::Model;
use crate::preprocess::preprocess;

/// `P(spam)` must be strictly greater than this to label a message spam
const DECISION_THRESHOLD: f64 = 0.5;

/// User-facing classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Spam")]
    Spam,
    #[serde(rename = "Not Spam")]
    NotSpam,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Spam => "Spam",
            Verdict::NotSpam => "Not Spam",
        }
    }
}

impl From<ClassLabel> for Verdict {
    fn from(label: ClassLabel) -> Self {
        match label {
            ClassLabel::Spam => Verdict::Spam,
            ClassLabel::Ham => Verdict::NotSpam,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Spam" => Ok(Verdict::Spam),
            "Not Spam" => Ok(Verdict::NotSpam),
            other => Err(format!("unknown verdict: {}", other)),
        }
    }
}

/// Outcome of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Verdict,
    /// Probability of `label` as a percentage in `[50.00, 100.00]`
    pub confidence: f64,
}

/// Log-score of each class for `tokens`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScores {
    pub spam: f64,
    pub ham: f64,
}

impl LogScores {
    /// Normalized `P(spam)` via exp-normalize
    pub fn spam_probability(&self) -> f64 {
        let max = self.spam.max(self.ham);
        let e_spam = (self.spam - max).exp();
        let e_ham = (self.ham - max).exp();
        e_spam / (e_spam + e_ham)
    }
}

/// Prior plus Laplace-smoothed log-likelihood of every token, per class
pub fn log_scores(tokens: &[String], model: &Model) -> LogScores {
    let vocabulary_size = model.vocabulary_size();
    let score = |label: ClassLabel| {
        let stats = model.class(label);
        tokens.iter().fold(model.prior(label).ln(), |acc, token| {
            acc + stats.smoothed_likelihood(token, vocabulary_size).ln()
        })
    };

    LogScores {
        spam: score(ClassLabel::Spam),
        ham: score(ClassLabel::Ham),
    }
}

/// `P(spam | tokens)`
pub fn spam_probability(tokens: &[String], model: &Model) -> f64 {
    log_scores(tokens, model).spam_probability()
}

/// Classify `text` against a trained model
pub fn predict(text: &str, model: &Model) -> PredictionResult {
    let tokens = preprocess(text);
    let scores = log_scores(&tokens, model);
    let p_spam = scores.spam_probability();

    let (label, probability) = if p_spam > DECISION_THRESHOLD {
        (Verdict::Spam, p_spam)
    } else {
        (Verdict::NotSpam, 1.0 - p_spam)
    };

    debug!(
        tokens = tokens.len(),
        spam_score = scores.spam,
        ham_score = scores.ham,
        "Scored message as {}",
        label
    );

    PredictionResult {
        label,
        confidence: round_percentage(probability * 100.0),
    }
}

/// Round to two decimal places
fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
