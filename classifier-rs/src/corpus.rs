//! Labeled training corpus
//!
//! The corpus is a static, versioned asset with the schema
//! `[{"text": "...", "label": "spam" | "ham"}]`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Builtin corpus compiled into the binary
const BUILTIN_CORPUS: &str = include_str!("../data/corpus.json");

/// Class of a training document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    Spam,
    Ham,
}

impl ClassLabel {
    /// Both labels, in scoring order
    pub const ALL: [ClassLabel; 2] = [ClassLabel::Spam, ClassLabel::Ham];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Spam => "spam",
            ClassLabel::Ham => "ham",
        }
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled training message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub label: ClassLabel,
}

impl Document {
    pub fn new(text: impl Into<String>, label: ClassLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn spam(text: impl Into<String>) -> Self {
        Self::new(text, ClassLabel::Spam)
    }

    pub fn ham(text: impl Into<String>) -> Self {
        Self::new(text, ClassLabel::Ham)
    }
}

/// Ordered sequence of labeled documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The corpus shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CORPUS)
    }

    /// Parse a corpus from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a corpus asset from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents carrying `label`
    pub fn count(&self, label: ClassLabel) -> usize {
        self.documents.iter().filter(|d| d.label == label).count()
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
