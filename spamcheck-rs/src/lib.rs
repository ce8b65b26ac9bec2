//! spamcheck-rs: spam classification service
//!
//! Trains the Naive Bayes classifier from `classifier-rs` once at startup and
//! serves it over HTTP. Every classification submitted through
//! `POST /api/classify` is logged to sqlite and the most recent entries can be
//! listed through `GET /api/history`.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8080"
//!
//! [classifier]
//! corpus_path = "/etc/spamcheck/corpus.json"
//! parallel_training = false
//!
//! [storage]
//! database_url = "sqlite://spamcheck.db"
//!
//! [history]
//! default_limit = 10
//! max_limit = 100
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod server;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use history::{HistoryStore, SpamLog};
pub use server::ApiServer;
