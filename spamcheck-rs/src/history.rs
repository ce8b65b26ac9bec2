//! Classification history
//!
//! Stores every classified message with its verdict in sqlite and lists the
//! most recent records. Failures here never invalidate a prediction that was
//! already computed.

use chrono::{DateTime, SecondsFormat, Utc};
use classifier_rs::{PredictionResult, Verdict};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, ServiceError};

/// A stored classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamLog {
    /// Unique ID
    pub id: Uuid,
    /// Classified text
    pub message_text: String,
    /// Verdict
    pub label: Verdict,
    /// Confidence percentage
    pub confidence: f64,
    /// Timestamp
    pub created_at: DateTime<Utc>,
}

/// sqlite-backed history of classifications
#[derive(Clone)]
pub struct HistoryStore {
    db: SqlitePool,
}

impl HistoryStore {
    /// Wrap an existing pool
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open a pool for `database_url`, creating the database file if needed
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // every connection to an in-memory database is a separate database
        let in_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!("Connected to history database {}", database_url);
        Ok(Self::new(pool))
    }

    /// Initialize database tables
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS spam_logs (
                id TEXT PRIMARY KEY,
                message_text TEXT NOT NULL,
                label TEXT NOT NULL,
                confidence REAL NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_spam_logs_created_at ON spam_logs (created_at)",
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Store a classification
    pub async fn record(&self, message_text: &str, prediction: &PredictionResult) -> Result<SpamLog> {
        let log = SpamLog {
            id: Uuid::new_v4(),
            message_text: message_text.to_string(),
            label: prediction.label,
            confidence: prediction.confidence,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO spam_logs (id, message_text, label, confidence, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.id.to_string())
        .bind(&log.message_text)
        .bind(log.label.as_str())
        .bind(log.confidence)
        .bind(log.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.db)
        .await?;

        debug!("Recorded {} ({}%) as {}", log.label, log.confidence, log.id);
        Ok(log)
    }

    /// Most recent records, newest first
    pub async fn recent(&self, limit: u32) -> Result<Vec<SpamLog>> {
        let rows = sqlx::query_as::<_, (String, String, String, f64, String)>(
            r#"
            SELECT id, message_text, label, confidence, created_at
            FROM spam_logs
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|(id, message_text, label, confidence, created_at)| -> Result<SpamLog> {
                Ok(SpamLog {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| ServiceError::Storage(format!("Invalid id: {}", e)))?,
                    label: Verdict::from_str(&label).map_err(ServiceError::Storage)?,
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map_err(|e| ServiceError::Storage(format!("Invalid timestamp: {}", e)))?
                        .with_timezone(&Utc),
                    message_text,
                    confidence,
                })
            })
            .collect()
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM spam_logs")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}
