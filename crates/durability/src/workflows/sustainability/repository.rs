use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Rating;
use super::scoring::Assessment;

/// Identifier assigned by the repository on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{:06}", self.0)
    }
}

/// Stored, immutable result of scoring one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: SubmissionId,
    pub product_name: String,
    pub sustainability_score: u8,
    pub rating: Rating,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ScoredRecord {
    pub fn from_assessment(
        id: SubmissionId,
        assessment: Assessment,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_name: assessment.product_name,
            sustainability_score: assessment.sustainability_score,
            rating: assessment.rating,
            suggestions: assessment.suggestions,
            created_at,
        }
    }

    pub fn score_view(&self) -> ScoreView {
        ScoreView {
            product_name: self.product_name.clone(),
            sustainability_score: self.sustainability_score,
            rating: self.rating,
            suggestions: self.suggestions.clone(),
        }
    }
}

/// Append-only storage for scored submissions.
///
/// Implementations must make an append visible to every `all` call that starts
/// after it returns, and must never expose a partially written record.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn append(&self, assessment: Assessment) -> Result<ScoredRecord, RepositoryError>;
    /// Every stored record, in insertion order.
    async fn all(&self) -> Result<Vec<ScoredRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored submission {id} is unreadable: {reason}")]
    Corrupted { id: SubmissionId, reason: String },
}

/// Public shape of a freshly scored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub product_name: String,
    pub sustainability_score: u8,
    pub rating: Rating,
    pub suggestions: Vec<String>,
}
