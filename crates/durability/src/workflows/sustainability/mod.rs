//! Product sustainability scoring, submission history, and aggregate statistics.
//!
//! `scoring::score` and `summary::summarize` are pure; the service and router
//! wrap them around a caller-provided [`SubmissionRepository`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use domain::{
    NormalizedProduct, Packaging, ProductField, ProductInput, Rating, Transport, ValidationError,
    ValidationReason,
};
pub use repository::{
    RepositoryError, ScoreView, ScoredRecord, SubmissionId, SubmissionRepository,
};
pub use router::sustainability_router;
pub use scoring::{score, Assessment, RuleKind, ScoreComponent};
pub use service::{ServiceError, SustainabilityService};
pub use summary::{rank_issues, summarize, SummaryStatistics, DEFAULT_TOP_ISSUES};
