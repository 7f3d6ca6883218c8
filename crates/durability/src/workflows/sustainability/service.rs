use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{ProductInput, ValidationError};
use super::repository::{RepositoryError, ScoredRecord, SubmissionRepository};
use super::scoring::score;
use super::summary::{summarize, SummaryStatistics};

/// Service composing the scorer, the aggregator, and a submission repository.
pub struct SustainabilityService<R> {
    repository: Arc<R>,
}

impl<R> SustainabilityService<R>
where
    R: SubmissionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Score a product and persist the result.
    pub async fn submit(&self, product: ProductInput) -> Result<ScoredRecord, ServiceError> {
        let assessment = score(&product).inspect_err(|err| {
            warn!(product = %product.product_name, error = %err, "rejected product submission");
        })?;

        let record = self.repository.append(assessment).await?;
        info!(
            id = %record.id,
            product = %record.product_name,
            score = record.sustainability_score,
            rating = %record.rating,
            "scored product submission"
        );
        Ok(record)
    }

    pub async fn history(&self) -> Result<Vec<ScoredRecord>, ServiceError> {
        Ok(self.repository.all().await?)
    }

    pub async fn summary(&self) -> Result<SummaryStatistics, ServiceError> {
        let records = self.repository.all().await?;
        Ok(summarize(&records))
    }
}

/// Error raised by the sustainability service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
