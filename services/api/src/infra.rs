use async_trait::async_trait;
use chrono::Utc;
use durability::workflows::sustainability::{
    Assessment, RepositoryError, ScoredRecord, SubmissionId, SubmissionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local submission history. Ids are assigned under the same lock as the
/// append so concurrent submissions never share an id or observe a torn record.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<Vec<ScoredRecord>>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn append(&self, assessment: Assessment) -> Result<ScoredRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        let id = SubmissionId(guard.len() as u64 + 1);
        let record = ScoredRecord::from_assessment(id, assessment, Utc::now());
        guard.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<ScoredRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}
