use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::sustainability::repository::{
    RepositoryError, ScoredRecord, SubmissionId, SubmissionRepository,
};
use crate::workflows::sustainability::{
    sustainability_router, Assessment, ProductInput, Rating, SustainabilityService,
};

pub(super) fn product(
    materials: &[&str],
    weight_grams: f64,
    transport: &str,
    packaging: &str,
) -> ProductInput {
    ProductInput {
        product_name: "Reusable Bottle".to_string(),
        materials: materials.iter().map(|material| material.to_string()).collect(),
        weight_grams,
        transport: transport.to_string(),
        packaging: packaging.to_string(),
    }
}

/// The canonical example: aluminum + plastic bottle flown in recyclable packaging.
pub(super) fn bottle() -> ProductInput {
    product(&["aluminum", "plastic"], 300.0, "air", "recyclable")
}

pub(super) fn record(id: u64, score: u8, suggestions: &[&str]) -> ScoredRecord {
    ScoredRecord {
        id: SubmissionId(id),
        product_name: format!("product-{id}"),
        sustainability_score: score,
        rating: Rating::from_score(score),
        suggestions: suggestions.iter().map(|text| text.to_string()).collect(),
        created_at: Utc
            .with_ymd_and_hms(2025, 4, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn build_service() -> (SustainabilityService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SustainabilityService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: SustainabilityService<MemoryRepository>) -> axum::Router {
    sustainability_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<ScoredRecord>>>,
}

#[async_trait]
impl SubmissionRepository for MemoryRepository {
    async fn append(&self, assessment: Assessment) -> Result<ScoredRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = SubmissionId(guard.len() as u64 + 1);
        let record = ScoredRecord::from_assessment(id, assessment, Utc::now());
        guard.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<ScoredRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl SubmissionRepository for UnavailableRepository {
    async fn append(&self, _assessment: Assessment) -> Result<ScoredRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn all(&self) -> Result<Vec<ScoredRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
