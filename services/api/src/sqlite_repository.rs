use async_trait::async_trait;
use chrono::{DateTime, Utc};
use durability::workflows::sustainability::{
    Assessment, Rating, RepositoryError, ScoredRecord, SubmissionId, SubmissionRepository,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::info;

const CREATE_SUBMISSIONS: &str = "create table if not exists submissions (
    id integer primary key autoincrement,
    product_name text not null,
    sustainability_score integer not null,
    rating text not null,
    suggestions text not null,
    created_at text not null
)";

/// Submission history kept in a SQLite database. Suggestions are stored as a
/// JSON array in a text column.
#[derive(Clone)]
pub(crate) struct SqliteSubmissionRepository {
    pool: SqlitePool,
}

impl SqliteSubmissionRepository {
    /// Open (creating if needed) the database at `database_url` and ensure the
    /// `submissions` table exists.
    pub(crate) async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(unavailable)?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty copy.
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        info!(in_memory, "opening submission database");
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(unavailable)?;

        sqlx::query(CREATE_SUBMISSIONS)
            .execute(&pool)
            .await
            .map_err(unavailable)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepository {
    async fn append(&self, assessment: Assessment) -> Result<ScoredRecord, RepositoryError> {
        let suggestions =
            serde_json::to_string(&assessment.suggestions).map_err(unavailable)?;
        let created_at = Utc::now();

        let inserted = sqlx::query(
            "insert into submissions
             (product_name, sustainability_score, rating, suggestions, created_at)
             values (?, ?, ?, ?, ?)",
        )
        .bind(&assessment.product_name)
        .bind(i64::from(assessment.sustainability_score))
        .bind(assessment.rating.label())
        .bind(&suggestions)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        let id = u64::try_from(inserted.last_insert_rowid()).map_err(unavailable)?;

        Ok(ScoredRecord::from_assessment(
            SubmissionId(id),
            assessment,
            created_at,
        ))
    }

    async fn all(&self) -> Result<Vec<ScoredRecord>, RepositoryError> {
        let rows = sqlx::query(
            "select id, product_name, sustainability_score, rating, suggestions, created_at
             from submissions
             order by id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        rows.iter().map(map_submission_row).collect()
    }
}

fn map_submission_row(row: &SqliteRow) -> Result<ScoredRecord, RepositoryError> {
    let raw_id: i64 = row.try_get("id").map_err(unavailable)?;
    let id = SubmissionId(u64::try_from(raw_id).map_err(unavailable)?);
    let corrupted = |reason: String| RepositoryError::Corrupted { id, reason };

    let score: i64 = row
        .try_get("sustainability_score")
        .map_err(|err| corrupted(err.to_string()))?;
    let sustainability_score = u8::try_from(score)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| corrupted(format!("score {score} is out of range")))?;

    let label: String = row
        .try_get("rating")
        .map_err(|err| corrupted(err.to_string()))?;
    let rating =
        Rating::from_label(&label).ok_or_else(|| corrupted(format!("unknown rating '{label}'")))?;

    let suggestions: String = row
        .try_get("suggestions")
        .map_err(|err| corrupted(err.to_string()))?;
    let suggestions: Vec<String> =
        serde_json::from_str(&suggestions).map_err(|err| corrupted(err.to_string()))?;

    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|err| corrupted(err.to_string()))?;

    Ok(ScoredRecord {
        id,
        product_name: row
            .try_get("product_name")
            .map_err(|err| corrupted(err.to_string()))?,
        sustainability_score,
        rating,
        suggestions,
        created_at,
    })
}

fn unavailable(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use durability::workflows::sustainability::{score, ProductInput};

    fn assessment(name: &str, materials: &[&str], transport: &str) -> Assessment {
        score(&ProductInput {
            product_name: name.to_string(),
            materials: materials.iter().map(|material| material.to_string()).collect(),
            weight_grams: 300.0,
            transport: transport.to_string(),
            packaging: "recyclable".to_string(),
        })
        .expect("valid product")
    }

    async fn repository() -> SqliteSubmissionRepository {
        SqliteSubmissionRepository::connect("sqlite::memory:")
            .await
            .expect("in-memory database opens")
    }

    #[tokio::test]
    async fn all_returns_records_in_insertion_order() {
        let repository = repository().await;
        let first = repository
            .append(assessment("Bottle", &["aluminum", "plastic"], "air"))
            .await
            .expect("append");
        let second = repository
            .append(assessment("Crate", &["recycled"], "rail"))
            .await
            .expect("append");

        assert!(second.id > first.id);

        let stored = repository.all().await.expect("read all");
        let names: Vec<_> = stored
            .iter()
            .map(|record| record.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Bottle", "Crate"]);
        assert_eq!(stored[0].id, first.id);
        assert_eq!(stored[1].id, second.id);
        assert!(stored[1].created_at >= stored[0].created_at);
    }

    #[tokio::test]
    async fn suggestions_and_rating_survive_storage() {
        let repository = repository().await;
        let appended = repository
            .append(assessment("Bottle", &["aluminum", "plastic"], "air"))
            .await
            .expect("append");

        let stored = repository.all().await.expect("read all");
        assert_eq!(stored.len(), 1);
        let record = &stored[0];
        assert_eq!(record.sustainability_score, 90);
        assert_eq!(record.rating, Rating::A);
        assert_eq!(
            record.suggestions,
            vec![
                "Avoid using plastic",
                "Consider using recycled aluminum",
                "Avoid air transport"
            ]
        );
        assert_eq!(record.suggestions, appended.suggestions);
    }

    #[tokio::test]
    async fn empty_database_has_no_history() {
        let repository = repository().await;
        assert!(repository.all().await.expect("read all").is_empty());
    }

    #[tokio::test]
    async fn history_survives_reopening_a_database_file() {
        let path = std::env::temp_dir().join(format!(
            "durability-history-{}-{}.db",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let url = format!("sqlite://{}", path.display());

        {
            let repository = SqliteSubmissionRepository::connect(&url)
                .await
                .expect("file database opens");
            repository
                .append(assessment("Bottle", &["plastic"], "road"))
                .await
                .expect("append");
            repository.pool.close().await;
        }

        let reopened = SqliteSubmissionRepository::connect(&url)
            .await
            .expect("file database reopens");
        let stored = reopened.all().await.expect("read all");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].product_name, "Bottle");
        reopened.pool.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn rejects_rows_with_unknown_ratings() {
        let repository = repository().await;
        sqlx::query(
            "insert into submissions
             (product_name, sustainability_score, rating, suggestions, created_at)
             values ('Bottle', 90, 'Z', '[]', '2025-04-01T12:00:00Z')",
        )
        .execute(&repository.pool)
        .await
        .expect("raw insert");

        match repository.all().await {
            Err(RepositoryError::Corrupted { id, reason }) => {
                assert_eq!(id, SubmissionId(1));
                assert!(reason.contains("'Z'"), "{reason}");
            }
            other => panic!("expected corrupted row, got {other:?}"),
        }
    }
}
