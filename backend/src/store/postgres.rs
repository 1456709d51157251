use axum::async_trait;
use chrono::{DateTime, Utc};
use shared::shared_wheel_game::{Segment, SpinOutcome, Wheel};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{StoreError, WheelStore};

const MAX_CONNECTIONS: u32 = 5;

/// Postgres-backed store. Segments are kept as a JSONB array on the wheel row.
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct WheelRow {
    id: Uuid,
    title: String,
    segments: Json<Vec<Segment>>,
    is_public: bool,
    owner_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WheelRow> for Wheel {
    fn from(row: WheelRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            segments: row.segments.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_public: row.is_public,
            owner_id: row.owner_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OutcomeRow {
    id: Uuid,
    wheel_id: Uuid,
    segment_id: String,
    segment_label: String,
    spun_at: DateTime<Utc>,
}

impl From<OutcomeRow> for SpinOutcome {
    fn from(row: OutcomeRow) -> Self {
        Self {
            id: row.id,
            wheel_id: row.wheel_id,
            segment_id: row.segment_id,
            segment_label: row.segment_label,
            timestamp: row.spun_at,
        }
    }
}

impl PgStore {
    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Connected to Postgres and applied migrations");
        Ok(Self { pool })
    }
}

#[async_trait]
impl WheelStore for PgStore {
    async fn load_wheel(&self, id: Uuid) -> Result<Option<Wheel>, StoreError> {
        let row = sqlx::query_as::<_, WheelRow>(
            r#"
            SELECT id, title, segments, is_public, owner_id, created_at, updated_at
            FROM wheels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Wheel::from))
    }

    async fn list_wheels(&self, owner: Option<&str>) -> Result<Vec<Wheel>, StoreError> {
        let rows = sqlx::query_as::<_, WheelRow>(
            r#"
            SELECT id, title, segments, is_public, owner_id, created_at, updated_at
            FROM wheels
            WHERE $1::text IS NULL OR owner_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Wheel::from).collect())
    }

    async fn save_wheel(&self, wheel: &Wheel) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO wheels (id, title, segments, is_public, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                segments = EXCLUDED.segments,
                is_public = EXCLUDED.is_public,
                owner_id = EXCLUDED.owner_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(wheel.id)
        .bind(&wheel.title)
        .bind(Json(&wheel.segments))
        .bind(wheel.is_public)
        .bind(&wheel.owner_id)
        .bind(wheel.created_at)
        .bind(wheel.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_wheel(&self, id: Uuid) -> Result<bool, StoreError> {
        // spin_outcomes rows go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM wheels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_outcome(&self, outcome: &SpinOutcome) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO spin_outcomes (id, wheel_id, segment_id, segment_label, spun_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(outcome.id)
        .bind(outcome.wheel_id)
        .bind(&outcome.segment_id)
        .bind(&outcome.segment_label)
        .bind(outcome.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_outcomes(&self, wheel_id: Uuid) -> Result<Vec<SpinOutcome>, StoreError> {
        let rows = sqlx::query_as::<_, OutcomeRow>(
            r#"
            SELECT id, wheel_id, segment_id, segment_label, spun_at
            FROM spin_outcomes
            WHERE wheel_id = $1
            ORDER BY spun_at, id
            "#,
        )
        .bind(wheel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SpinOutcome::from).collect())
    }
}
