//! Persistence boundary for wheels and spin outcomes.
//!
//! The spin engine never touches storage. Handlers load a wheel through a
//! [`WheelStore`], hand its segments to the engine and append the outcome.

use axum::async_trait;
use shared::shared_wheel_game::{SpinOutcome, Wheel};
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait WheelStore: Send + Sync {
    async fn load_wheel(&self, id: Uuid) -> Result<Option<Wheel>, StoreError>;

    /// All wheels, oldest first, optionally narrowed to one owner.
    async fn list_wheels(&self, owner: Option<&str>) -> Result<Vec<Wheel>, StoreError>;

    /// Inserts or replaces the wheel with the same id.
    async fn save_wheel(&self, wheel: &Wheel) -> Result<(), StoreError>;

    /// Removes the wheel and its recorded outcomes. Returns false if it did not exist.
    async fn delete_wheel(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn append_outcome(&self, outcome: &SpinOutcome) -> Result<(), StoreError>;

    /// Outcomes of one wheel in the order they were recorded.
    async fn list_outcomes(&self, wheel_id: Uuid) -> Result<Vec<SpinOutcome>, StoreError>;
}
