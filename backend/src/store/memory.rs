use std::collections::HashMap;

use axum::async_trait;
use shared::shared_wheel_game::{SpinOutcome, Wheel};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, WheelStore};

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    wheels: RwLock<HashMap<Uuid, Wheel>>,
    outcomes: RwLock<Vec<SpinOutcome>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WheelStore for MemoryStore {
    async fn load_wheel(&self, id: Uuid) -> Result<Option<Wheel>, StoreError> {
        Ok(self.wheels.read().await.get(&id).cloned())
    }

    async fn list_wheels(&self, owner: Option<&str>) -> Result<Vec<Wheel>, StoreError> {
        let wheels = self.wheels.read().await;
        let mut listed: Vec<Wheel> = wheels
            .values()
            .filter(|wheel| owner.map_or(true, |owner| wheel.owner_id.as_deref() == Some(owner)))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn save_wheel(&self, wheel: &Wheel) -> Result<(), StoreError> {
        self.wheels.write().await.insert(wheel.id, wheel.clone());
        Ok(())
    }

    async fn delete_wheel(&self, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.wheels.write().await.remove(&id).is_some();
        if removed {
            self.outcomes.write().await.retain(|outcome| outcome.wheel_id != id);
        }
        Ok(removed)
    }

    async fn append_outcome(&self, outcome: &SpinOutcome) -> Result<(), StoreError> {
        self.outcomes.write().await.push(outcome.clone());
        Ok(())
    }

    async fn list_outcomes(&self, wheel_id: Uuid) -> Result<Vec<SpinOutcome>, StoreError> {
        Ok(self
            .outcomes
            .read()
            .await
            .iter()
            .filter(|outcome| outcome.wheel_id == wheel_id)
            .cloned()
            .collect())
    }
}
