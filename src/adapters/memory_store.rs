use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ulid::Ulid;

use crate::{entities, ports};

#[derive(Debug, Default)]
struct Collections {
    dishes: Vec<entities::DishEntry>,
    share_snapshots: HashMap<entities::ShareSnapshotId, entities::ShareSnapshot>,
}

/// Process-local store. Clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| anyhow!("memory store poisoned"))
    }
}

#[async_trait]
impl ports::DishEntriesRepository for MemoryStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        name: entities::DishName,
        origin: entities::DishOrigin,
    ) -> Result<entities::DishEntry, Self::Error> {
        let entry = entities::DishEntry {
            id: entities::DishEntryId::from(Ulid::new().to_string()),
            name,
            origin,
            user_id,
            created_at: now,
        };
        self.lock()?.dishes.push(entry.clone());
        Ok(entry)
    }

    async fn list_all(&mut self) -> Result<Vec<entities::DishEntry>, Self::Error> {
        Ok(self.lock()?.dishes.clone())
    }

    async fn get_by_id(
        &mut self,
        id: &entities::DishEntryId,
    ) -> Result<Option<entities::DishEntry>, Self::Error> {
        Ok(self.lock()?.dishes.iter().find(|d| &d.id == id).cloned())
    }

    async fn delete(
        &mut self,
        user_id: entities::UserId,
        id: &entities::DishEntryId,
    ) -> Result<(), Self::Error> {
        let mut collections = self.lock()?;
        let position = collections
            .dishes
            .iter()
            .position(|d| &d.id == id && d.user_id == user_id)
            .ok_or_else(|| anyhow!("dish {} not found or not owned", id))?;
        collections.dishes.remove(position);
        Ok(())
    }
}

#[async_trait]
impl ports::ShareSnapshotsRepository for MemoryStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        dishes: Vec<entities::SharedDish>,
    ) -> Result<entities::ShareSnapshot, Self::Error> {
        let snapshot = entities::ShareSnapshot {
            id: entities::ShareSnapshotId::from(Ulid::new().to_string()),
            dishes,
            user_id,
            created_at: now,
        };
        self.lock()?
            .share_snapshots
            .insert(snapshot.id.clone(), snapshot.clone());
        Ok(snapshot)
    }

    async fn get_by_id(
        &mut self,
        id: &entities::ShareSnapshotId,
    ) -> Result<Option<entities::ShareSnapshot>, Self::Error> {
        Ok(self.lock()?.share_snapshots.get(id).cloned())
    }
}
