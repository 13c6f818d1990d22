use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::{entities, ports};

const DISHES_FILE: &str = "dishes.json";
const SHARE_SNAPSHOTS_FILE: &str = "share_snapshots.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DishEntryModel {
    id: String,
    name: String,
    origin: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl DishEntryModel {
    pub fn into_entity(self) -> anyhow::Result<entities::DishEntry> {
        Ok(entities::DishEntry {
            id: entities::DishEntryId::from(self.id),
            name: entities::DishName::try_from(self.name).context("stored name")?,
            origin: entities::DishOrigin::try_from(self.origin).context("stored origin")?,
            user_id: entities::UserId::from(self.user_id),
            created_at: self.created_at,
        })
    }
}

impl From<&entities::DishEntry> for DishEntryModel {
    fn from(entry: &entities::DishEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            origin: entry.origin.to_string(),
            user_id: entry.user_id.to_string(),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShareSnapshotModel {
    id: String,
    dishes: Vec<entities::SharedDish>,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl From<ShareSnapshotModel> for entities::ShareSnapshot {
    fn from(model: ShareSnapshotModel) -> Self {
        entities::ShareSnapshot {
            id: entities::ShareSnapshotId::from(model.id),
            dishes: model.dishes,
            user_id: entities::UserId::from(model.user_id),
            created_at: model.created_at,
        }
    }
}

/// Store kept as JSON files in one directory, shared by every run on this machine.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> anyhow::Result<Vec<T>> {
        let path = self.dir.join(file);
        match fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw)
                .with_context(|| format!("parse {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn save<T: Serialize>(&self, file: &str, records: &[T]) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create {}", self.dir.display()))?;
        let path = self.dir.join(file);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)
            .with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replace {}", path.display()))
    }
}

#[async_trait]
impl ports::DishEntriesRepository for FileStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        name: entities::DishName,
        origin: entities::DishOrigin,
    ) -> Result<entities::DishEntry, Self::Error> {
        let mut models = self.load::<DishEntryModel>(DISHES_FILE)?;
        let entry = entities::DishEntry {
            id: entities::DishEntryId::from(Ulid::new().to_string()),
            name,
            origin,
            user_id,
            created_at: now,
        };
        models.push(DishEntryModel::from(&entry));
        self.save(DISHES_FILE, &models)?;
        Ok(entry)
    }

    async fn list_all(&mut self) -> Result<Vec<entities::DishEntry>, Self::Error> {
        self.load::<DishEntryModel>(DISHES_FILE)?
            .into_iter()
            .map(DishEntryModel::into_entity)
            .collect()
    }

    async fn get_by_id(
        &mut self,
        id: &entities::DishEntryId,
    ) -> Result<Option<entities::DishEntry>, Self::Error> {
        self.load::<DishEntryModel>(DISHES_FILE)?
            .into_iter()
            .find(|m| m.id == id.as_str())
            .map(DishEntryModel::into_entity)
            .transpose()
    }

    async fn delete(
        &mut self,
        user_id: entities::UserId,
        id: &entities::DishEntryId,
    ) -> Result<(), Self::Error> {
        let mut models = self.load::<DishEntryModel>(DISHES_FILE)?;
        let position = models
            .iter()
            .position(|m| m.id == id.as_str() && m.user_id == user_id.as_str())
            .ok_or_else(|| anyhow!("dish {} not found or not owned", id))?;
        models.remove(position);
        self.save(DISHES_FILE, &models)
    }
}

#[async_trait]
impl ports::ShareSnapshotsRepository for FileStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        dishes: Vec<entities::SharedDish>,
    ) -> Result<entities::ShareSnapshot, Self::Error> {
        let mut models = self.load::<ShareSnapshotModel>(SHARE_SNAPSHOTS_FILE)?;
        let model = ShareSnapshotModel {
            id: Ulid::new().to_string(),
            dishes,
            user_id: user_id.to_string(),
            created_at: now,
        };
        models.push(model.clone());
        self.save(SHARE_SNAPSHOTS_FILE, &models)?;
        Ok(entities::ShareSnapshot::from(model))
    }

    async fn get_by_id(
        &mut self,
        id: &entities::ShareSnapshotId,
    ) -> Result<Option<entities::ShareSnapshot>, Self::Error> {
        Ok(self
            .load::<ShareSnapshotModel>(SHARE_SNAPSHOTS_FILE)?
            .into_iter()
            .find(|m| m.id == id.as_str())
            .map(entities::ShareSnapshot::from))
    }
}
