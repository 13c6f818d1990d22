use super::{DishEntry, UserId};
use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Hash, From, Into, Display)]
pub struct ShareSnapshotId(String);

impl ShareSnapshotId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The part of an entry that is allowed to leave the store in a share link.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SharedDish {
    pub name: String,
    pub origin: String,
}

impl From<&DishEntry> for SharedDish {
    fn from(entry: &DishEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            origin: entry.origin.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSnapshot {
    pub id: ShareSnapshotId,
    pub dishes: Vec<SharedDish>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
