use super::{DishName, DishOrigin, UserId};
use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};

/// Identifier assigned by the entry store. Opaque to this crate.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into, Display)]
pub struct DishEntryId(String);

impl DishEntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DishEntry {
    pub id: DishEntryId,
    pub name: DishName,
    pub origin: DishOrigin,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
