use crate::entities;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait DishEntriesRepository {
    type Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        name: entities::DishName,
        origin: entities::DishOrigin,
    ) -> Result<entities::DishEntry, Self::Error>;

    /// All entries in creation order.
    async fn list_all(&mut self) -> Result<Vec<entities::DishEntry>, Self::Error>;

    async fn get_by_id(
        &mut self,
        id: &entities::DishEntryId,
    ) -> Result<Option<entities::DishEntry>, Self::Error>;

    /// Fails when the entry is missing or not owned by `user_id`.
    async fn delete(
        &mut self,
        user_id: entities::UserId,
        id: &entities::DishEntryId,
    ) -> Result<(), Self::Error>;
}
