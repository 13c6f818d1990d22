use crate::entities;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ShareSnapshotsRepository {
    type Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        dishes: Vec<entities::SharedDish>,
    ) -> Result<entities::ShareSnapshot, Self::Error>;

    async fn get_by_id(
        &mut self,
        id: &entities::ShareSnapshotId,
    ) -> Result<Option<entities::ShareSnapshot>, Self::Error>;
}
