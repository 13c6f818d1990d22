use std::time::SystemTime;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Acquire, Postgres};
use ulid::Ulid;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct ShareSnapshotModel {
    id: String,
    dishes: Json<Vec<entities::SharedDish>>,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl From<ShareSnapshotModel> for entities::ShareSnapshot {
    fn from(model: ShareSnapshotModel) -> Self {
        entities::ShareSnapshot {
            id: entities::ShareSnapshotId::from(model.id),
            dishes: model.dishes.0,
            user_id: entities::UserId::from(model.user_id),
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShareSnapshotsRepositoryImpl<A> {
    db: A,
}

impl<A> ShareSnapshotsRepositoryImpl<A> {
    pub fn new(db: A) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<A> ports::ShareSnapshotsRepository for ShareSnapshotsRepositoryImpl<A>
where
    A: Send + Sync,
    for<'c> &'c A: Acquire<'c, Database = Postgres>,
{
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        dishes: Vec<entities::SharedDish>,
    ) -> Result<entities::ShareSnapshot, Self::Error> {
        let mut trx = self.db.begin().await?;
        let snapshot = entities::ShareSnapshot {
            id: entities::ShareSnapshotId::from(
                Ulid::from_datetime(SystemTime::from(now)).to_string(),
            ),
            dishes,
            user_id,
            created_at: now,
        };

        sqlx::query(
            r#"
                INSERT INTO share_snapshots (id, dishes, user_id, created_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(snapshot.id.as_str())
        .bind(Json(&snapshot.dishes))
        .bind(snapshot.user_id.as_str())
        .bind(snapshot.created_at)
        .execute(&mut *trx)
        .await
        .context("insert share_snapshots")?;

        trx.commit().await?;
        Ok(snapshot)
    }

    async fn get_by_id(
        &mut self,
        id: &entities::ShareSnapshotId,
    ) -> Result<Option<entities::ShareSnapshot>, Self::Error> {
        let mut conn = self.db.acquire().await?;
        let model = sqlx::query_as::<_, ShareSnapshotModel>(
            r#"
            SELECT
                id,
                dishes,
                user_id,
                created_at
            FROM
                share_snapshots
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await
        .context("fetch share_snapshot")?;

        Ok(model.map(entities::ShareSnapshot::from))
    }
}
