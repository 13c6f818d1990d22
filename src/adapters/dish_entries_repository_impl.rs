use std::time::SystemTime;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Acquire, Postgres};
use ulid::Ulid;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
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

#[derive(Debug, Clone)]
pub struct DishEntriesRepositoryImpl<A> {
    db: A,
}

impl<A> DishEntriesRepositoryImpl<A> {
    pub fn new(db: A) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<A> ports::DishEntriesRepository for DishEntriesRepositoryImpl<A>
where
    A: Send + Sync,
    for<'c> &'c A: Acquire<'c, Database = Postgres>,
{
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        user_id: entities::UserId,
        now: DateTime<Utc>,
        name: entities::DishName,
        origin: entities::DishOrigin,
    ) -> Result<entities::DishEntry, Self::Error> {
        let mut trx = self.db.begin().await?;
        let entry = entities::DishEntry {
            id: entities::DishEntryId::from(
                Ulid::from_datetime(SystemTime::from(now)).to_string(),
            ),
            name,
            origin,
            user_id,
            created_at: now,
        };

        sqlx::query(
            r#"
                INSERT INTO dishes (id, name, origin, user_id, created_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.as_str())
        .bind(entry.name.as_str())
        .bind(entry.origin.as_str())
        .bind(entry.user_id.as_str())
        .bind(entry.created_at)
        .execute(&mut *trx)
        .await
        .context("insert dishes")?;

        trx.commit().await?;
        Ok(entry)
    }

    async fn list_all(&mut self) -> Result<Vec<entities::DishEntry>, Self::Error> {
        let mut conn = self.db.acquire().await?;
        let models = sqlx::query_as::<_, DishEntryModel>(
            r#"
            SELECT
                id,
                name,
                origin,
                user_id,
                created_at
            FROM
                dishes
            ORDER BY
                created_at, id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .context("fetch dishes")?;

        models
            .into_iter()
            .map(DishEntryModel::into_entity)
            .collect()
    }

    async fn get_by_id(
        &mut self,
        id: &entities::DishEntryId,
    ) -> Result<Option<entities::DishEntry>, Self::Error> {
        let mut conn = self.db.acquire().await?;
        let model = sqlx::query_as::<_, DishEntryModel>(
            r#"
            SELECT
                id,
                name,
                origin,
                user_id,
                created_at
            FROM
                dishes
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await
        .context("fetch dish")?;

        model.map(DishEntryModel::into_entity).transpose()
    }

    async fn delete(
        &mut self,
        user_id: entities::UserId,
        id: &entities::DishEntryId,
    ) -> Result<(), Self::Error> {
        let mut trx = self.db.begin().await?;
        let result = sqlx::query(
            r#"
            DELETE FROM dishes
                WHERE
                    id = $1
                    AND
                    user_id = $2
            "#,
        )
        .bind(id.as_str())
        .bind(user_id.as_str())
        .execute(&mut *trx)
        .await
        .context("delete dish")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("dish {} not found or not owned", id));
        }

        trx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;
    use crate::ports::DishEntriesRepository;

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_dish_entries_repository(pool: sqlx::PgPool) {
        let mut repo = DishEntriesRepositoryImpl::new(pool);
        let owner = entities::UserId::from("owner".to_string());
        let other = entities::UserId::from("other".to_string());

        // DBと時刻の精度が違う
        let now = Utc::now().with_nanosecond(0).unwrap();

        let entry = repo
            .create(
                owner.clone(),
                now,
                entities::DishName::try_from("黒豆").unwrap(),
                entities::DishOrigin::try_from("まめに暮らせるように").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(entry.created_at, now);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![entry.clone()]);

        let fetched = repo.get_by_id(&entry.id).await.unwrap();
        assert_eq!(fetched, Some(entry.clone()));

        assert!(repo.delete(other, &entry.id).await.is_err());
        repo.delete(owner.clone(), &entry.id).await.unwrap();
        assert_eq!(repo.get_by_id(&entry.id).await.unwrap(), None);
        assert!(repo.delete(owner, &entry.id).await.is_err());
    }
}
