use crate::ownership_ledger::OwnershipLedger;
use crate::{entities, ports, AppError};

pub async fn load_all_dishes<R>(repo: &mut R) -> Result<Vec<entities::DishEntry>, AppError>
where
    R: ports::DishEntriesRepository<Error = anyhow::Error>,
{
    Ok(repo.list_all().await?)
}

/// Dishes this client created, in ledger order.
///
/// Ledger ids whose entry is gone upstream are dropped from the ledger.
pub async fn load_my_dishes<R, S>(
    repo: &mut R,
    ledger: &mut OwnershipLedger<S>,
) -> Result<Vec<entities::DishEntry>, AppError>
where
    R: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::LocalStorage,
    S::Error: Into<anyhow::Error>,
{
    let ids = ledger.list()?;
    let mut dishes = Vec::with_capacity(ids.len());
    let mut stale = Vec::new();

    for id in ids {
        match repo.get_by_id(&id).await? {
            Some(dish) => dishes.push(dish),
            None => stale.push(id),
        }
    }

    for id in &stale {
        log::info!("pruning deleted dish {} from ownership ledger", id);
        ledger.forget(id)?;
    }
    Ok(dishes)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::adapters::{MemoryLocalStorage, MemoryStore};
    use crate::ports::DishEntriesRepository;

    async fn add(store: &mut MemoryStore, user: &str, name: &str) -> entities::DishEntry {
        store
            .create(
                entities::UserId::from(user.to_string()),
                Utc::now(),
                entities::DishName::try_from(name).unwrap(),
                entities::DishOrigin::try_from("縁起物").unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_all_dishes() {
        let mut store = MemoryStore::new();
        assert!(load_all_dishes(&mut store).await.unwrap().is_empty());

        let a = add(&mut store, "u1", "煮しめ").await;
        let b = add(&mut store, "u2", "たたきごぼう").await;
        assert_eq!(load_all_dishes(&mut store).await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_my_dishes_follow_ledger_and_prune_deleted() {
        let mut store = MemoryStore::new();
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());

        let mine_1 = add(&mut store, "me", "なます").await;
        let _theirs = add(&mut store, "them", "ぶり").await;
        let mine_2 = add(&mut store, "me", "鯛").await;
        ledger.record(&mine_2.id).unwrap();
        ledger.record(&mine_1.id).unwrap();

        let dishes = load_my_dishes(&mut store, &mut ledger).await.unwrap();
        assert_eq!(dishes, vec![mine_2.clone(), mine_1.clone()]);

        // deleted upstream, e.g. from another tab
        store
            .delete(entities::UserId::from("me".to_string()), &mine_2.id)
            .await
            .unwrap();

        let dishes = load_my_dishes(&mut store, &mut ledger).await.unwrap();
        assert_eq!(dishes, vec![mine_1.clone()]);
        assert_eq!(ledger.list().unwrap(), vec![mine_1.id]);
    }
}
