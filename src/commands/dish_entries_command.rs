use chrono::{DateTime, Utc};

use crate::app_ctx::SessionCtx;
use crate::ownership_ledger::OwnershipLedger;
use crate::{entities, ports, AppError};

/// Answer to "delete this dish?". Only an explicit yes deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Dismissed,
}

impl Confirmation {
    /// Parses a prompt answer. Anything unrecognized counts as a dismissal.
    pub fn from_answer(answer: Option<&str>) -> Self {
        match answer.map(|a| a.trim().to_lowercase()).as_deref() {
            Some("y" | "yes" | "はい") => Confirmation::Yes,
            Some("n" | "no" | "いいえ") => Confirmation::No,
            _ => Confirmation::Dismissed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(entities::DishEntryId),
    Cancelled,
}

pub async fn submit_dish<R, S>(
    repo: &mut R,
    ledger: &mut OwnershipLedger<S>,
    session: &SessionCtx,
    now: DateTime<Utc>,
    name: &str,
    origin: &str,
) -> Result<entities::DishEntry, AppError>
where
    R: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::LocalStorage,
    S::Error: Into<anyhow::Error>,
{
    let name = entities::DishName::try_from(name)?;
    let origin = entities::DishOrigin::try_from(origin)?;
    let user_id = session.user_id.clone().ok_or(AppError::Unauthenticated)?;

    let entry = repo.create(user_id, now, name, origin).await?;
    log::info!("dish added: {} ({})", entry.name, entry.id);

    if let Err(e) = ledger.record(&entry.id) {
        // the entry exists upstream; only the "my posts" view misses it
        log::warn!("failed to record {} in ownership ledger: {:#}", entry.id, e);
    }
    Ok(entry)
}

pub async fn delete_dish<R, S>(
    repo: &mut R,
    ledger: &mut OwnershipLedger<S>,
    session: &SessionCtx,
    id: &entities::DishEntryId,
    confirmation: Confirmation,
) -> Result<DeleteOutcome, AppError>
where
    R: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::LocalStorage,
    S::Error: Into<anyhow::Error>,
{
    if confirmation != Confirmation::Yes {
        log::info!("deletion of {} cancelled ({:?})", id, confirmation);
        return Ok(DeleteOutcome::Cancelled);
    }
    let user_id = session.user_id.clone().ok_or(AppError::Unauthenticated)?;

    let deleted = repo.delete(user_id, id).await;

    // the ledger drops the id whatever the store answered
    if let Err(e) = ledger.forget(id) {
        log::warn!("failed to forget {} from ownership ledger: {:#}", id, e);
    }

    deleted?;
    log::info!("dish deleted: {}", id);
    Ok(DeleteOutcome::Deleted(id.clone()))
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::adapters::{MemoryLocalStorage, MemoryStore};
    use crate::ports::DishEntriesRepository;

    /// Fails the test on any store access.
    struct UntouchableStore;

    #[async_trait]
    impl DishEntriesRepository for UntouchableStore {
        type Error = anyhow::Error;

        async fn create(
            &mut self,
            _: entities::UserId,
            _: DateTime<Utc>,
            _: entities::DishName,
            _: entities::DishOrigin,
        ) -> anyhow::Result<entities::DishEntry> {
            panic!("store must not be called")
        }

        async fn list_all(&mut self) -> anyhow::Result<Vec<entities::DishEntry>> {
            panic!("store must not be called")
        }

        async fn get_by_id(
            &mut self,
            _: &entities::DishEntryId,
        ) -> anyhow::Result<Option<entities::DishEntry>> {
            panic!("store must not be called")
        }

        async fn delete(
            &mut self,
            _: entities::UserId,
            _: &entities::DishEntryId,
        ) -> anyhow::Result<()> {
            Err(anyhow!("store must not be called"))
        }
    }

    fn session(user: &str) -> SessionCtx {
        SessionCtx::signed_in(entities::UserId::from(user.to_string()))
    }

    #[test]
    fn test_confirmation_from_answer() {
        assert_eq!(Confirmation::from_answer(Some("y")), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer(Some(" YES\n")), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer(Some("はい")), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer(Some("n")), Confirmation::No);
        assert_eq!(Confirmation::from_answer(Some("")), Confirmation::Dismissed);
        assert_eq!(Confirmation::from_answer(None), Confirmation::Dismissed);
    }

    #[tokio::test]
    async fn test_submit_records_in_ledger() {
        let mut store = MemoryStore::new();
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());

        let entry = submit_dish(
            &mut store,
            &mut ledger,
            &session("me"),
            Utc::now(),
            " 栗きんとん ",
            "金運",
        )
        .await
        .unwrap();

        assert_eq!(entry.name.as_str(), "栗きんとん");
        assert_eq!(entry.user_id.as_str(), "me");
        assert_eq!(ledger.list().unwrap(), vec![entry.id.clone()]);
        assert_eq!(store.list_all().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn test_validation_happens_before_store_call() {
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let long_name = "あ".repeat(16);
        let long_origin = "い".repeat(31);

        for (name, origin) in [
            (long_name.as_str(), "金運"),
            ("栗きんとん", long_origin.as_str()),
            ("", "金運"),
            ("栗きんとん", "  "),
        ] {
            let err = submit_dish(
                &mut UntouchableStore,
                &mut ledger,
                &session("me"),
                Utc::now(),
                name,
                origin,
            )
            .await
            .unwrap_err();
            assert!(err.is_validation(), "{:?}", err);
        }
        assert!(ledger.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let err = submit_dish(
            &mut UntouchableStore,
            &mut ledger,
            &SessionCtx::unauthenticated(),
            Utc::now(),
            "黒豆",
            "豆",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_delete_needs_explicit_yes() {
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let id = entities::DishEntryId::from("some-id".to_string());

        for confirmation in [Confirmation::No, Confirmation::Dismissed] {
            let outcome = delete_dish(
                &mut UntouchableStore,
                &mut ledger,
                &session("me"),
                &id,
                confirmation,
            )
            .await
            .unwrap();
            assert_eq!(outcome, DeleteOutcome::Cancelled);
        }
    }

    #[tokio::test]
    async fn test_delete_own_dish() {
        let mut store = MemoryStore::new();
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let me = session("me");
        let entry = submit_dish(&mut store, &mut ledger, &me, Utc::now(), "田作り", "小魚")
            .await
            .unwrap();

        let outcome = delete_dish(&mut store, &mut ledger, &me, &entry.id, Confirmation::Yes)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(entry.id.clone()));
        assert!(ledger.list().unwrap().is_empty());
        assert!(store.list_all().await.unwrap().is_empty());

        // a second delete of the same id is rejected by the store
        let err = delete_dish(&mut store, &mut ledger, &me, &entry.id, Confirmation::Yes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Collaborator(_)));
    }

    #[tokio::test]
    async fn test_rejected_delete_still_clears_ledger() {
        let mut store = MemoryStore::new();
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let id = entities::DishEntryId::from("gone-upstream".to_string());
        ledger.record(&id).unwrap();

        let err = delete_dish(&mut store, &mut ledger, &session("me"), &id, Confirmation::Yes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Collaborator(_)));
        assert!(ledger.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_foreign_dish_is_rejected() {
        let mut store = MemoryStore::new();
        let mut owner_ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let entry = submit_dish(
            &mut store,
            &mut owner_ledger,
            &session("owner"),
            Utc::now(),
            "数の子",
            "子孫繁栄",
        )
        .await
        .unwrap();

        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        let err = delete_dish(
            &mut store,
            &mut ledger,
            &session("stranger"),
            &entry.id,
            Confirmation::Yes,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Collaborator(_)));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
