//! Ids of the dish entries created from this client.
//!
//! The ledger only personalizes the "my posts" view. Ownership itself is
//! checked by the store on delete.

use anyhow::Context;

use crate::{entities, ports};

pub const MY_DISH_IDS_KEY: &str = "osechi-gacha.my-dish-ids";

#[derive(Debug, Clone)]
pub struct OwnershipLedger<S> {
    storage: S,
}

impl<S> OwnershipLedger<S>
where
    S: ports::LocalStorage,
    S::Error: Into<anyhow::Error>,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> anyhow::Result<Vec<entities::DishEntryId>> {
        let raw = self
            .storage
            .get_item(MY_DISH_IDS_KEY)
            .map_err(Into::<anyhow::Error>::into)
            .context("read ownership ledger")?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Ok(ids.into_iter().map(entities::DishEntryId::from).collect()),
            Err(e) => {
                log::warn!("ownership ledger is unreadable, starting over: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub fn record(&mut self, id: &entities::DishEntryId) -> anyhow::Result<()> {
        let mut ids = self.list()?;
        ids.push(id.clone());
        self.save(&ids)
    }

    /// Removes the first occurrence of `id`. Absent ids are ignored.
    pub fn forget(&mut self, id: &entities::DishEntryId) -> anyhow::Result<()> {
        let mut ids = self.list()?;
        let Some(position) = ids.iter().position(|x| x == id) else {
            return Ok(());
        };
        ids.remove(position);
        self.save(&ids)
    }

    fn save(&mut self, ids: &[entities::DishEntryId]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return self
                .storage
                .remove_item(MY_DISH_IDS_KEY)
                .map_err(Into::<anyhow::Error>::into)
                .context("clear ownership ledger");
        }

        let raw = serde_json::to_string(&ids.iter().map(|id| id.as_str()).collect::<Vec<_>>())?;
        self.storage
            .set_item(MY_DISH_IDS_KEY, &raw)
            .map_err(Into::<anyhow::Error>::into)
            .context("write ownership ledger")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryLocalStorage;
    use crate::ports::LocalStorage;

    fn id(s: &str) -> entities::DishEntryId {
        entities::DishEntryId::from(s.to_string())
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        assert!(ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_record_keeps_order_and_duplicates() {
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        ledger.record(&id("b")).unwrap();
        ledger.record(&id("a")).unwrap();
        ledger.record(&id("b")).unwrap();
        assert_eq!(ledger.list().unwrap(), vec![id("b"), id("a"), id("b")]);
    }

    #[test]
    fn test_forget() {
        let mut ledger = OwnershipLedger::new(MemoryLocalStorage::new());
        ledger.record(&id("x")).unwrap();
        ledger.record(&id("y")).unwrap();

        ledger.forget(&id("x")).unwrap();
        assert_eq!(ledger.list().unwrap(), vec![id("y")]);

        // forgetting an absent id is a no-op
        ledger.forget(&id("x")).unwrap();
        ledger.forget(&id("never")).unwrap();
        assert_eq!(ledger.list().unwrap(), vec![id("y")]);
    }

    #[test]
    fn test_persisted_immediately() {
        let storage = MemoryLocalStorage::new();
        let mut ledger = OwnershipLedger::new(storage.clone());
        ledger.record(&id("z")).unwrap();

        assert_eq!(
            storage.get_item(MY_DISH_IDS_KEY).unwrap().as_deref(),
            Some("[\"z\"]")
        );
        assert_eq!(
            OwnershipLedger::new(storage.clone()).list().unwrap(),
            vec![id("z")]
        );

        // forgetting the last id clears the key
        ledger.forget(&id("z")).unwrap();
        assert_eq!(storage.get_item(MY_DISH_IDS_KEY).unwrap(), None);
        assert!(ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_ledger_is_treated_as_empty() {
        let mut storage = MemoryLocalStorage::new();
        storage.set_item(MY_DISH_IDS_KEY, "{not json").unwrap();
        let mut ledger = OwnershipLedger::new(storage);

        assert!(ledger.list().unwrap().is_empty());
        ledger.record(&id("fresh")).unwrap();
        assert_eq!(ledger.list().unwrap(), vec![id("fresh")]);
    }
}
