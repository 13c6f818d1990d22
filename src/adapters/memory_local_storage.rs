use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use crate::ports;

#[derive(Debug, Clone, Default)]
pub struct MemoryLocalStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> T {
        // a poisoned map is still a valid map
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut items)
    }
}

impl ports::LocalStorage for MemoryLocalStorage {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.with_items(|items| items.get(key).cloned()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.with_items(|items| items.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Self::Error> {
        self.with_items(|items| items.remove(key));
        Ok(())
    }
}
