use async_trait::async_trait;
use ulid::Ulid;

use crate::{entities, ports};

pub const ANONYMOUS_USER_ID_KEY: &str = "osechi-gacha.anonymous-user-id";

/// Anonymous sign-in: a random id minted once and kept in local storage.
#[derive(Debug, Clone)]
pub struct AnonymousIdentity<S> {
    storage: S,
}

impl<S> AnonymousIdentity<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S> ports::IdentityProvider for AnonymousIdentity<S>
where
    S: ports::LocalStorage + Send,
    S::Error: Into<anyhow::Error>,
{
    type Error = anyhow::Error;

    async fn ensure_session(&mut self) -> Result<entities::UserId, Self::Error> {
        let stored = self
            .storage
            .get_item(ANONYMOUS_USER_ID_KEY)
            .map_err(Into::<anyhow::Error>::into)?;
        if let Some(user_id) = stored.filter(|s| !s.trim().is_empty()) {
            return Ok(entities::UserId::from(user_id.trim().to_string()));
        }

        let user_id = format!("anon-{}", Ulid::new().to_string().to_lowercase());
        self.storage
            .set_item(ANONYMOUS_USER_ID_KEY, &user_id)
            .map_err(Into::<anyhow::Error>::into)?;
        log::info!("anonymous session established: {}", user_id);
        Ok(entities::UserId::from(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryLocalStorage;
    use crate::ports::IdentityProvider;

    #[tokio::test]
    async fn test_session_id_is_stable() {
        let storage = MemoryLocalStorage::new();
        let mut identity = AnonymousIdentity::new(storage.clone());

        let first = identity.ensure_session().await.unwrap();
        let second = AnonymousIdentity::new(storage)
            .ensure_session()
            .await
            .unwrap();
        assert_eq!(first, second);
        assert!(first.as_str().starts_with("anon-"));
    }
}
