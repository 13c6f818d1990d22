use crate::entities;
use async_trait::async_trait;

#[async_trait]
pub trait IdentityProvider {
    type Error;

    /// Establishes an anonymous session if none exists and returns its stable id.
    async fn ensure_session(&mut self) -> Result<entities::UserId, Self::Error>;
}
