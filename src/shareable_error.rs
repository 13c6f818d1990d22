use derive_more::From;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Cloneable wrapper so collaborator failures can travel inside outcomes.
#[derive(Clone, Error, Debug, From)]
pub struct ShareableError(pub Arc<anyhow::Error>);

impl fmt::Display for ShareableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.0.as_ref())
    }
}

impl From<anyhow::Error> for ShareableError {
    fn from(e: anyhow::Error) -> Self {
        Self(Arc::new(e))
    }
}
