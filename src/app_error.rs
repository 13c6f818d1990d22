use thiserror::Error;

use crate::draw_engine::EmptyPopulation;
use crate::entities::{DishNameTryFromError, DishOriginTryFromError, DrawCountTryFromError};
use crate::ShareableError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    DishName(#[from] DishNameTryFromError),
    #[error(transparent)]
    DishOrigin(#[from] DishOriginTryFromError),
    #[error(transparent)]
    DrawCount(#[from] DrawCountTryFromError),
}

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("no dish has been registered yet")]
    EmptyPopulation,
    #[error("no session is available")]
    Unauthenticated,
    #[error("not found")]
    NotFound,
    #[error("shared payload could not be decoded: {0}")]
    DecodeFailure(String),
    #[error(transparent)]
    Collaborator(#[from] ShareableError),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Collaborator(ShareableError::from(e))
    }
}

impl From<DishNameTryFromError> for AppError {
    fn from(e: DishNameTryFromError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DishOriginTryFromError> for AppError {
    fn from(e: DishOriginTryFromError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DrawCountTryFromError> for AppError {
    fn from(e: DrawCountTryFromError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<EmptyPopulation> for AppError {
    fn from(_: EmptyPopulation) -> Self {
        Self::EmptyPopulation
    }
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
