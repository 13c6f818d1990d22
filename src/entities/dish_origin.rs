use derive_more::{Display, Into};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Into, Display)]
pub struct DishOrigin(String);

pub const MAX_DISH_ORIGIN_CHARS: usize = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DishOriginTryFromError {
    #[error("Dish origin must not be empty")]
    Empty,
    #[error("Dish origin must be at most {} characters", MAX_DISH_ORIGIN_CHARS)]
    TooLong,
}

impl DishOrigin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for DishOrigin {
    type Error = DishOriginTryFromError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            Err(DishOriginTryFromError::Empty)
        } else if value.chars().count() > MAX_DISH_ORIGIN_CHARS {
            Err(DishOriginTryFromError::TooLong)
        } else {
            Ok(Self(value.to_string()))
        }
    }
}

impl TryFrom<String> for DishOrigin {
    type Error = DishOriginTryFromError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}
