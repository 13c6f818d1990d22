use derive_more::{Display, Into};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Into, Display)]
pub struct DishName(String);

pub const MAX_DISH_NAME_CHARS: usize = 15;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DishNameTryFromError {
    #[error("Dish name must not be empty")]
    Empty,
    #[error("Dish name must be at most {} characters", MAX_DISH_NAME_CHARS)]
    TooLong,
}

impl DishName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for DishName {
    type Error = DishNameTryFromError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            Err(DishNameTryFromError::Empty)
        } else if value.chars().count() > MAX_DISH_NAME_CHARS {
            Err(DishNameTryFromError::TooLong)
        } else {
            Ok(Self(value.to_string()))
        }
    }
}

impl TryFrom<String> for DishName {
    type Error = DishNameTryFromError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}
