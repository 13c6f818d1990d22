use derive_more::Into;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Into, Copy)]
pub struct DrawCount(usize);

pub const MIN_DRAW_COUNT: i64 = 1;
pub const MAX_DRAW_COUNT: i64 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawCountTryFromError {
    #[error("Draw count must be less than or equal to {}", MAX_DRAW_COUNT)]
    TooLarge,
    #[error("Draw count must be greater than or equal to {}", MIN_DRAW_COUNT)]
    TooSmall,
}

impl DrawCount {
    pub fn value(&self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for DrawCount {
    type Error = DrawCountTryFromError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > MAX_DRAW_COUNT {
            Err(DrawCountTryFromError::TooLarge)
        } else if value < MIN_DRAW_COUNT {
            Err(DrawCountTryFromError::TooSmall)
        } else {
            // bounded by MAX_DRAW_COUNT above
            Ok(Self(value as usize))
        }
    }
}
