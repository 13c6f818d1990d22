use derive_more::{Display, From, Into};

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into, Display)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
