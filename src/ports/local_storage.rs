/// String key/value storage private to one client instance.
pub trait LocalStorage {
    type Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_item(&mut self, key: &str) -> Result<(), Self::Error>;
}
