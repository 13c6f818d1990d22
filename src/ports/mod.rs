mod dish_entries_repository;
mod identity_provider;
mod local_storage;
mod share_snapshots_repository;

pub use dish_entries_repository::*;
pub use identity_provider::*;
pub use local_storage::*;
pub use share_snapshots_repository::*;
