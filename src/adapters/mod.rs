mod anonymous_identity;
mod dish_entries_repository_impl;
mod file_local_storage;
mod file_store;
mod memory_local_storage;
mod memory_store;
mod share_snapshots_repository_impl;

pub use anonymous_identity::{AnonymousIdentity, ANONYMOUS_USER_ID_KEY};
pub use dish_entries_repository_impl::DishEntriesRepositoryImpl;
pub use file_local_storage::FileLocalStorage;
pub use file_store::FileStore;
pub use memory_local_storage::MemoryLocalStorage;
pub use memory_store::MemoryStore;
pub use share_snapshots_repository_impl::ShareSnapshotsRepositoryImpl;
