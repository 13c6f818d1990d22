mod dish_entries_query;
mod shared_view_query;

pub use dish_entries_query::{load_all_dishes, load_my_dishes};
pub use shared_view_query::resolve_shared_view;
