mod dish_entry;
mod dish_name;
mod dish_origin;
mod draw_count;
mod draw_result;
mod share_snapshot;
mod shared_view;
mod user_id;

pub use dish_entry::{DishEntry, DishEntryId};
pub use dish_name::{DishName, DishNameTryFromError, MAX_DISH_NAME_CHARS};
pub use dish_origin::{DishOrigin, DishOriginTryFromError, MAX_DISH_ORIGIN_CHARS};
pub use draw_count::{DrawCount, DrawCountTryFromError, MAX_DRAW_COUNT, MIN_DRAW_COUNT};
pub use draw_result::DrawResult;
pub use share_snapshot::{ShareSnapshot, ShareSnapshotId, SharedDish};
pub use shared_view::{SharedView, SharedViewSource};
pub use user_id::UserId;
