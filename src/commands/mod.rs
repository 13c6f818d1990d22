mod dish_entries_command;
mod draw_command;
mod share_command;

pub use dish_entries_command::{delete_dish, submit_dish, Confirmation, DeleteOutcome};
pub use draw_command::draw_dishes;
pub use share_command::create_share_link;
