//! Random draw ("gacha") over a shared list of osechi dishes.

pub mod adapters;
pub mod app_config;
pub mod app_ctx;
mod app_error;
pub use app_error::{AppError, ValidationError};
pub mod commands;
pub mod dispatcher;
pub mod draw_engine;
pub mod entities;
pub mod ownership_ledger;
pub mod ports;
pub mod queries;
pub mod render;
mod shareable_error;
pub use shareable_error::ShareableError;
pub mod share_link;
