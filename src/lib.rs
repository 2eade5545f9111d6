pub mod api;
pub mod app;
pub mod card;
pub mod catalog;
pub mod chrome;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod item_id;
pub mod logging;
pub mod progress;
pub mod storage;
pub mod ui;
pub mod view_mode;
