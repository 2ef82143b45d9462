pub mod core;
pub mod models;
pub mod stores;
pub mod api;
pub mod render;
pub mod handlers;
pub mod utils;
