pub mod api;
pub mod app;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{Backend, HttpBackend};
pub use app::router;
pub use config::Config;
pub use state::AppState;
