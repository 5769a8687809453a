mod app_state;
mod config;
pub mod database;
pub mod models;
pub mod routes;
pub use app_state::AppState;
pub use config::Config;
