pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use client::{HoursApi, HttpHoursApi};
pub use config::Config;
pub use state::AppState;
pub use storage::HoursStore;
