pub mod api;
pub mod config;
pub mod provider;
pub mod ui;
