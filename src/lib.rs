pub mod airports;
pub mod api;
pub mod collector;
pub mod config;
pub mod distance;
pub mod logging;
pub mod models;
pub mod report;
