pub mod auth;
pub mod config;
pub mod data;
pub mod domain;
pub mod logging;
pub mod table_display;
pub mod ui;
