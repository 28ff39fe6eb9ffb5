//! User interface layer
//!
//! The TUI application, its rendering, and the banner carousel.

pub mod app;
pub mod carousel;
pub mod render;
