pub mod app;
pub mod config;
pub mod storage;
pub mod theme;
pub mod todo;
pub mod ui;
pub mod utils;
