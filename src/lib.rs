// Library exports for integration tests

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod storage;
pub mod ui;
pub mod view;
