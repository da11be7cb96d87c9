pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod headless;
pub mod logging;
pub mod sampler;
pub mod scheduler;
pub mod system;
pub mod ui;
