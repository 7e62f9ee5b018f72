// src/core/mod.rs
//! Ambient services: configuration, HTTP, logging and file output.

pub mod config_manager;
pub mod fs_ops;
pub mod logging;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::HttpClient;
