//! Utility modules: build info, logging, persistence, config loading.

pub mod build_info;
pub mod logging;
pub mod persistence;
pub mod settings;
