//! Tool configuration shared by the pipeline binaries.

pub mod config;

pub use config::ToolConfig;
