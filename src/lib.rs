pub mod commands;
pub mod config;
pub mod constants;
pub mod docker;
pub mod error;
pub mod postgres;
pub mod process;
pub mod progress;
pub mod shell;
