//! Command handlers for the Curio CLI

pub mod config;
pub mod retrieve;

pub use config::handle_config_command;
pub use retrieve::{handle_compare_command, handle_retrieve_command};
