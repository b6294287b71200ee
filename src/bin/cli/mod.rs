//! CLI module for the sfn-recover tool
//!
//! Command handlers live in [`commands`], one file per command category.

pub mod commands;

pub use commands::{
    handle_config_command, handle_list_command, handle_recover_command, RecoveryAction,
};
