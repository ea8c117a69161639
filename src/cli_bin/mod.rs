//! CLI module for the promptmatter command-line interface
//!
//! Argument parsing lives in [`args`]; [`commands`] maps parsed commands onto
//! library operations.

pub mod args;
pub mod commands;
