//! taskrouter - command-line provisioning for TaskRouter workspaces
//!
//! Thin front end over `taskrouter-core`:
//! - `provision` a workspace from a TOML plan
//! - `show` a workspace
//! - look up and update workers by phone number

pub mod cli;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
