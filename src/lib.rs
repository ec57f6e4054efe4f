//! gigadmin console: CLI definition, startup wiring, command handlers and
//! text rendering on top of the `ga-*` crates.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod render;
