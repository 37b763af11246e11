//! CLI subcommand implementations for the leetrank binary.

pub mod fetch_cmd;
pub mod history_cmd;
pub mod output;
