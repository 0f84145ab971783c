// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments, loads the
// station graph and dispatches here.

pub mod route;
pub mod session;
pub mod stations;
