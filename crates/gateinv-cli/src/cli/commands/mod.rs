//! CLI command handlers. Each command is in its own file.

mod inventory;
mod output;
mod resolve;

pub use inventory::run_inventory;
pub use resolve::run_resolve;
