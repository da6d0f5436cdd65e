pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod shell;
pub mod system_clock;
pub mod table;

pub use context::AppContext;
pub use shell::{run_cli, RunOutcome};
