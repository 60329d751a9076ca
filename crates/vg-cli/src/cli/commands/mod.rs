//! CLI command handlers. Each command is in its own file.

mod classify;
mod completions;
mod history;
mod replay;
mod serve;

pub use classify::run_classify;
pub use completions::run_completions;
pub use history::{open_history, run_clear_history, run_history};
pub use replay::run_replay;
pub use serve::run_serve;
