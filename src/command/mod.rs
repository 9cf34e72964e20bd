mod commands;
mod history;

pub use commands::Command;
pub use history::History;

use crate::error::DocumentError;

/// Result type for command operations
pub type CommandResult = Result<(), DocumentError>;
