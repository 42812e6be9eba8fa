//! Presentation layer for routewise
//!
//! This crate contains CLI definitions, output formatters, the terminal
//! analysis renderer and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::analysis::TerminalAnalysisRenderer;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
