//! Analysis renderer port
//!
//! The model's `analysis` text is markdown. How it is shown (HTML, terminal
//! styling, plain text) is up to the presentation layer.

/// Turns the model's markdown analysis into display text.
pub trait AnalysisRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Renderer that shows the markdown source unchanged.
pub struct RawAnalysis;

impl AnalysisRenderer for RawAnalysis {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}
