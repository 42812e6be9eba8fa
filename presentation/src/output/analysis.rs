//! Terminal rendering of the model's markdown analysis

use colored::Colorize;
use routewise_application::AnalysisRenderer;

/// Renders markdown for a terminal.
///
/// Headings become bold cyan lines, `*`/`+` bullets become `-`, and the
/// emphasis markers `**`, `__` and `` ` `` are stripped. Everything else passes
/// through unchanged.
pub struct TerminalAnalysisRenderer {
    color: bool,
}

impl TerminalAnalysisRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        let heading = trimmed.trim_start_matches('#');
        if heading.len() < trimmed.len() && (heading.is_empty() || heading.starts_with(' ')) {
            let text = strip_emphasis(heading.trim());
            return if self.color {
                text.cyan().bold().to_string()
            } else {
                text
            };
        }

        if let Some(rest) = trimmed
            .strip_prefix("* ")
            .or_else(|| trimmed.strip_prefix("+ "))
            .or_else(|| trimmed.strip_prefix("- "))
        {
            return format!("{}- {}", indent, strip_emphasis(rest));
        }

        format!("{}{}", indent, strip_emphasis(trimmed))
    }
}

impl Default for TerminalAnalysisRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AnalysisRenderer for TerminalAnalysisRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown
            .lines()
            .map(|line| self.render_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "").replace('`', "")
}
