//! Console output formatter for plan reports

use colored::Colorize;
use routewise_application::PlanReport;

/// Formats plan reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &PlanReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Trip Plan"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} ({})\n",
            "Provider:".cyan().bold(),
            report.provider,
            report.model
        ));

        output.push_str(&Self::section_header("Route"));
        let total = report.places.len();
        for (index, place) in report.places.iter().enumerate() {
            let marker = if index == 0 {
                "S".green().bold()
            } else if index + 1 == total {
                "E".red().bold()
            } else {
                index.to_string().yellow().bold()
            };
            output.push_str(&format!(
                "  {:>2}  {}  {}\n",
                marker,
                place.name,
                format!("({})", place.point).dimmed()
            ));
        }
        let line = if report.routed {
            "drawn".green()
        } else {
            "straight segments (routing failed)".yellow()
        };
        output.push_str(&format!("\n  {} {}\n", "Line:".dimmed(), line));

        output.push_str(&Self::section_header("Analysis"));
        output.push('\n');
        output.push_str(&Self::indent(&report.rendered_analysis, "  "));
        output.push('\n');

        if !report.warnings.is_empty() {
            output.push_str(&Self::section_header("Warnings"));
            for warning in &report.warnings {
                output.push_str(&format!("  {} {}\n", "!".yellow().bold(), warning));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &PlanReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
