//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for plan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Itinerary, analysis and warnings
    Text,
    /// JSON report
    Json,
}

impl From<OutputFormat> for routewise_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => routewise_domain::OutputFormat::Text,
            OutputFormat::Json => routewise_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for routewise
#[derive(Parser, Debug)]
#[command(name = "routewise")]
#[command(author, version, about = "Order trip waypoints with an LLM and draw the route")]
#[command(long_about = r#"
Routewise plans a trip through a set of stops.

A run has three stages:
1. Ordering: a language model picks a sensible visiting order and explains it
2. Geocoding: every stop is looked up on OpenStreetMap, one request at a time
3. Map: the route is written as GeoJSON (road geometry from OSRM when enabled)

Configuration files are loaded from (in priority order):
1. ROUTEWISE_* environment variables
2. --config <path>     Explicit config file
3. ./routewise.toml    Project-level config
4. ~/.config/routewise/config.toml   Global config

Example:
  routewise --start "Beijing Railway Station" --end "Beijing Capital Airport" \
            --waypoint "Temple of Heaven" --waypoint "Forbidden City"
  routewise --provider qwen --waypoints-file stops.txt --start Home --end Office -o json
"#)]
pub struct Cli {
    /// Where the trip starts
    #[arg(long, value_name = "PLACE")]
    pub start: Option<String>,

    /// Where the trip ends
    #[arg(long, value_name = "PLACE")]
    pub end: Option<String>,

    /// Stop to visit in between (can be specified multiple times)
    #[arg(short, long, value_name = "PLACE")]
    pub waypoint: Vec<String>,

    /// File with one stop per line (blank lines are ignored)
    #[arg(long, value_name = "PATH")]
    pub waypoints_file: Option<PathBuf>,

    /// Provider id (deepseek, openai, moonshot, qwen or a custom id)
    #[arg(short, long, value_name = "ID")]
    pub provider: Option<String>,

    /// API key for the provider (defaults to the configured env variable)
    #[arg(long, value_name = "KEY", env = "ROUTEWISE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// List known providers and exit
    #[arg(long)]
    pub list_providers: bool,

    /// GeoJSON file the route is written to
    #[arg(long, value_name = "PATH")]
    pub map_output: Option<PathBuf>,

    /// Draw straight segments instead of asking OSRM for road geometry
    #[arg(long)]
    pub no_routing: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for daily rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append run events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub run_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Waypoints as one newline-separated block: `--waypoint` values first,
    /// then the file contents.
    pub fn waypoint_text(&self, file_contents: Option<&str>) -> String {
        let mut lines: Vec<&str> = self.waypoint.iter().map(String::as_str).collect();
        if let Some(contents) = file_contents {
            lines.extend(contents.lines());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trip_flags() {
        let cli = Cli::try_parse_from([
            "routewise",
            "--start",
            "Beijing Railway Station",
            "--end",
            "Beijing Capital Airport",
            "-w",
            "Temple of Heaven",
            "--waypoint",
            "Forbidden City",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.start.as_deref(), Some("Beijing Railway Station"));
        assert_eq!(cli.waypoint, vec!["Temple of Heaven", "Forbidden City"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_waypoint_text_merges_flags_and_file() {
        let cli = Cli::try_parse_from(["routewise", "-w", "A", "-w", "B"]).unwrap();
        assert_eq!(cli.waypoint_text(Some("C\n\nD\n")), "A\nB\nC\n\nD");
        assert_eq!(cli.waypoint_text(None), "A\nB");
    }
}
