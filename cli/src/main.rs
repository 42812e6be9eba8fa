//! CLI entrypoint for routewise
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use routewise_application::{
    NoProgress, PlanProgressNotifier, PlanTripInput, PlanTripUseCase, RunLogger,
};
use routewise_domain::{OutputFormat, PlanSession, ProviderRegistry, RawTripInput, Severity};
use routewise_infrastructure::{
    ChatCompletionsGateway, ConfigLoader, FileConfig, GeoJsonMapSurface, JsonlRunLogger,
    NominatimGeocoder, OsrmRouter,
};
use routewise_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, TerminalAnalysisRenderer,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the subscriber: stderr always, plus a daily rolling file with `--log-dir`.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "routewise.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting routewise");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        let label = match issue.severity {
            Severity::Error => "error:".red().bold(),
            Severity::Warning => "warning:".yellow().bold(),
        };
        eprintln!("{} {}", label, issue.message);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let registry = config.to_registry();
    if cli.list_providers {
        print_providers(&registry);
        return Ok(());
    }

    let provider_id = cli.provider.as_deref().unwrap_or(&config.provider.default);
    let provider = registry.get(provider_id).cloned().with_context(|| {
        format!(
            "Unknown provider '{}' (known: {})",
            provider_id,
            registry.ids().collect::<Vec<_>>().join(", ")
        )
    })?;

    // === Form input ===
    let credential = cli
        .api_key
        .clone()
        .or_else(|| std::env::var(&config.provider.api_key_env).ok())
        .unwrap_or_default();

    let file_contents = match &cli.waypoints_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read waypoints file {}", path.display()))?,
        ),
        None => None,
    };

    let form = RawTripInput::new(
        credential,
        cli.start.clone().unwrap_or_default(),
        cli.end.clone().unwrap_or_default(),
        cli.waypoint_text(file_contents.as_deref()),
    );

    // === Dependency Injection ===
    let use_case = build_use_case(&cli, &config)?;

    let progress: Box<dyn PlanProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let run = use_case
        .execute(
            PlanSession::new(),
            PlanTripInput::new(form, provider),
            progress.as_ref(),
        )
        .await;
    let report = run.outcome?;

    // === Output ===
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    match format {
        OutputFormat::Text => {
            println!("{}", ConsoleFormatter::format(&report));
            println!(
                "{} {}",
                "Map written to".dimmed(),
                map_output(&cli, &config).display()
            );
        }
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
    }

    Ok(())
}

fn build_use_case(cli: &Cli, config: &FileConfig) -> Result<PlanTripUseCase> {
    let gateway = Arc::new(ChatCompletionsGateway::new(Duration::from_secs(
        config.provider.timeout_secs,
    ))?);
    let geocoder = Arc::new(NominatimGeocoder::new(
        config.geocoding.endpoint.as_str(),
        config.geocoding.user_agent.as_str(),
    )?);

    let mut surface = GeoJsonMapSurface::new(map_output(cli, config));
    if config.map.routing && !cli.no_routing {
        surface = surface.with_router(Arc::new(OsrmRouter::new(
            config.map.osrm_endpoint.as_str(),
        )?));
    }

    let mut use_case = PlanTripUseCase::new(
        gateway,
        geocoder,
        Arc::new(surface),
        config.to_planner_params(),
    )
    .with_renderer(Arc::new(TerminalAnalysisRenderer::new(config.output.color)));

    if let Some(path) = &cli.run_log {
        match JsonlRunLogger::new(path) {
            Some(logger) => {
                info!("Run log: {}", logger.path().display());
                let logger: Arc<dyn RunLogger> = Arc::new(logger);
                use_case = use_case.with_run_logger(logger);
            }
            None => warn!("Run logging disabled; could not open {}", path.display()),
        }
    }

    Ok(use_case)
}

fn map_output(cli: &Cli, config: &FileConfig) -> std::path::PathBuf {
    cli.map_output
        .clone()
        .unwrap_or_else(|| config.map.output.clone())
}

fn print_providers(registry: &ProviderRegistry) {
    for id in registry.ids() {
        if let Some(endpoint) = registry.get(id) {
            println!("{:<10} {:<18} {}", id.bold(), endpoint.model, endpoint.url);
        }
    }
}
