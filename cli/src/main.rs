//! CLI entrypoint for lattice
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::Parser;
use lattice_application::{
    CapabilityRegistry, ContextAssembler, ExecutionParams, HandlerExecutor, LlmGateway,
    QueryRouter, RespondUseCase,
};
use lattice_infrastructure::{ConfigLoader, FileConfig, JsonRecordStore, OpenAiCompatibleGateway};
use lattice_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr subscriber, plus a file writer when configured.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let list = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("invalid configuration:\n{}", list);
    }
    Ok(config)
}

fn build_use_case(
    config: &FileConfig,
    cli: &Cli,
    params: ExecutionParams,
) -> RespondUseCase {
    let gateway: Option<Arc<dyn LlmGateway>> = if cli.offline {
        info!("Offline mode: generative backend disabled");
        None
    } else {
        OpenAiCompatibleGateway::from_config(&config.backend, &config.models)
            .map(|gw| Arc::new(gw) as Arc<dyn LlmGateway>)
    };

    let assembler = match cli.data_dir.as_ref().or(config.data.dir.as_ref()) {
        Some(dir) => {
            if !dir.exists() {
                warn!("Data directory {} does not exist", dir.display());
            }
            let store = Arc::new(JsonRecordStore::new(dir));
            ContextAssembler::new(store.clone(), store.clone(), store, &params)
        }
        None => ContextAssembler::empty(&params),
    };

    RespondUseCase::new(
        QueryRouter::new(gateway.clone(), params.classifier_timeout),
        CapabilityRegistry::standard(gateway),
        assembler,
        HandlerExecutor::new(params),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting lattice");

    // === Dependency Injection ===
    let params = config.execution.to_params();
    let use_case = build_use_case(&config, &cli, params);

    let query = cli.to_query(Utc::now());

    // Progress spinners would interleave with machine-readable output
    let output = if cli.quiet || cli.output == OutputFormat::Json {
        use_case.execute(&query).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&query, &progress).await
    };

    print!("{}", ConsoleFormatter::format(&output, cli.output));
    if cli.output == OutputFormat::Json {
        println!();
    }

    Ok(())
}
