//! CLI entrypoint for Symptom Triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triage_application::{
    AssessSymptomsError, AssessSymptomsInput, AssessSymptomsUseCase, EngineConfig, ListSymptomsUseCase,
    RecommendSpecialistsError, RecommendSpecialistsInput, RecommendSpecialistsUseCase, ReferenceStore,
    ResolveDiseasesInput, ResolveDiseasesUseCase,
};
use triage_domain::Severity;
use triage_infrastructure::{ConfigLoader, FileConfig, FileReferenceSource};
use triage_presentation::{
    Cli, Command, ConsoleFormatter, JsonFormatter, OutputConfig, OutputFormat, OutputFormatter, set_color_enabled,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    info!("Starting Symptom Triage");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    for issue in file_config.validate() {
        if issue.severity == Severity::Warning {
            warn!("Config: {}", issue.message);
        }
    }
    let engine_config = file_config.to_engine_config()?;

    let output_config = OutputConfig::from_file(file_config.output.format, file_config.output.color);
    set_color_enabled(output_config.use_color(cli.no_color));
    let format = output_config.resolve_format(cli.output);

    // === Dependency Injection ===
    let source = reference_source(&cli, &file_config);
    let store = Arc::new(ReferenceStore::from_source(Arc::new(source)).context("Failed to load reference data")?);

    let formatter: Box<dyn OutputFormatter> = match format {
        OutputFormat::Text => Box::new(ConsoleFormatter::new().quiet(cli.quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    run(command, store, engine_config, formatter.as_ref())
}

/// CLI paths take precedence over the `[data]` section.
fn reference_source(cli: &Cli, config: &FileConfig) -> FileReferenceSource {
    let pick = |flag: &Option<PathBuf>, configured: &Option<PathBuf>| flag.clone().or_else(|| configured.clone());

    let mut source = FileReferenceSource::new();
    if let Some(path) = pick(&cli.knowledge_base, &config.data.knowledge_base) {
        source = source.with_knowledge_base(path);
    }
    if let Some(path) = pick(&cli.cases, &config.data.case_database) {
        source = source.with_case_database(path);
    }
    source
}

fn run(
    command: Command,
    store: Arc<ReferenceStore>,
    config: EngineConfig,
    formatter: &dyn OutputFormatter,
) -> Result<ExitCode> {
    match command {
        Command::Diagnose { symptoms, max_results } => {
            let mut input = ResolveDiseasesInput::new(symptoms);
            if let Some(max) = max_results {
                input = input.with_max_results(max);
            }
            let output = ResolveDiseasesUseCase::new(store, config).execute(input);
            println!("{}", formatter.diagnoses(&output));
        }

        Command::Recommend { symptoms, top_n } => {
            let mut input = RecommendSpecialistsInput::new(symptoms);
            if let Some(top_n) = top_n {
                input = input.with_top_n(top_n);
            }
            match RecommendSpecialistsUseCase::new(store, config).execute(input) {
                Ok(output) => println!("{}", formatter.recommendation(&output)),
                Err(RecommendSpecialistsError::NoMatch { available }) => {
                    println!("{}", formatter.no_match(&available));
                    return Ok(ExitCode::FAILURE);
                }
                Err(RecommendSpecialistsError::EmptyInput) => bail!("No symptoms provided"),
                Err(e) => return Err(e.into()),
            }
        }

        Command::Assess {
            symptoms,
            max_results,
            top_n,
        } => {
            let mut input = AssessSymptomsInput::new(symptoms);
            if let Some(max) = max_results {
                input = input.with_max_results(max);
            }
            if let Some(top_n) = top_n {
                input = input.with_top_n(top_n);
            }
            match AssessSymptomsUseCase::new(store, config).execute(input) {
                Ok(report) => println!("{}", formatter.assessment(&report)),
                Err(AssessSymptomsError::EmptyInput) => bail!("No symptoms provided"),
                Err(e) => return Err(e.into()),
            }
        }

        Command::Symptoms => {
            let entries = ListSymptomsUseCase::new(store).execute();
            println!("{}", formatter.symptoms(&entries));
        }
    }

    Ok(ExitCode::SUCCESS)
}
