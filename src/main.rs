use deptree::adapters::outbound::console::StderrProgressReporter;
use deptree::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use deptree::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
use deptree::adapters::outbound::replay::ReplayManager;
use deptree::application::dto::{AnalysisRequest, OutputFormat, DEFAULT_MAX_CONCURRENT_MANAGERS};
use deptree::application::manager_registry::ManagerRegistry;
use deptree::application::use_cases::AnalyzeDependenciesUseCase;
use deptree::cli::Args;
use deptree::config::{self, ConfigFile};
use deptree::dependency_resolution::domain::{ScopeExclude, ScopeExcludeReason};
use deptree::dependency_resolution::services::CanonicalNormalizer;
use deptree::ports::outbound::{OutputPresenter, RecordingReader, ResultFormatter};
use deptree::shared::error::{DeptreeError, ExitCode};
use deptree::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Reason attached to `-x PATTERN` when none is given
const DEFAULT_CLI_EXCLUDE_REASON: ScopeExcludeReason = ScopeExcludeReason::DevDependencyOf;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

/// Diagnostics go to stderr so stdout stays clean for the result
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("deptree=debug")
        } else {
            EnvFilter::new("deptree=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<DeptreeError>() {
        Some(DeptreeError::Validation { .. })
        | Some(DeptreeError::InvalidInputPath { .. })
        | Some(DeptreeError::RecordingNotFound { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

/// Effective settings after merging the config file and the command line
#[derive(Debug, PartialEq)]
struct Settings {
    format: OutputFormat,
    excluded_scopes: Vec<ScopeExclude>,
    enabled_managers: Option<Vec<String>>,
    max_concurrent_managers: usize,
    canonical: bool,
}

impl Settings {
    /// CLI values win over the file; CLI exclusions are appended to the file's
    fn merge(args: &Args, config: ConfigFile) -> Result<Self> {
        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => name
                .parse::<OutputFormat>()
                .map_err(|message| DeptreeError::Validation { message })?,
            (None, None) => OutputFormat::default(),
        };

        let mut excluded_scopes = config.excluded_scopes.unwrap_or_default();
        for raw in &args.exclude_scopes {
            excluded_scopes.push(parse_scope_exclude(raw)?);
        }

        Ok(Self {
            format,
            excluded_scopes,
            enabled_managers: config.enabled_managers,
            max_concurrent_managers: config
                .max_concurrent_managers
                .unwrap_or(DEFAULT_MAX_CONCURRENT_MANAGERS),
            canonical: args.canonical || config.canonical.unwrap_or(false),
        })
    }
}

/// Parses `PATTERN` or `PATTERN=REASON`
fn parse_scope_exclude(raw: &str) -> Result<ScopeExclude> {
    match raw.split_once('=') {
        Some((pattern, reason)) => {
            let reason = reason
                .parse::<ScopeExcludeReason>()
                .map_err(|message| DeptreeError::Validation { message })?;
            Ok(ScopeExclude::new(pattern, reason))
        }
        None => Ok(ScopeExclude::new(raw, DEFAULT_CLI_EXCLUDE_REASON)),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    Ok(config.unwrap_or_default())
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = Settings::merge(&args, load_config(args.config.as_deref())?)?;

    // Create managers from recordings (Dependency Injection)
    let reader = FileSystemReader::new();
    let mut registry = ManagerRegistry::new();
    let mut definition_files: Vec<PathBuf> = Vec::new();
    for path in &args.recordings {
        let manager = ReplayManager::from_recording(reader.read_recording(path)?);
        definition_files.extend(manager.definition_files());
        registry.register(Box::new(manager))?;
    }

    if let Some(enabled) = &settings.enabled_managers {
        for unknown in registry.retain_enabled(enabled) {
            eprintln!(
                "⚠️  Warning: Enabled package manager '{}' has no recording \
                 and will be ignored.",
                unknown
            );
        }
    }

    tracing::debug!(managers = ?registry.names(), "package managers enabled");

    definition_files.sort();
    definition_files.dedup();

    let manager_count = registry.len();
    let request = AnalysisRequest::builder()
        .definition_files(definition_files)
        .excluded_scopes(settings.excluded_scopes)
        .max_concurrent_managers(settings.max_concurrent_managers)
        .build()?;

    let use_case = AnalyzeDependenciesUseCase::new(registry, StderrProgressReporter::new());
    let response = use_case.execute(request).await?;

    if response.failed_managers.len() == manager_count {
        anyhow::bail!("All {} package managers failed; no result was produced", manager_count);
    }

    let has_failures = response.has_failures();
    let result = if settings.canonical {
        CanonicalNormalizer::normalize_analyzer_result(&response.analyzer_result)
    } else {
        response.analyzer_result
    };

    let formatter: Box<dyn ResultFormatter> = match settings.format {
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Yaml => Box::new(YamlFormatter::new()),
    };
    let formatted_output = formatter.format(&result)?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted_output)?;

    if args.fail_on_issues && (has_failures || result.has_errors()) {
        return Ok(ExitCode::IssuesDetected);
    }
    Ok(ExitCode::Success)
}
