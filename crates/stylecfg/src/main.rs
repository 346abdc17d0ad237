use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};

use stylecfg_core::{
    CheckstyleExporter, ProfileWarning, checkstyle_severity, group_by_config_key, module_name,
    validate_profile,
};
use stylecfg_types::{ExportConfig, FILTERS_KEY, FilterSettings, Profile};

mod config_loader;

use config_loader::{load_profile, load_settings};

#[derive(Parser)]
#[command(name = "stylecfg")]
#[command(about = "Export rule profiles as Checkstyle configuration", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the Checkstyle configuration for a profile.
    Export(ExportArgs),

    /// List the rules that would be exported, in document order.
    Rules(RulesArgs),

    /// Check a profile for rules that cannot be exported.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Path to the profile file (.toml or .json).
    #[arg(long)]
    profile: PathBuf,

    /// Path to a settings file. If omitted, uses ./stylecfg.toml if present.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Export rules from this repository instead of the configured one.
    #[arg(long)]
    repository: Option<String>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Read the custom filter fragment from this file.
    #[arg(long, conflicts_with = "no_filters")]
    filters: Option<PathBuf>,

    /// Export without any custom filter fragment.
    #[arg(long)]
    no_filters: bool,

    /// Output path for the configuration file.
    ///
    /// If omitted, writes to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[arg(long, value_enum, default_value_t = RulesFormat::Text)]
    format: RulesFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RulesFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Export(args) => {
            cmd_export(args)?;
            Ok(0)
        }
        Commands::Rules(args) => {
            cmd_rules(args)?;
            Ok(0)
        }
        Commands::Validate(args) => cmd_validate(args),
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

/// Profile plus the export settings that apply to it.
struct Loaded {
    profile: Profile,
    export: ExportConfig,
}

impl Loaded {
    fn load(args: &SourceArgs) -> Result<Self> {
        let profile = load_profile(&args.profile)?;
        let mut export = load_settings(args.settings.as_deref())?.export;
        if let Some(repository) = &args.repository {
            export.repository = repository.clone();
        }
        Ok(Self { profile, export })
    }
}

fn resolve_filters(args: &ExportArgs, export: &ExportConfig) -> Result<FilterSettings> {
    if args.no_filters {
        return Ok(FilterSettings::new(None));
    }
    match &args.filters {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read filters {}", path.display()))?;
            Ok(FilterSettings::with_filters(text))
        }
        None => {
            debug!("Using {} from settings", FILTERS_KEY);
            Ok(export.filter_settings())
        }
    }
}

fn log_warnings(warnings: &[ProfileWarning]) {
    for w in warnings {
        match w {
            ProfileWarning::UndeclaredParameter { rule_key, param } => {
                warn!("rule '{rule_key}': parameter '{param}' is not declared and will not be exported");
            }
        }
    }
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let Loaded { profile, export } = Loaded::load(&args.source)?;

    let warnings = validate_profile(&profile, &export.repository)
        .with_context(|| format!("validate profile {}", args.source.profile.display()))?;
    log_warnings(&warnings);

    let filters = resolve_filters(&args, &export)?;
    info!(
        "Exporting profile '{}' (repository '{}', suppress warnings: {})",
        profile.name,
        export.repository,
        filters.suppress_warnings_enabled()
    );

    let exporter = CheckstyleExporter::new(filters);

    match args.output {
        Some(path) => {
            write_output(&path, |file| {
                exporter.export_repository(&profile, &export.repository, file)?;
                Ok(())
            })?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout().lock();
            exporter.export_repository(&profile, &export.repository, stdout)?;
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct RuleEntry<'a> {
    placement: &'static str,
    module: &'a str,
    config_key: &'a str,
    rule_key: &'a str,
    severity: &'static str,
}

fn rule_entries<'a>(profile: &'a Profile, repository: &str) -> Vec<RuleEntry<'a>> {
    let groups = group_by_config_key(profile.active_rules_by_repository(repository));
    groups
        .iter()
        .flat_map(|g| {
            let placement = g.placement().as_str();
            g.rules.iter().copied().map(move |r| RuleEntry {
                placement,
                module: module_name(&r.config_key),
                config_key: &r.config_key,
                rule_key: &r.rule_key,
                severity: checkstyle_severity(r.severity),
            })
        })
        .collect()
}

fn cmd_rules(args: RulesArgs) -> Result<()> {
    let Loaded { profile, export } = Loaded::load(&args.source)?;
    let entries = rule_entries(&profile, &export.repository);

    let mut stdout = io::stdout().lock();
    match args.format {
        RulesFormat::Text => {
            for e in &entries {
                writeln!(
                    stdout,
                    "{}\t{}\t{}\t{}",
                    e.placement, e.module, e.severity, e.rule_key
                )
                .context("write rules")?;
            }
        }
        RulesFormat::Json => {
            let s = serde_json::to_string_pretty(&entries).context("render json")?;
            writeln!(stdout, "{s}").context("write rules")?;
        }
    }

    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    info!("Validating profile {}", args.source.profile.display());
    let Loaded { profile, export } = Loaded::load(&args.source)?;

    match validate_profile(&profile, &export.repository) {
        Ok(warnings) => {
            log_warnings(&warnings);
            if args.strict && !warnings.is_empty() {
                eprintln!(
                    "Profile '{}' has {} warning(s)",
                    profile.name,
                    warnings.len()
                );
                return Ok(1);
            }
            println!("Profile '{}' is valid", profile.name);
            Ok(0)
        }
        Err(err) => {
            eprintln!("Profile '{}' is invalid: {err}", profile.name);
            Ok(1)
        }
    }
}

/// Renders into a temporary file next to `path` and moves it into place
/// only once `render` succeeds. On failure `path` is left as it was.
fn write_output<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    render(tmp.as_file_mut())?;
    tmp.persist(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
