use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use serde_json::Value;

use stylecfg_types::{Profile, Severity, SettingsFile};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repo automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the "CI local" suite: fmt, clippy, test, then the schema check.
    Ci,

    /// Generate JSON Schemas for profile/settings files into `schemas/`.
    Schema {
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::Schema { out_dir } => schema(&out_dir),
    }
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--check"])?;
    cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    cargo(&["test", "--workspace"])?;

    let schemas = render_schemas()?;
    check_severity_schema(&schemas.profile)?;
    eprintln!("profile schema lists all {} severities", Severity::ALL.len());
    Ok(())
}

struct Schemas {
    profile: Value,
    settings: Value,
}

fn render_schemas() -> Result<Schemas> {
    Ok(Schemas {
        profile: serde_json::to_value(schema_for!(Profile)).context("render profile schema")?,
        settings: serde_json::to_value(schema_for!(SettingsFile))
            .context("render settings schema")?,
    })
}

/// Profiles are hand-written, so the schema must offer exactly the severities
/// the exporter maps, in the spelling it writes back out.
fn check_severity_schema(profile_schema: &Value) -> Result<()> {
    let listed: Vec<&str> = profile_schema
        .pointer("/definitions/Severity/enum")
        .and_then(Value::as_array)
        .context("profile schema has no Severity enum")?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    let expected: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    if listed != expected {
        bail!("profile schema lists severities {listed:?}, expected {expected:?}");
    }
    Ok(())
}

fn schema(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("create schema output dir")?;

    let schemas = render_schemas()?;
    for (file, value) in [
        ("stylecfg.profile.schema.json", &schemas.profile),
        ("stylecfg.settings.schema.json", &schemas.settings),
    ] {
        let path = out_dir.join(file);
        let text = serde_json::to_string_pretty(value).context("serialize json")?;
        std::fs::write(&path, text + "\n").with_context(|| format!("write {}", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("run cargo {args:?}"))?;
    if !status.success() {
        bail!("command failed: cargo {args:?}");
    }
    Ok(())
}
