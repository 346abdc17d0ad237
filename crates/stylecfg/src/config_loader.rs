//! Loading of profile and settings files.
//!
//! Profiles may be TOML or JSON (picked by file extension); settings are TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use stylecfg_types::{Profile, SettingsFile};

/// Settings file picked up from the working directory when `--settings` is omitted.
pub const DEFAULT_SETTINGS_FILE: &str = "stylecfg.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileFormat {
    Toml,
    Json,
}

fn profile_format(path: &Path) -> Result<ProfileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ProfileFormat::Toml),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ProfileFormat::Json),
        _ => bail!(
            "Unsupported profile format '{}' (expected .toml or .json)",
            path.display()
        ),
    }
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    let format = profile_format(path)?;
    debug!("Loading profile from '{}' as {:?}", path.display(), format);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read profile '{}'", path.display()))?;

    let profile: Profile = match format {
        ProfileFormat::Toml => toml::from_str(&text)
            .with_context(|| format!("parse profile '{}'", path.display()))?,
        ProfileFormat::Json => serde_json::from_str(&text)
            .with_context(|| format!("parse profile '{}'", path.display()))?,
    };

    debug!(
        "Loaded profile '{}' with {} active rules",
        profile.name,
        profile.rules.len()
    );
    Ok(profile)
}

/// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] if present, or defaults.
pub fn load_settings(path: Option<&Path>) -> Result<SettingsFile> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !p.exists() {
                debug!("No settings file; using defaults");
                return Ok(SettingsFile::default());
            }
            p
        }
    };

    debug!("Loading settings from '{}'", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    let settings: SettingsFile =
        toml::from_str(&text).with_context(|| format!("parse settings '{}'", path.display()))?;
    Ok(settings)
}
