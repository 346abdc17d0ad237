//! Data types (profiles + settings) for stylecfg.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};

// ── Exporter identity ──────────────────────────────────────────
pub const REPOSITORY_KEY: &str = "checkstyle";
pub const PLUGIN_NAME: &str = "Checkstyle";
pub const JAVA_KEY: &str = "java";
pub const MIME_TYPE_XML: &str = "application/xml";

// ── Settings vocabulary ────────────────────────────────────────
pub const FILTERS_KEY: &str = "sonar.checkstyle.filters";

/// Filter fragment used when the settings store has no value for [`FILTERS_KEY`].
pub const FILTERS_DEFAULT_VALUE: &str = "<module name=\"SuppressionCommentFilter\">\
<property name=\"offCommentFormat\" value=\"CHECKSTYLE:OFF\"/>\
<property name=\"onCommentFormat\" value=\"CHECKSTYLE:ON\"/>\
<property name=\"checkFormat\" value=\"$1\"/>\
</module>";

/// Exact text whose presence in the filter fragment turns on the suppression holder.
///
/// Matched as a literal substring; `<module name="SuppressWarningsFilter"/>`
/// (no space) does not count.
pub const SUPPRESS_WARNINGS_FILTER_MARKER: &str = "<module name=\"SuppressWarningsFilter\" />";

/// Rule severity as stored in a profile.
///
/// Serialized lowercase; read back through [`FromStr`], so any casing and
/// surrounding whitespace is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Minor,
        Severity::Major,
        Severity::Critical,
        Severity::Blocker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
            Severity::Blocker => "blocker",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected one of: info, minor, major, critical, blocker)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Static shape of a rule: whether it is a template and which parameters it declares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct RuleDefinition {
    /// Template rules are instantiated several times; each instance gets an `id` property.
    #[serde(default)]
    pub template: bool,

    /// Declared parameter names, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

/// A rule enabled within a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActiveRule {
    /// Rule provider this rule comes from.
    #[serde(default = "default_repository")]
    pub repository: String,

    pub rule_key: String,

    /// Slash path to the rule's module, e.g. `Checker/TreeWalker/MagicNumber`.
    pub config_key: String,

    pub severity: Severity,

    /// Parameter overrides set on this profile.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,

    #[serde(default)]
    pub definition: RuleDefinition,
}

fn default_repository() -> String {
    REPOSITORY_KEY.to_string()
}

impl ActiveRule {
    pub fn new(rule_key: impl Into<String>, config_key: impl Into<String>, severity: Severity) -> Self {
        Self {
            repository: default_repository(),
            rule_key: rule_key.into(),
            config_key: config_key.into(),
            severity,
            parameters: BTreeMap::new(),
            definition: RuleDefinition::default(),
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

/// A named quality profile: the on-disk profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    pub name: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default, rename = "rule")]
    pub rules: Vec<ActiveRule>,
}

fn default_language() -> String {
    JAVA_KEY.to_string()
}

impl Profile {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            rules: vec![],
        }
    }

    /// Active rules belonging to `repository`, in profile order.
    pub fn active_rules_by_repository(&self, repository: &str) -> Vec<&ActiveRule> {
        self.rules
            .iter()
            .filter(|r| r.repository == repository)
            .collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.language)
    }
}

/// The custom-filter setting, as read from the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSettings {
    filters: Option<String>,
}

impl FilterSettings {
    pub fn new(filters: Option<String>) -> Self {
        Self { filters }
    }

    pub fn with_filters(filters: impl Into<String>) -> Self {
        Self::new(Some(filters.into()))
    }

    /// The raw fragment, or `""` when the setting is absent.
    pub fn filters(&self) -> &str {
        self.filters.as_deref().unwrap_or("")
    }

    /// The fragment to splice into the document, if it is non-blank.
    pub fn custom_filters(&self) -> Option<&str> {
        let filters = self.filters();
        (!filters.trim().is_empty()).then_some(filters)
    }

    pub fn suppress_warnings_enabled(&self) -> bool {
        self.filters().contains(SUPPRESS_WARNINGS_FILTER_MARKER)
    }
}

/// The on-disk settings file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SettingsFile {
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Only rules from this repository are exported.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Raw XML fragment spliced verbatim under the root module.
    #[serde(default = "default_filters")]
    pub filters: String,
}

fn default_filters() -> String {
    FILTERS_DEFAULT_VALUE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            filters: default_filters(),
        }
    }
}

impl ExportConfig {
    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings::with_filters(self.filters.clone())
    }
}
