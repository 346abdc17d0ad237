//! Profile checks run before export.
//!
//! The compiler itself assumes well-formed rules; these checks let hosts
//! reject a bad profile with a useful message instead of emitting a
//! document Checkstyle cannot load.

use std::collections::BTreeSet;

use stylecfg_types::{ActiveRule, Profile};

use crate::module::module_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("rule '{rule_key}' has an empty config key")]
    EmptyConfigKey { rule_key: String },

    #[error("rule '{rule_key}' has config key '{config_key}' with no module name")]
    MissingModuleName { rule_key: String, config_key: String },

    #[error("template rule with config key '{config_key}' has an empty rule key")]
    TemplateWithoutKey { config_key: String },
}

/// A non-fatal observation about a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileWarning {
    /// An override for a parameter the rule does not declare; it is never exported.
    UndeclaredParameter { rule_key: String, param: String },
}

/// Checks `rules` for invariant violations, returning the first error found.
pub fn validate_rules<'a, I>(rules: I) -> Result<Vec<ProfileWarning>, ProfileError>
where
    I: IntoIterator<Item = &'a ActiveRule>,
{
    let mut warnings = Vec::new();

    for rule in rules {
        if rule.config_key.trim().is_empty() {
            return Err(ProfileError::EmptyConfigKey {
                rule_key: rule.rule_key.clone(),
            });
        }

        if module_name(&rule.config_key).trim().is_empty() {
            return Err(ProfileError::MissingModuleName {
                rule_key: rule.rule_key.clone(),
                config_key: rule.config_key.clone(),
            });
        }

        if rule.definition.template && rule.rule_key.trim().is_empty() {
            return Err(ProfileError::TemplateWithoutKey {
                config_key: rule.config_key.clone(),
            });
        }

        let declared: BTreeSet<&str> = rule.definition.params.iter().map(String::as_str).collect();
        for param in rule.parameters.keys() {
            if !declared.contains(param.as_str()) {
                warnings.push(ProfileWarning::UndeclaredParameter {
                    rule_key: rule.rule_key.clone(),
                    param: param.clone(),
                });
            }
        }
    }

    Ok(warnings)
}

/// [`validate_rules`] over the profile's rules from `repository`.
pub fn validate_profile(
    profile: &Profile,
    repository: &str,
) -> Result<Vec<ProfileWarning>, ProfileError> {
    validate_rules(profile.active_rules_by_repository(repository))
}
