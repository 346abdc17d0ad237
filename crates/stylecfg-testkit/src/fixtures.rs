//! Common test fixtures for stylecfg.

use stylecfg_types::{ActiveRule, Profile, RuleDefinition, Severity};

/// Collection of sample profiles for testing.
pub mod sample_profiles {
    use super::*;

    /// A profile with no rules.
    pub fn empty() -> Profile {
        Profile::new("Empty", "java")
    }

    /// One root-level rule without parameters.
    pub fn javadoc_package() -> Profile {
        let mut profile = Profile::new("Javadoc", "java");
        profile.rules.push(ActiveRule::new(
            "com.puppycrawl.tools.checkstyle.checks.javadoc.JavadocPackageCheck",
            "Checker/JavadocPackage",
            Severity::Major,
        ));
        profile
    }

    /// One TreeWalker rule with an overridden parameter.
    pub fn magic_number() -> Profile {
        let mut profile = Profile::new("Magic", "java");
        profile.rules.push(magic_number_rule());
        profile
    }

    pub fn magic_number_rule() -> ActiveRule {
        let mut rule = ActiveRule::new(
            "com.puppycrawl.tools.checkstyle.checks.coding.MagicNumberCheck",
            "Checker/TreeWalker/MagicNumber",
            Severity::Minor,
        );
        rule.definition = RuleDefinition {
            template: false,
            params: vec![
                "ignoreNumbers".to_string(),
                "ignoreHashCodeMethod".to_string(),
            ],
        };
        rule.parameters
            .insert("ignoreNumbers".to_string(), "0,1,2".to_string());
        rule
    }

    /// Root and nested rules, a template instantiated twice, and a rule
    /// from another repository.
    pub fn mixed() -> Profile {
        let mut profile = Profile::new("Mixed", "java");

        let mut line_length = ActiveRule::new(
            "com.puppycrawl.tools.checkstyle.checks.sizes.LineLengthCheck",
            "Checker/TreeWalker/LineLength",
            Severity::Major,
        );
        line_length.definition.params = vec!["max".to_string()];
        line_length
            .parameters
            .insert("max".to_string(), "120".to_string());

        let regexp = |key: &str, format: &str| {
            let mut rule = ActiveRule::new(key, "Checker/TreeWalker/Regexp", Severity::Critical);
            rule.definition = RuleDefinition {
                template: true,
                params: vec!["format".to_string(), "message".to_string()],
            };
            rule.parameters
                .insert("format".to_string(), format.to_string());
            rule
        };

        let mut foreign = ActiveRule::new("UnusedPrivateField", "UnusedPrivateField", Severity::Major);
        foreign.repository = "pmd".to_string();

        profile.rules = vec![
            line_length,
            ActiveRule::new(
                "com.puppycrawl.tools.checkstyle.checks.NewlineAtEndOfFileCheck",
                "Checker/NewlineAtEndOfFile",
                Severity::Info,
            ),
            regexp("no_sysout", "System\\.out\\.println"),
            foreign,
            regexp("no_tabs", "\\t"),
            ActiveRule::new(
                "com.puppycrawl.tools.checkstyle.checks.sizes.FileLengthCheck",
                "Checker/FileLength",
                Severity::Blocker,
            ),
        ];
        profile
    }
}

/// Profile and settings files as they appear on disk.
pub mod sample_files {
    /// TOML profile equivalent to [`super::sample_profiles::magic_number`].
    pub const MAGIC_NUMBER_PROFILE_TOML: &str = r#"name = "Magic"
language = "java"

[[rule]]
rule_key = "com.puppycrawl.tools.checkstyle.checks.coding.MagicNumberCheck"
config_key = "Checker/TreeWalker/MagicNumber"
severity = "MINOR"

[rule.definition]
params = ["ignoreNumbers", "ignoreHashCodeMethod"]

[rule.parameters]
ignoreNumbers = "0,1,2"

[[rule]]
repository = "pmd"
rule_key = "UnusedPrivateField"
config_key = "UnusedPrivateField"
severity = "MAJOR"
"#;

    /// JSON profile with one root-level rule.
    pub const JAVADOC_PROFILE_JSON: &str = r#"{
  "name": "Javadoc",
  "language": "java",
  "rule": [
    {
      "rule_key": "com.puppycrawl.tools.checkstyle.checks.javadoc.JavadocPackageCheck",
      "config_key": "Checker/JavadocPackage",
      "severity": "major"
    }
  ]
}
"#;

    /// Profile whose single rule has an empty config key.
    pub const INVALID_PROFILE_TOML: &str = r#"name = "Broken"

[[rule]]
rule_key = "broken"
config_key = ""
severity = "info"
"#;

    /// Settings enabling the suppression holder.
    pub const SUPPRESS_WARNINGS_SETTINGS_TOML: &str = r#"[export]
filters = '<module name="SuppressWarningsFilter" />'
"#;

    /// Settings exporting the `pmd` repository with no filters.
    pub const CUSTOM_REPOSITORY_SETTINGS_TOML: &str = r#"[export]
repository = "pmd"
filters = ""
"#;
}
