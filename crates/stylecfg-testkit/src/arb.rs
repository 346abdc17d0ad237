//! Proptest strategies for generating valid test inputs.
//!
//! Config keys are drawn from a small pool of module names so generated
//! rule lists contain repeated keys, which is what grouping tests need.
//!
//! # Bounds
//!
//! - Max rules per profile: 12
//! - Max declared parameters per rule: 4

use proptest::prelude::*;
use stylecfg_types::{
    ActiveRule, FILTERS_DEFAULT_VALUE, FilterSettings, Profile, RuleDefinition,
    SUPPRESS_WARNINGS_FILTER_MARKER, Severity,
};

// =============================================================================
// Constants for bounding generated data
// =============================================================================

/// Maximum number of rules in a generated profile
pub const MAX_RULES: usize = 12;

/// Maximum number of declared parameters per rule
pub const MAX_PARAMS: usize = 4;

/// Module names used to build config keys.
pub const MODULE_NAMES: &[&str] = &[
    "MagicNumber",
    "JavadocPackage",
    "LineLength",
    "FileLength",
    "Regexp",
    "NewlineAtEndOfFile",
    "ConstantName",
    "EmptyBlock",
];

// =============================================================================
// Enum Strategies
// =============================================================================

/// Strategy for generating Severity values.
pub fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

// =============================================================================
// Text Strategies
// =============================================================================

/// Text containing every character that needs escaping in an attribute.
pub fn arb_xml_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 <>&\"']{1,16}").expect("valid regex")
}

/// Parameter names (Java bean-property style).
pub fn arb_param_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z]{0,10}").expect("valid regex")
}

/// Parameter values, including blank ones that must never be emitted.
pub fn arb_param_value() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[ -~]{1,24}").expect("valid regex"),
        1 => Just(String::new()),
        1 => prop::string::string_regex("[ ]{1,4}").expect("valid regex"),
    ]
}

fn arb_module_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(MODULE_NAMES).prop_map(str::to_string),
        1 => prop::string::string_regex("[a-zA-Z<>&\"']{1,12}").expect("valid regex"),
    ]
}

/// Config keys at either placement, in mixed case.
pub fn arb_config_key() -> impl Strategy<Value = String> {
    arb_module_name().prop_flat_map(|name| {
        prop_oneof![
            Just(format!("Checker/{name}")),
            Just(format!("Checker/TreeWalker/{name}")),
            Just(format!("checker/treewalker/{name}")),
            Just(name.clone()),
        ]
    })
}

// =============================================================================
// Rule / Profile Strategies
// =============================================================================

/// Strategy for generating an ActiveRule from the Checkstyle repository.
pub fn arb_active_rule() -> impl Strategy<Value = ActiveRule> {
    (
        arb_config_key(),
        "[a-z][a-z_]{0,8}",
        arb_severity(),
        any::<bool>(),
        prop::collection::btree_map(
            arb_param_name(),
            prop::option::of(arb_param_value()),
            0..=MAX_PARAMS,
        ),
    )
        .prop_map(|(config_key, rule_key, severity, template, params)| {
            let mut rule = ActiveRule::new(rule_key, config_key, severity);
            rule.definition = RuleDefinition {
                template,
                params: params.keys().cloned().collect(),
            };
            rule.parameters = params
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v)))
                .collect();
            rule
        })
}

pub fn arb_active_rules() -> impl Strategy<Value = Vec<ActiveRule>> {
    prop::collection::vec(arb_active_rule(), 0..=MAX_RULES)
}

/// Profile whose rules all belong to the Checkstyle repository.
pub fn arb_profile() -> impl Strategy<Value = Profile> {
    arb_active_rules().prop_map(|rules| {
        let mut profile = Profile::new("Generated", "java");
        profile.rules = rules;
        profile
    })
}

/// Filter settings covering: absent, blank, marker present, marker-like but not exact.
pub fn arb_filter_settings() -> impl Strategy<Value = FilterSettings> {
    prop_oneof![
        Just(FilterSettings::new(None)),
        Just(FilterSettings::with_filters("")),
        Just(FilterSettings::with_filters(FILTERS_DEFAULT_VALUE)),
        Just(FilterSettings::with_filters(SUPPRESS_WARNINGS_FILTER_MARKER)),
        Just(FilterSettings::with_filters(format!(
            "{FILTERS_DEFAULT_VALUE}{SUPPRESS_WARNINGS_FILTER_MARKER}"
        ))),
        Just(FilterSettings::with_filters(
            "<module name=\"SuppressWarningsFilter\"/>"
        )),
    ]
}
