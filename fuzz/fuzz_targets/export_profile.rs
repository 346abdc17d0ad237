//! Fuzz target for `compile_rules`.
//!
//! Compiles arbitrary rules and filter fragments and checks the document
//! frame: fixed prolog, TreeWalker always present, suppression holder
//! tied to the literal marker.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stylecfg_core::{DOCTYPE_DECLARATION, GENERATED_COMMENT, XML_DECLARATION, compile_rules};
use stylecfg_types::{
    ActiveRule, FilterSettings, RuleDefinition, SUPPRESS_WARNINGS_FILTER_MARKER, Severity,
};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    rules: Vec<FuzzRule>,
    filters: Option<String>,
}

#[derive(Arbitrary, Debug)]
struct FuzzRule {
    rule_key: String,
    config_key: String,
    severity: u8,
    template: bool,
    params: Vec<(String, Option<String>)>,
}

impl FuzzRule {
    fn to_active_rule(&self) -> ActiveRule {
        let severity = Severity::ALL[usize::from(self.severity) % Severity::ALL.len()];
        let mut rule = ActiveRule::new(self.rule_key.clone(), self.config_key.clone(), severity);
        rule.definition = RuleDefinition {
            template: self.template,
            params: self.params.iter().map(|(name, _)| name.clone()).collect(),
        };
        for (name, value) in &self.params {
            if let Some(value) = value {
                rule.parameters.insert(name.clone(), value.clone());
            }
        }
        rule
    }
}

fuzz_target!(|input: FuzzInput| {
    if input.rules.len() > 64 {
        return;
    }

    let rules: Vec<ActiveRule> = input.rules.iter().map(FuzzRule::to_active_rule).collect();
    let settings = FilterSettings::new(input.filters.clone());

    let out = compile_rules(&rules, &settings, Vec::new()).expect("Vec writer never fails");
    let xml = String::from_utf8(out).expect("output is utf-8");

    let prolog = format!("{XML_DECLARATION}{DOCTYPE_DECLARATION}{GENERATED_COMMENT}<module name=\"Checker\">");
    assert!(xml.starts_with(&prolog));
    assert!(xml.ends_with("</module></module>"));
    assert!(xml.contains("<module name=\"TreeWalker\"><module name=\"FileContentsHolder\"/>"));

    let filters = settings.filters();
    if !filters.contains("SuppressWarningsHolder") {
        let holders = "<module name=\"FileContentsHolder\"/><module name=\"SuppressWarningsHolder\"/>";
        assert_eq!(
            xml.contains(holders),
            filters.contains(SUPPRESS_WARNINGS_FILTER_MARKER)
        );
    }
});
