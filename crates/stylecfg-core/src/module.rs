//! Serialization of one active rule as a Checkstyle `<module>` element.

use std::io::{self, Write};

use stylecfg_types::ActiveRule;

use crate::severity::checkstyle_severity;
use crate::xml::XmlSink;

/// The module name for a config key: the text after its last `/`.
///
/// A key without any `/` is used whole.
pub fn module_name(config_key: &str) -> &str {
    config_key
        .rsplit_once('/')
        .map_or(config_key, |(_, name)| name)
}

pub(crate) fn write_module<W: Write>(sink: &mut XmlSink<W>, rule: &ActiveRule) -> io::Result<()> {
    sink.raw("<module name=\"")?;
    sink.escaped(module_name(&rule.config_key))?;
    sink.raw("\">")?;

    // Distinguishes instances of the same template module.
    if rule.definition.template {
        write_property(sink, "id", &rule.rule_key)?;
    }
    write_property(sink, "severity", checkstyle_severity(rule.severity))?;

    for param in &rule.definition.params {
        if let Some(value) = rule.parameter(param) {
            write_property(sink, param, value)?;
        }
    }

    sink.raw("</module>")
}

/// Writes `<property name=".." value=".."/>` unless `value` is blank.
fn write_property<W: Write>(sink: &mut XmlSink<W>, name: &str, value: &str) -> io::Result<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    sink.raw("<property name=\"")?;
    sink.escaped(name)?;
    sink.raw("\" value=\"")?;
    sink.escaped(value)?;
    sink.raw("\"/>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecfg_types::Severity;

    fn render(rule: &ActiveRule) -> String {
        let mut sink = XmlSink::new(Vec::new());
        write_module(&mut sink, rule).unwrap();
        String::from_utf8(sink.finish().unwrap()).unwrap()
    }

    fn magic_number() -> ActiveRule {
        let mut rule = ActiveRule::new(
            "com.puppycrawl.tools.checkstyle.checks.coding.MagicNumberCheck",
            "Checker/TreeWalker/MagicNumber",
            Severity::Minor,
        );
        rule.definition.params = vec![
            "ignoreNumbers".to_string(),
            "ignoreHashCodeMethod".to_string(),
        ];
        rule
    }

    #[test]
    fn module_name_is_last_segment() {
        assert_eq!(module_name("Checker/TreeWalker/MagicNumber"), "MagicNumber");
        assert_eq!(module_name("Checker/JavadocPackage"), "JavadocPackage");
        assert_eq!(module_name("Standalone"), "Standalone");
        assert_eq!(module_name("Checker/"), "");
    }

    #[test]
    fn plain_rule_has_only_severity() {
        let rule = ActiveRule::new("JavadocPackage", "Checker/JavadocPackage", Severity::Major);
        assert_eq!(
            render(&rule),
            "<module name=\"JavadocPackage\"><property name=\"severity\" value=\"warning\"/></module>"
        );
    }

    #[test]
    fn parameters_follow_definition_order() {
        let mut rule = magic_number();
        rule.parameters
            .insert("ignoreHashCodeMethod".to_string(), "true".to_string());
        rule.parameters
            .insert("ignoreNumbers".to_string(), "0,1,2".to_string());

        assert_eq!(
            render(&rule),
            "<module name=\"MagicNumber\">\
             <property name=\"severity\" value=\"info\"/>\
             <property name=\"ignoreNumbers\" value=\"0,1,2\"/>\
             <property name=\"ignoreHashCodeMethod\" value=\"true\"/>\
             </module>"
        );
    }

    #[test]
    fn blank_parameters_are_omitted() {
        let mut rule = magic_number();
        rule.parameters
            .insert("ignoreNumbers".to_string(), "   ".to_string());
        rule.parameters
            .insert("ignoreHashCodeMethod".to_string(), String::new());

        let xml = render(&rule);
        assert!(!xml.contains("ignoreNumbers"));
        assert!(!xml.contains("ignoreHashCodeMethod"));
        assert!(xml.contains("name=\"severity\""));
    }

    #[test]
    fn undeclared_parameters_are_ignored() {
        let mut rule = magic_number();
        rule.parameters
            .insert("notDeclared".to_string(), "x".to_string());
        assert!(!render(&rule).contains("notDeclared"));
    }

    #[test]
    fn template_rule_gets_id_before_severity() {
        let mut rule = ActiveRule::new("regexp_1", "Checker/TreeWalker/Regexp", Severity::Blocker);
        rule.definition.template = true;

        assert_eq!(
            render(&rule),
            "<module name=\"Regexp\">\
             <property name=\"id\" value=\"regexp_1\"/>\
             <property name=\"severity\" value=\"error\"/>\
             </module>"
        );
    }

    #[test]
    fn non_template_rule_has_no_id() {
        let rule = ActiveRule::new("regexp_1", "Checker/TreeWalker/Regexp", Severity::Info);
        assert!(!render(&rule).contains("name=\"id\""));
    }

    #[test]
    fn names_and_values_are_escaped() {
        let mut rule = ActiveRule::new("k", "Checker/TreeWalker/A<&>", Severity::Info);
        rule.definition.params = vec!["fo\"rmat".to_string()];
        rule.parameters
            .insert("fo\"rmat".to_string(), "^[a-z]+'<>&$".to_string());

        assert_eq!(
            render(&rule),
            "<module name=\"A&lt;&amp;&gt;\">\
             <property name=\"severity\" value=\"info\"/>\
             <property name=\"fo&quot;rmat\" value=\"^[a-z]+&apos;&lt;&gt;&amp;$\"/>\
             </module>"
        );
    }
}
