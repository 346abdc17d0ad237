//! Checkstyle configuration exporter.
//!
//! Assembles the document in a fixed order:
//! - XML declaration, DOCTYPE, generated-by comment, `<module name="Checker">`
//! - the custom filter fragment, verbatim, when it is non-blank
//! - root-level rule modules
//! - `<module name="TreeWalker">` with its holder modules, then nested rule modules

use std::io::{self, Write};

use tracing::debug;

use stylecfg_types::{
    ActiveRule, FilterSettings, JAVA_KEY, MIME_TYPE_XML, PLUGIN_NAME, Profile, REPOSITORY_KEY,
};

use crate::group::{Placement, group_by_config_key};
use crate::module::write_module;
use crate::xml::XmlSink;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
pub const DOCTYPE_DECLARATION: &str = "<!DOCTYPE module PUBLIC \"-//Puppy Crawl//DTD Check Configuration 1.2//EN\" \"http://www.puppycrawl.com/dtds/configuration_1_2.dtd\">";
pub const GENERATED_COMMENT: &str = "<!-- Generated by stylecfg -->";

const CHECKER_OPEN: &str = "<module name=\"Checker\">";
const TREE_WALKER_OPEN: &str = "<module name=\"TreeWalker\">";
const FILE_CONTENTS_HOLDER: &str = "<module name=\"FileContentsHolder\"/>";
const SUPPRESS_WARNINGS_HOLDER: &str = "<module name=\"SuppressWarningsHolder\"/>";
const MODULE_CLOSE: &str = "</module>";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to export the profile '{profile}'")]
    Write { profile: String, source: io::Error },
}

/// Exports profiles as Checkstyle configuration documents.
#[derive(Debug, Clone, Default)]
pub struct CheckstyleExporter {
    settings: FilterSettings,
}

impl CheckstyleExporter {
    pub const KEY: &'static str = REPOSITORY_KEY;
    pub const NAME: &'static str = PLUGIN_NAME;
    pub const MIME_TYPE: &'static str = MIME_TYPE_XML;

    pub fn new(settings: FilterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn supported_languages(&self) -> &'static [&'static str] {
        &[JAVA_KEY]
    }

    /// Writes the configuration for the profile's Checkstyle rules to `writer`.
    ///
    /// A write failure aborts the document; the error names the profile.
    pub fn export_profile<W: Write>(&self, profile: &Profile, writer: W) -> Result<(), ExportError> {
        self.export_repository(profile, REPOSITORY_KEY, writer)
    }

    /// Like [`Self::export_profile`], selecting rules from `repository` instead.
    pub fn export_repository<W: Write>(
        &self,
        profile: &Profile,
        repository: &str,
        writer: W,
    ) -> Result<(), ExportError> {
        let rules = profile.active_rules_by_repository(repository);
        debug!(
            profile = %profile,
            repository,
            active_rules = rules.len(),
            "exporting profile"
        );

        compile_rules(rules, &self.settings, writer)
            .map(drop)
            .map_err(|source| ExportError::Write {
                profile: profile.name.clone(),
                source,
            })
    }

    pub fn export_to_string(&self, profile: &Profile) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.export_profile(profile, &mut buf)?;
        String::from_utf8(buf).map_err(|e| ExportError::Write {
            profile: profile.name.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}

/// Compiles already-filtered rules into a configuration document.
///
/// Returns the writer once the document has been flushed to it.
pub fn compile_rules<'a, I, W>(rules: I, settings: &FilterSettings, writer: W) -> io::Result<W>
where
    I: IntoIterator<Item = &'a ActiveRule>,
    W: Write,
{
    let groups = group_by_config_key(rules);
    let suppress_warnings = settings.suppress_warnings_enabled();
    debug!(
        config_keys = groups.len(),
        suppress_warnings, "compiling checkstyle configuration"
    );

    let mut sink = XmlSink::new(writer);

    sink.raw(XML_DECLARATION)?;
    sink.raw(DOCTYPE_DECLARATION)?;
    sink.raw(GENERATED_COMMENT)?;
    sink.raw(CHECKER_OPEN)?;

    if let Some(filters) = settings.custom_filters() {
        sink.raw(filters)?;
    }

    for rule in groups.rules_placed(Placement::Checker) {
        write_module(&mut sink, rule)?;
    }

    sink.raw(TREE_WALKER_OPEN)?;
    sink.raw(FILE_CONTENTS_HOLDER)?;
    if suppress_warnings {
        sink.raw(SUPPRESS_WARNINGS_HOLDER)?;
    }
    for rule in groups.rules_placed(Placement::TreeWalker) {
        write_module(&mut sink, rule)?;
    }
    sink.raw(MODULE_CLOSE)?;

    sink.raw(MODULE_CLOSE)?;
    sink.finish()
}
