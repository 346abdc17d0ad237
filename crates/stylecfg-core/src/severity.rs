//! Profile severity -> Checkstyle severity vocabulary.

use stylecfg_types::Severity;

/// Maps a profile severity onto the `severity` property value Checkstyle understands.
///
/// The table is total over [`Severity`]; adding a variant without a mapping
/// is a compile error.
pub fn checkstyle_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Info | Severity::Minor => "info",
        Severity::Major => "warning",
        Severity::Critical | Severity::Blocker => "error",
    }
}
