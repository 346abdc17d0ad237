//! Profile compiler: turns an active rule profile into a Checkstyle
//! configuration document.
//!
//! This crate is I/O-free apart from the caller-supplied writer.

mod export;
mod group;
mod module;
mod severity;
mod validate;
mod xml;

pub use export::{
    CheckstyleExporter, DOCTYPE_DECLARATION, ExportError, GENERATED_COMMENT, XML_DECLARATION,
    compile_rules,
};
pub use group::{
    Placement, RuleGroup, RuleGroups, TREE_WALKER_PREFIX, group_by_config_key, is_in_tree_walker,
};
pub use module::module_name;
pub use severity::checkstyle_severity;
pub use validate::{ProfileError, ProfileWarning, validate_profile, validate_rules};
