//! Shared test utilities for the stylecfg workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for generating rules, profiles and filter settings
//! - **fixtures**: Sample profiles, settings and profile files
//!
//! # Example
//!
//! ```rust,ignore
//! use stylecfg_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn rules_have_keys(rule in arb::arb_active_rule()) {
//!         assert!(!rule.config_key.is_empty());
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;

pub use arb::{
    arb_active_rule, arb_active_rules, arb_config_key, arb_filter_settings, arb_profile,
    arb_severity,
};
pub use fixtures::{sample_files, sample_profiles};
