//! Grouping of active rules by config key, and placement of each group
//! inside the Checkstyle module tree.

use std::collections::HashMap;

use stylecfg_types::ActiveRule;

/// Config keys with this prefix live under the `TreeWalker` module.
pub const TREE_WALKER_PREFIX: &str = "Checker/TreeWalker/";

/// Where a group of rules lands in the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Directly under the root `Checker` module.
    Checker,
    /// Inside the nested `TreeWalker` module.
    TreeWalker,
}

impl Placement {
    pub fn of(config_key: &str) -> Self {
        if is_in_tree_walker(config_key) {
            Placement::TreeWalker
        } else {
            Placement::Checker
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Checker => "checker",
            Placement::TreeWalker => "tree-walker",
        }
    }
}

/// Case-insensitive prefix test against [`TREE_WALKER_PREFIX`].
///
/// Folds case one character at a time, so U+212A KELVIN SIGN matches `k`.
pub fn is_in_tree_walker(config_key: &str) -> bool {
    let mut key = config_key.chars();
    TREE_WALKER_PREFIX
        .chars()
        .all(|p| key.next().is_some_and(|c| chars_eq_ignore_case(c, p)))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase()) || a.to_lowercase().eq(b.to_lowercase())
}

/// Rules sharing one config key, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup<'a> {
    pub config_key: &'a str,
    pub rules: Vec<&'a ActiveRule>,
}

impl RuleGroup<'_> {
    pub fn placement(&self) -> Placement {
        Placement::of(self.config_key)
    }
}

/// Insertion-ordered multimap from config key to rules.
///
/// Keys keep first-occurrence order; rules keep their relative input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleGroups<'a> {
    groups: Vec<RuleGroup<'a>>,
}

impl<'a> RuleGroups<'a> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct config keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleGroup<'a>> {
        self.groups.iter()
    }

    pub fn get(&self, config_key: &str) -> Option<&[&'a ActiveRule]> {
        self.groups
            .iter()
            .find(|g| g.config_key == config_key)
            .map(|g| g.rules.as_slice())
    }

    /// Groups with the given placement, in key order.
    pub fn placed(&self, placement: Placement) -> impl Iterator<Item = &RuleGroup<'a>> {
        self.groups
            .iter()
            .filter(move |g| g.placement() == placement)
    }

    /// All rules with the given placement, flattened in emission order.
    pub fn rules_placed(&self, placement: Placement) -> impl Iterator<Item = &'a ActiveRule> + '_ {
        self.placed(placement).flat_map(|g| g.rules.iter().copied())
    }
}

/// Partition `rules` by config key. No rule is merged or dropped.
pub fn group_by_config_key<'a, I>(rules: I) -> RuleGroups<'a>
where
    I: IntoIterator<Item = &'a ActiveRule>,
{
    let mut groups: Vec<RuleGroup<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for rule in rules {
        let key = rule.config_key.as_str();
        match index.get(key) {
            Some(&i) => groups[i].rules.push(rule),
            None => {
                index.insert(key, groups.len());
                groups.push(RuleGroup {
                    config_key: key,
                    rules: vec![rule],
                });
            }
        }
    }

    RuleGroups { groups }
}
