//! Setup groups and their configured order
//!
//! A `<script setup>` body and a Pinia setup store body are both split into
//! named groups (imports, states, computed properties, ...). The names form a
//! closed vocabulary per definition kind, and a configured order is only
//! accepted when it is a permutation of that vocabulary.

pub mod aggregate;

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub use aggregate::{DefinitionInstance, DefinitionKind, GroupMember, GroupedNodes};

/// A semantic bucket inside a setup body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupName {
    Imports,
    DefineModel,
    DefineProps,
    DefineEmits,
    DefineSlots,
    States,
    ComputedProperties,
    Watchers,
    Hooks,
    Methods,
    DefineExpose,
    DefineOptions,
}

impl GroupName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Imports => "imports",
            Self::DefineModel => "defineModel",
            Self::DefineProps => "defineProps",
            Self::DefineEmits => "defineEmits",
            Self::DefineSlots => "defineSlots",
            Self::States => "states",
            Self::ComputedProperties => "computedProperties",
            Self::Watchers => "watchers",
            Self::Hooks => "hooks",
            Self::Methods => "methods",
            Self::DefineExpose => "defineExpose",
            Self::DefineOptions => "defineOptions",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        COMPONENT_ORDER
            .iter()
            .copied()
            .find(|group| group.as_str() == name)
    }

    /// Label used in diagnostics
    pub fn humanized(self) -> &'static str {
        match self {
            Self::DefineProps => "props",
            Self::DefineEmits => "emits",
            Self::ComputedProperties => "computed properties",
            other => other.as_str(),
        }
    }

    /// The compiler macro whose calls populate this group
    pub fn from_macro(name: &str) -> Option<Self> {
        match name {
            "defineModel" => Some(Self::DefineModel),
            "defineProps" => Some(Self::DefineProps),
            "defineEmits" => Some(Self::DefineEmits),
            "defineSlots" => Some(Self::DefineSlots),
            "defineExpose" => Some(Self::DefineExpose),
            "defineOptions" => Some(Self::DefineOptions),
            _ => None,
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const COMPONENT_ORDER: [GroupName; 12] = [
    GroupName::Imports,
    GroupName::DefineModel,
    GroupName::DefineProps,
    GroupName::DefineEmits,
    GroupName::DefineSlots,
    GroupName::States,
    GroupName::ComputedProperties,
    GroupName::Watchers,
    GroupName::Hooks,
    GroupName::Methods,
    GroupName::DefineExpose,
    GroupName::DefineOptions,
];

pub const STORE_ORDER: [GroupName; 4] = [
    GroupName::States,
    GroupName::ComputedProperties,
    GroupName::Watchers,
    GroupName::Methods,
];

/// Which closed set of group names applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Component,
    Store,
}

impl Vocabulary {
    pub fn default_order(self) -> &'static [GroupName] {
        match self {
            Self::Component => &COMPONENT_ORDER,
            Self::Store => &STORE_ORDER,
        }
    }

    pub fn contains(self, group: GroupName) -> bool {
        self.default_order().contains(&group)
    }
}

/// Validated group order for one vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOrder(Vec<GroupName>);

impl GroupOrder {
    pub fn default_for(vocabulary: Vocabulary) -> Self {
        Self(vocabulary.default_order().to_vec())
    }

    pub fn as_slice(&self) -> &[GroupName] {
        &self.0
    }

    pub fn position(&self, group: GroupName) -> Option<usize> {
        self.0.iter().position(|candidate| *candidate == group)
    }
}

/// Accept `configured` only if it is a permutation of the vocabulary.
///
/// Anything else (wrong length, unknown name, duplicate) yields the default.
pub fn resolve_order(configured: Option<&[String]>, vocabulary: Vocabulary) -> GroupOrder {
    let Some(configured) = configured else {
        return GroupOrder::default_for(vocabulary);
    };
    let expected = vocabulary.default_order();
    if configured.len() != expected.len() {
        return GroupOrder::default_for(vocabulary);
    }

    let mut seen = FxHashSet::default();
    let mut order = Vec::with_capacity(expected.len());
    for name in configured {
        let Some(group) = GroupName::parse(name).filter(|group| vocabulary.contains(*group)) else {
            return GroupOrder::default_for(vocabulary);
        };
        if !seen.insert(group) {
            return GroupOrder::default_for(vocabulary);
        }
        order.push(group);
    }
    GroupOrder(order)
}

/// First letter upper-cased, as used at the start of order messages
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(groups: &[&str]) -> Vec<String> {
        groups.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_valid_permutation_is_kept() {
        let configured = names(&["methods", "watchers", "states", "computedProperties"]);
        let order = resolve_order(Some(&configured), Vocabulary::Store);
        assert_eq!(
            order.as_slice(),
            &[
                GroupName::Methods,
                GroupName::Watchers,
                GroupName::States,
                GroupName::ComputedProperties
            ]
        );
    }

    #[test]
    fn test_invalid_orders_fall_back() {
        let default = GroupOrder::default_for(Vocabulary::Store);
        let too_short = names(&["states", "methods"]);
        let duplicate = names(&["states", "states", "watchers", "methods"]);
        let foreign = names(&["states", "hooks", "watchers", "methods"]);
        let unknown = names(&["states", "getters", "watchers", "methods"]);

        for configured in [too_short, duplicate, foreign, unknown] {
            assert_eq!(resolve_order(Some(&configured), Vocabulary::Store), default);
        }
        assert_eq!(resolve_order(None, Vocabulary::Component).as_slice(), &COMPONENT_ORDER);
    }

    #[test]
    fn test_humanized_names() {
        assert_eq!(GroupName::DefineProps.humanized(), "props");
        assert_eq!(GroupName::ComputedProperties.humanized(), "computed properties");
        assert_eq!(GroupName::DefineExpose.humanized(), "defineExpose");
        assert_eq!(upper_first(GroupName::ComputedProperties.humanized()), "Computed properties");
    }

    #[test]
    fn test_group_names_round_trip_through_serde() {
        let json = serde_json::to_string(&GroupName::ComputedProperties).unwrap();
        assert_eq!(json, "\"computedProperties\"");
        assert_eq!(GroupName::parse("defineSlots"), Some(GroupName::DefineSlots));
        assert_eq!(GroupName::from_macro("defineOptions"), Some(GroupName::DefineOptions));
    }
}
