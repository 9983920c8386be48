//! Shared `settings.vue` configuration
//!
//! Every field is validated on its own. A field that does not deserialize or
//! validate is replaced by its default and a warning is logged; analysis never
//! fails because of configuration.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::groups::{resolve_order, GroupOrder, Vocabulary};

/// Extra module names mapped to extra exported names to trace
pub type ExtendedNames = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub group_order: GroupOrder,
    pub pinia_group_order: GroupOrder,
    pub extended_computed_properties: ExtendedNames,
    pub extended_watchers: ExtendedNames,
    pub extended_hooks: ExtendedNames,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            group_order: GroupOrder::default_for(Vocabulary::Component),
            pinia_group_order: GroupOrder::default_for(Vocabulary::Store),
            extended_computed_properties: ExtendedNames::default(),
            extended_watchers: ExtendedNames::default(),
            extended_hooks: ExtendedNames::default(),
        }
    }
}

impl ResolvedSettings {
    /// Build from the `settings` object of a config file
    pub fn from_value(settings: Option<&Value>) -> Self {
        let Some(vue) = settings.and_then(|settings| settings.get("vue")) else {
            return Self::default();
        };

        Self {
            group_order: order_field(vue, "groupOrder", Vocabulary::Component),
            pinia_group_order: order_field(vue, "piniaGroupOrder", Vocabulary::Store),
            extended_computed_properties: field(vue, "extendedComputedProperties"),
            extended_watchers: field(vue, "extendedWatchers"),
            extended_hooks: field(vue, "extendedHooks"),
        }
    }
}

fn order_field(vue: &Value, key: &str, vocabulary: Vocabulary) -> GroupOrder {
    let configured: Option<Vec<String>> = vue.get(key).map(|_| field(vue, key));
    let order = resolve_order(configured.as_deref(), vocabulary);
    if let Some(configured) = &configured {
        let accepted = configured.len() == order.as_slice().len()
            && configured
                .iter()
                .zip(order.as_slice())
                .all(|(name, group)| name == group.as_str());
        if !accepted {
            tracing::warn!(
                setting = key,
                ?configured,
                "group order is not a permutation of the default groups, using the default"
            );
        }
    }
    order
}

/// Deserialize `object[key]`, or the default when absent or invalid
fn field<T: DeserializeOwned + Default>(object: &Value, key: &str) -> T {
    match object.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|error| {
            tracing::warn!(setting = key, %error, "invalid setting, using the default");
            T::default()
        }),
    }
}

/// Parse the options object of a rule, falling back to its defaults
pub fn parse_rule_options<T: DeserializeOwned + Default>(rule: &str, options: Option<&Value>) -> T {
    match options {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|error| {
            tracing::warn!(rule, %error, "invalid rule options, using the defaults");
            T::default()
        }),
    }
}
