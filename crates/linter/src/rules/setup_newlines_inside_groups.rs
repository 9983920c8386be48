//! vue-script-setup-newlines-inside-groups / pinia-setup-newlines-inside-groups
//!
//! Enforce the number of blank lines between consecutive members of the same
//! group. The count depends on whether the two members span one line or
//! several, and can be set per group.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::groups::{DefinitionInstance, DefinitionKind, GroupName};
use crate::spacing::{check_member_spacing, newlines_word, NewlinesPolicy};
use crate::{LintContext, RuleCategory, RuleMeta};

/// Groups whose members are never spaced by this rule
const UNCHECKED_GROUPS: &[GroupName] = &[
    GroupName::Imports,
    GroupName::DefineProps,
    GroupName::DefineEmits,
    GroupName::DefineSlots,
    GroupName::DefineExpose,
    GroupName::DefineOptions,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlinesInsideGroupsConfig {
    /// Policy for every group without an override
    #[serde(flatten)]
    pub policy: NewlinesPolicy,
    /// Per-group overrides
    #[serde(default)]
    pub groups: IndexMap<GroupName, NewlinesPolicy>,
}

impl NewlinesInsideGroupsConfig {
    pub fn policy_for(&self, group: GroupName) -> NewlinesPolicy {
        self.groups.get(&group).copied().unwrap_or(self.policy)
    }
}

fn message(expected: u32, actual: usize) -> String {
    format!(
        "There must be exactly {expected} {} between this group item and the group item above (detected {actual} newlines)",
        newlines_word(expected)
    )
}

fn check_groups(
    ctx: &mut LintContext,
    rule: &'static str,
    instance: &DefinitionInstance,
    config: &NewlinesInsideGroupsConfig,
) {
    for (group, members) in instance.groups.iter() {
        if UNCHECKED_GROUPS.contains(&group) {
            continue;
        }
        let policy = config.policy_for(group);
        for pair in members.windows(2) {
            let expected = policy.expected(ctx, pair[0].statement, pair[1].statement);
            check_member_spacing(ctx, rule, &pair[0], &pair[1], expected, message);
        }
    }
}

/// vue-script-setup-newlines-inside-groups rule
#[derive(Debug, Clone, Default)]
pub struct VueScriptSetupNewlinesInsideGroups {
    pub config: NewlinesInsideGroupsConfig,
}

impl RuleMeta for VueScriptSetupNewlinesInsideGroups {
    const NAME: &'static str = "vue-script-setup-newlines-inside-groups";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl VueScriptSetupNewlinesInsideGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NewlinesInsideGroupsConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::ScriptSetup {
            check_groups(ctx, Self::NAME, instance, &self.config);
        }
    }
}

/// pinia-setup-newlines-inside-groups rule
#[derive(Debug, Clone, Default)]
pub struct PiniaSetupNewlinesInsideGroups {
    pub config: NewlinesInsideGroupsConfig,
}

impl RuleMeta for PiniaSetupNewlinesInsideGroups {
    const NAME: &'static str = "pinia-setup-newlines-inside-groups";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl PiniaSetupNewlinesInsideGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NewlinesInsideGroupsConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::Store {
            check_groups(ctx, Self::NAME, instance, &self.config);
        }
    }
}
