//! vue-script-setup-newlines-between-groups / pinia-setup-newlines-between-groups
//!
//! Enforce a fixed number of blank lines between consecutive groups. Groups
//! are compared as contiguous runs in source order; when a group shows up
//! again after another one started, the ordering is already broken and
//! spacing is not checked.

use serde::{Deserialize, Serialize};

use crate::groups::{DefinitionInstance, DefinitionKind};
use crate::order::{group_runs, is_contiguous_by_group};
use crate::spacing::{check_member_spacing, newlines_word};
use crate::{LintContext, RuleCategory, RuleMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlinesBetweenGroupsConfig {
    #[serde(default = "default_number_of_newlines")]
    pub number_of_newlines: u32,
}

fn default_number_of_newlines() -> u32 {
    1
}

impl Default for NewlinesBetweenGroupsConfig {
    fn default() -> Self {
        Self {
            number_of_newlines: default_number_of_newlines(),
        }
    }
}

fn message(expected: u32, actual: usize) -> String {
    format!(
        "There must be exactly {expected} {} between each group (detected {actual} newlines)",
        newlines_word(expected)
    )
}

fn check_runs(ctx: &mut LintContext, rule: &'static str, instance: &DefinitionInstance, expected: u32) {
    let runs = group_runs(&instance.groups);
    if !is_contiguous_by_group(&runs) {
        tracing::trace!(rule, anchor = ?instance.anchor, "groups interleave, skipping spacing");
        return;
    }
    for pair in runs.windows(2) {
        check_member_spacing(ctx, rule, &pair[0].last, &pair[1].first, expected, message);
    }
}

/// vue-script-setup-newlines-between-groups rule
#[derive(Debug, Clone, Default)]
pub struct VueScriptSetupNewlinesBetweenGroups {
    pub config: NewlinesBetweenGroupsConfig,
}

impl RuleMeta for VueScriptSetupNewlinesBetweenGroups {
    const NAME: &'static str = "vue-script-setup-newlines-between-groups";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl VueScriptSetupNewlinesBetweenGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NewlinesBetweenGroupsConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::ScriptSetup {
            check_runs(ctx, Self::NAME, instance, self.config.number_of_newlines);
        }
    }
}

/// pinia-setup-newlines-between-groups rule
#[derive(Debug, Clone, Default)]
pub struct PiniaSetupNewlinesBetweenGroups {
    pub config: NewlinesBetweenGroupsConfig,
}

impl RuleMeta for PiniaSetupNewlinesBetweenGroups {
    const NAME: &'static str = "pinia-setup-newlines-between-groups";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl PiniaSetupNewlinesBetweenGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NewlinesBetweenGroupsConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::Store {
            check_runs(ctx, Self::NAME, instance, self.config.number_of_newlines);
        }
    }
}
