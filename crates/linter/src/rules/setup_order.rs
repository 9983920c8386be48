//! vue-script-setup-order / pinia-setup-order
//!
//! Enforce the configured group order inside `<script setup>` and inside
//! Pinia setup stores.
//!
//! ```vue
//! <script setup>
//! function reset() {}
//! const count = ref(0); // States should be placed above methods
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::groups::{resolve_order, DefinitionInstance, DefinitionKind, GroupOrder, Vocabulary};
use crate::order::find_first_out_of_order;
use crate::settings::ResolvedSettings;
use crate::{LintContext, RuleCategory, RuleMeta};

/// Configuration shared by both order rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupOrderConfig {
    /// Full permutation of the groups; the shared setting is used when absent
    #[serde(default)]
    pub order: Option<Vec<String>>,
}

fn order_from(config: &SetupOrderConfig, fallback: &GroupOrder, vocabulary: Vocabulary) -> GroupOrder {
    match &config.order {
        Some(order) => resolve_order(Some(order), vocabulary),
        None => fallback.clone(),
    }
}

fn report_order(ctx: &mut LintContext, rule: &'static str, instance: &DefinitionInstance, order: &GroupOrder) {
    for violation in find_first_out_of_order(&instance.groups, order) {
        ctx.report(
            Diagnostic::warning(rule, violation.member.span, violation.message()).with_label(
                violation.above.span,
                format!("first of the {} is here", violation.above_group.humanized()),
            ),
        );
    }
}

/// vue-script-setup-order rule
#[derive(Debug, Clone)]
pub struct VueScriptSetupOrder {
    order: GroupOrder,
}

impl RuleMeta for VueScriptSetupOrder {
    const NAME: &'static str = "vue-script-setup-order";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl Default for VueScriptSetupOrder {
    fn default() -> Self {
        Self::new(GroupOrder::default_for(Vocabulary::Component))
    }
}

impl VueScriptSetupOrder {
    pub fn new(order: GroupOrder) -> Self {
        Self { order }
    }

    pub fn with_config(config: &SetupOrderConfig, settings: &ResolvedSettings) -> Self {
        Self::new(order_from(config, &settings.group_order, Vocabulary::Component))
    }

    pub fn order(&self) -> &GroupOrder {
        &self.order
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::ScriptSetup {
            report_order(ctx, Self::NAME, instance, &self.order);
        }
    }
}

/// pinia-setup-order rule
#[derive(Debug, Clone)]
pub struct PiniaSetupOrder {
    order: GroupOrder,
}

impl RuleMeta for PiniaSetupOrder {
    const NAME: &'static str = "pinia-setup-order";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl Default for PiniaSetupOrder {
    fn default() -> Self {
        Self::new(GroupOrder::default_for(Vocabulary::Store))
    }
}

impl PiniaSetupOrder {
    pub fn new(order: GroupOrder) -> Self {
        Self { order }
    }

    pub fn with_config(config: &SetupOrderConfig, settings: &ResolvedSettings) -> Self {
        Self::new(order_from(config, &settings.pinia_group_order, Vocabulary::Store))
    }

    pub fn order(&self) -> &GroupOrder {
        &self.order
    }

    pub fn check(&self, ctx: &mut LintContext, instance: &DefinitionInstance) {
        if instance.kind == DefinitionKind::Store {
            report_order(ctx, Self::NAME, instance, &self.order);
        }
    }
}
