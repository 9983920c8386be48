//! Vue and Pinia names recognised by the setup rules

use phf::phf_set;

/// Modules the built-in composition API names are traced from
pub const COMPOSITION_API_MODULES: &[&str] = &["vue", "@vue/composition-api"];

/// Module `defineStore` is traced from
pub const PINIA_MODULE: &str = "pinia";

pub const DEFINE_STORE: &str = "defineStore";

pub const COMPUTED_NAMES: &[&str] = &["computed"];

pub const WATCHER_NAMES: &[&str] = &["watch", "watchEffect", "watchSyncEffect", "watchPostEffect"];

pub const HOOK_NAMES: &[&str] = &[
    "onMounted",
    "onUpdated",
    "onUnmounted",
    "onBeforeMount",
    "onBeforeUpdate",
    "onBeforeUnmount",
    "onErrorCaptured",
    "onRenderTracked",
    "onRenderTriggered",
    "onActivated",
    "onDeactivated",
    "onServerPrefetch",
];

/// `<script setup>` compiler macros. These are globals, never imported.
pub static COMPILER_MACROS: phf::Set<&'static str> = phf_set! {
    "defineProps",
    "defineEmits",
    "defineModel",
    "defineSlots",
    "defineExpose",
    "defineOptions",
};

/// Names that must not be imported from `vue` inside `<script setup>`
pub static MACRO_IMPORT_NAMES: phf::Set<&'static str> = phf_set! {
    "defineProps",
    "defineEmits",
    "defineModel",
    "defineSlots",
    "defineExpose",
    "defineOptions",
    "withDefaults",
};

pub const WITH_DEFAULTS: &str = "withDefaults";

pub fn is_compiler_macro(name: &str) -> bool {
    COMPILER_MACROS.contains(name)
}
