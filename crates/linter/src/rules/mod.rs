//! Vue script setup and Pinia store rules

pub mod newline_before_first_type_only_import;
pub mod pinia_no_function_expressions;
pub mod pinia_setup_return;
pub mod pinia_style;
pub mod setup_newlines_between_groups;
pub mod setup_newlines_inside_groups;
pub mod setup_order;
pub mod vue_no_compiler_macro_imports;
pub mod vue_no_function_expressions;

// Re-export rule structs
pub use newline_before_first_type_only_import::NewlineBeforeFirstTypeOnlyImport;
pub use pinia_no_function_expressions::PiniaNoFunctionExpressions;
pub use pinia_setup_return::PiniaSetupReturn;
pub use pinia_style::{PiniaStyle, StoreStyle};
pub use setup_newlines_between_groups::{
    NewlinesBetweenGroupsConfig, PiniaSetupNewlinesBetweenGroups,
    VueScriptSetupNewlinesBetweenGroups,
};
pub use setup_newlines_inside_groups::{
    NewlinesInsideGroupsConfig, PiniaSetupNewlinesInsideGroups, VueScriptSetupNewlinesInsideGroups,
};
pub use setup_order::{PiniaSetupOrder, SetupOrderConfig, VueScriptSetupOrder};
pub use vue_no_compiler_macro_imports::VueNoCompilerMacroImports;
pub use vue_no_function_expressions::VueNoFunctionExpressions;
