pub mod check;
pub mod constants;
pub mod lines;
pub mod sfc;

pub use check::*;
pub use constants::*;
pub use lines::SourceLines;
pub use sfc::{parse_scripts, ScriptBlock, SfcError, SfcScripts};
