//! Validation: error detection and best-effort repair

mod detector;
mod fixer;

pub use detector::detect;
pub use fixer::{fix, suggest_fixes};
