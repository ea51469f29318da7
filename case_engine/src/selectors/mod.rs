//! Derived views over evidence state.
//!
//! These are pure functions of `(evidence, catalog, stack definitions)` and are
//! cheap enough to recompute on every state change.

mod mmo;
mod stacking;

pub use mmo::*;
pub use stacking::*;
