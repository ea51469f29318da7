//! # Case Engine
//!
//! Runtime state for a detective case built on `case_rules` content: the
//! evidence timeline and its token economy, derived views, the case-file
//! puzzle, interrogations and the accusation flow.
//!
//! ## Core Components
//!
//! - **evidence_store**: Reducer over story objects, timeline entries and tokens
//! - **selectors**: Pure derivations (stacked timeline, MMO progress)
//! - **case_file**: Clue-to-slot deduction puzzle with scoring
//! - **interrogation**: Lines of inquiry and dialogue sessions with suspects
//! - **accusation**: Review, evaluation and results of a formal accusation
//! - **collaborators**: Async seams for image, dialogue and evaluation services
//! - **session**: `CaseSession`, the single store a host drives
//!
//! ## Design Philosophy
//!
//! - **Reducer-Driven**: State changes only through explicit actions with typed outcomes
//! - **Derived Views**: Stacks and progress are recomputed from state, never stored
//! - **Host-Agnostic**: Services are traits; the engine never does I/O itself

pub mod accusation;
pub mod case_file;
pub mod collaborators;
pub mod error;
pub mod events;
pub mod evidence_store;
pub mod images;
pub mod interrogation;
pub mod selectors;
pub mod session;

pub use accusation::*;
pub use case_file::*;
pub use collaborators::*;
pub use error::*;
pub use events::*;
pub use evidence_store::*;
pub use images::*;
pub use interrogation::*;
pub use selectors::*;
pub use session::*;
