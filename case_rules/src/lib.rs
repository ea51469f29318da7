//! # Case Rules
//!
//! The "Case Bible" crate - evidence objects, suspects, the token economy and
//! the authored content of a case. This crate holds no runtime session state
//! and talks to no external services.

pub mod case_content;
pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;

pub use case_content::*;
pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
