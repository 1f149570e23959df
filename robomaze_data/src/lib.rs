//! Shared data model for Robomaze level packs.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_level, validate_pack};
