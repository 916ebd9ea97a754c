//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema for the player host (where
//! the catalog and media live, where preferences and logs are kept, key
//! steps) and helpers to load it from disk and the environment.

mod load;
mod schema;

pub use load::*;
pub use schema::*;
