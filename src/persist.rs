//! User preferences that survive restarts: volume, shuffle and the tag
//! filter.
//!
//! The record is read once at startup and rewritten after every change the
//! user makes. A record that fails to parse or validate is treated as absent.

mod record;
mod store;

pub use record::*;
pub use store::*;

#[cfg(test)]
mod tests;
