//! Track catalog: the loaded tracks and images, the providers that fetch
//! them, and the tag filtering that turns the catalog into a playlist.

mod catalog;
mod model;
mod tags;

pub use catalog::*;
pub use model::*;
pub use tags::*;

#[cfg(test)]
mod tests;
