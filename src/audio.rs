//! Audio output.
//!
//! The controller commands a [`PlaybackSink`]; [`RodioSink`] is the sink used
//! by the terminal player.

mod device;
mod types;

pub use device::*;
pub use types::*;
