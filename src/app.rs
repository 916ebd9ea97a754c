//! Application core: the playback cursor and the controller that sequences
//! catalog, filter, cursor, sink and settings in response to events.

mod controller;
mod cursor;
mod events;
mod render;

pub use controller::*;
pub use cursor::*;
pub use events::*;
pub use render::*;
