//! Card-picking state machine. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod deck;
pub mod events;
pub mod item;
pub mod render;
pub mod rng;
pub mod session;

pub use config::*;
pub use deck::*;
pub use events::*;
pub use item::*;
pub use render::*;
pub use rng::*;
pub use session::*;
