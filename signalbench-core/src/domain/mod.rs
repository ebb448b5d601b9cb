//! Domain types for the signal engine.

pub mod position;
pub mod signal;
pub mod tick;

pub use position::Position;
pub use signal::Signal;
pub use tick::Tick;

/// Symbol type alias
pub type Symbol = String;
