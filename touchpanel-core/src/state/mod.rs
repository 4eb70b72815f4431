//! Screen state machine
//!
//! Decides which screen is showing. Explicit, finite and deterministic:
//! the application context feeds it events and applies the result.

pub mod events;
pub mod machine;

pub use events::{ScreenEvent, ScreenKind};
pub use machine::ScreenState;
