//! Hardware abstraction traits
//!
//! These traits define the interface between the core logic and the
//! chip drivers / board support.

pub mod input;
pub mod panel;
pub mod tick;
pub mod touch;

pub use input::{PointerEvent, PointerInput};
pub use panel::PanelWriter;
pub use tick::TickSource;
pub use touch::{TouchSample, TouchSensor};
