//! Touch input path
//!
//! Raw samples from a [`TouchSensor`](crate::traits::TouchSensor) are
//! rescaled into display pixels by the [`CoordinateMapper`] and turned
//! into pointer events by the [`InputPoller`].

pub mod mapper;
pub mod poller;

pub use mapper::{map_range, CoordinateMapper};
pub use poller::{InputPoller, LastTouch};
