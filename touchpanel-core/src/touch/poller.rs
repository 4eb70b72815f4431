//! Touch polling
//!
//! Invoked by the engine once per input-read period. Never blocks and
//! never fails: any missing or erroneous sample reads as "released".

use crate::geometry::Position;
use crate::traits::{PointerEvent, PointerInput, TouchSensor};

use super::mapper::CoordinateMapper;

/// Last accepted touch (diagnostics only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LastTouch {
    /// Mapped display position (unclamped)
    pub position: Position,
    /// Raw pressure
    pub z: u16,
}

/// Turns touch sensor readings into pointer events
pub struct InputPoller<S> {
    sensor: S,
    mapper: CoordinateMapper,
    last: Option<LastTouch>,
    bus_errors: u32,
}

impl<S: TouchSensor> InputPoller<S> {
    pub fn new(sensor: S, mapper: CoordinateMapper) -> Self {
        Self {
            sensor,
            mapper,
            last: None,
            bus_errors: 0,
        }
    }

    /// Read one pointer event
    ///
    /// Pressed only when the interrupt line is asserted, the controller
    /// reports a touch, and a sample was read successfully with its
    /// `touched` flag still set.
    pub fn poll(&mut self) -> PointerEvent {
        if !self.sensor.irq_asserted() {
            return PointerEvent::Released;
        }

        match self.sensor.touched() {
            Ok(true) => {}
            Ok(false) => return PointerEvent::Released,
            Err(_) => {
                self.record_bus_error();
                return PointerEvent::Released;
            }
        }

        match self.sensor.sample() {
            // Pressure dropped between the two reads
            Ok(sample) if !sample.touched => PointerEvent::Released,
            Ok(sample) => {
                let position = self.mapper.map(&sample);
                self.last = Some(LastTouch {
                    position,
                    z: sample.z,
                });
                PointerEvent::Pressed(position)
            }
            Err(_) => {
                self.record_bus_error();
                PointerEvent::Released
            }
        }
    }

    fn record_bus_error(&mut self) {
        self.bus_errors = self.bus_errors.saturating_add(1);
        #[cfg(feature = "defmt")]
        defmt::trace!("Touch read failed, reporting released");
    }

    /// Last successfully mapped touch
    pub fn last_touch(&self) -> Option<LastTouch> {
        self.last
    }

    /// Number of polls that degraded to released because of a bus error
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

impl<S: TouchSensor> PointerInput for InputPoller<S> {
    fn poll(&mut self) -> PointerEvent {
        InputPoller::poll(self)
    }
}
