//! Board-agnostic core logic for the touch panel firmware
//!
//! This crate contains everything between the chip drivers and the
//! board bring-up:
//!
//! - Build-time configuration types (display geometry, touch calibration)
//! - Coordinate mapping and touch polling
//! - Tick source contract and the monotonic engine clock
//! - Partial-framebuffer flushing to the panel
//! - The retained-mode engine integration (screens, widgets, event
//!   dispatch, timers, band renderer)
//! - The Logo/Info screen state machine and the application context
//!
//! # Data flow
//!
//! ```text
//! Main loop ──▶ Engine::timer_handler
//!                  ├─▶ TickSource::now_ms
//!                  ├─▶ InputPoller::poll ──▶ pointer events ──▶ handlers ──▶ App (state machine)
//!                  └─▶ renderer ──▶ FlushDriver::flush ──▶ panel ──▶ FlushReady
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod display;
pub mod engine;
pub mod geometry;
pub mod state;
pub mod touch;
pub mod traits;

pub use app::App;
pub use config::PanelConfig;
