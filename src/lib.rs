//! # statuslight
//!
//! Host process for the vehicle status outputs: reads update events,
//! ticks the LED and buzzer logic from `statuslight-core` at fixed rates
//! and drives the outputs.
//!
//! ```text
//!   stdin / TCP ──▶ StreamSource ──▶ App::drain ──▶ ChannelTable
//!                                       │
//!            5 Hz  ──▶ App::tick_leds   ├──▶ LedDriver + HealthIndicator
//!           10 Hz  ──▶ App::tick_buzzer └──▶ BuzzerDriver
//!   button events  ──▶ ButtonDebouncer  ──▶ ArmingClient
//! ```
//!
//! - **[`config`]**: layered settings (defaults, TOML file, environment)
//! - **[`source`]**: the [`EventSource`] trait with JSON-lines and
//!   in-process channel implementations
//! - **[`drivers`]**: [`LogDrivers`], outputs reported through `tracing`
//! - **[`app`]**: the control loop
//!
//! ## Usage
//!
//! ```bash
//! # Events as JSON lines on stdin
//! echo '{"type":"battery","code":1}' | statuslight --config statuslight.toml
//!
//! # Events from a TCP endpoint
//! statuslight --config statuslight.toml --connect 127.0.0.1:9000
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use std::sync::Arc;
//! use statuslight::{App, ChannelSource, LogDrivers, Settings, TimedEvent};
//! use statuslight_core::ManualClock;
//! use statuslight_types::{Timestamp, UpdateEvent};
//!
//! let mut settings = Settings::default();
//! settings.buttons.gpios = vec![17, 27];
//! let config = settings.validate().unwrap();
//!
//! let (tx, source) = ChannelSource::create("bridge");
//! let mut app = App::new(&config, Box::new(source), LogDrivers::new(), Arc::new(ManualClock::new()));
//!
//! tx.try_send(TimedEvent::new(UpdateEvent::Battery { code: 1 }, Timestamp::ZERO)).unwrap();
//! app.drain();
//! assert!(app.tick_leds(Timestamp::from_millis(200)).healthy);
//! ```

pub mod app;
pub mod config;
pub mod drivers;
pub mod source;

pub use app::{App, StopReason};
pub use config::{AppConfig, Settings};
pub use drivers::{LogDrivers, Outputs};
pub use source::{ChannelSource, EventSource, StreamSource, TimedEvent};
