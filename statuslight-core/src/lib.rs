//! # statuslight-core
//!
//! Staleness-aware status logic for a small vehicle's indicator outputs.
//!
//! Signals (battery status, arm state, cell voltage) arrive asynchronously
//! and are recorded into [`Channel`]s. A fixed-rate tick evaluates each
//! channel with a [`Watchdog`], maps its value to an LED pattern with an
//! [`IndicatorMapper`], folds freshness into one health flag with a
//! [`StatusAggregator`], and rate-limits the low voltage beep with an
//! [`AlertDebouncer`].
//!
//! ## Quick Start
//!
//! ```rust
//! use statuslight_core::{BuzzerConfig, BuzzerNode, ChannelTable, LedConfig, LedNode};
//! use statuslight_types::{Reading, Timestamp, Tone};
//!
//! let table = ChannelTable::new(Timestamp::ZERO);
//! let mut leds = LedNode::new(&table, LedConfig::default());
//! let mut buzzer = BuzzerNode::new(&table, BuzzerConfig::default(), Timestamp::ZERO);
//!
//! // Updates arrive from the transport...
//! let now = Timestamp::from_millis(200);
//! table.record(Reading::Battery(1), now);
//! table.record(Reading::Armed(false), now);
//! table.record(Reading::CellVoltage(3.2), now);
//!
//! // ...and the host ticks each node at its own rate.
//! let frame = leds.tick(now);
//! assert!(frame.healthy);
//! assert_eq!(buzzer.tick(now), Some(Tone::LowVoltage));
//! ```
//!
//! ## Properties
//!
//! - **Edge-triggered**: stale and recovered transitions are reported once each
//! - **Latched staleness**: only a new update clears a timed-out channel
//! - **Fail-safe health**: one stale channel makes the whole system unhealthy
//! - **Non-blocking**: nothing here sleeps, awaits or performs I/O

pub mod aggregate;
pub mod alert;
pub mod button;
pub mod buzzer;
pub mod channel;
pub mod clock;
pub mod driver;
pub mod error;
pub mod led;
pub mod mapper;
pub mod table;
pub mod watchdog;

pub use aggregate::{combine, StatusAggregator};
pub use alert::{is_low_voltage, AlertDebouncer};
pub use button::{ButtonAction, ButtonDebouncer, ButtonIndex};
pub use buzzer::{BuzzerConfig, BuzzerNode};
pub use channel::{Channel, SharedChannel};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use driver::{ArmingClient, BuzzerDriver, HealthIndicator, LedDriver, LedTarget};
pub use error::{DriverError, StatusError};
pub use led::{LedConfig, LedFrame, LedNode};
pub use mapper::{Classification, IndicatorMapper, Mapping, Notice};
pub use table::ChannelTable;
pub use watchdog::{evaluate, Transition, Verdict, Watchdog};

// Re-export types for convenience
pub use statuslight_types::{ChannelId, LedPattern, Reading, Timestamp, Tone, UpdateEvent};
