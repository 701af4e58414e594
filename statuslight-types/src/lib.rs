//! # statuslight-types
//!
//! Plain data types shared by the statuslight crates: monotonic timestamps,
//! channel identities, update events and output patterns.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the types work without any serialization framework
//! - **Optional serialization**: enable the `serde` feature for JSON transport
//! - **No hardware knowledge**: patterns describe what to show, not how to drive a pin
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use statuslight_types::{BatteryStatus, ChannelId, Reading, UpdateEvent};
//!
//! let event = UpdateEvent::Battery { code: BatteryStatus::Low.code() };
//! let reading = event.reading().unwrap();
//!
//! assert_eq!(reading.channel(), ChannelId::Battery);
//! assert_eq!(reading, Reading::Battery(2));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod battery;
mod event;
mod pattern;
mod time;

pub use battery::*;
pub use event::*;
pub use pattern::*;
pub use time::*;
