//! The channel dispatch table.

use statuslight_types::{ChannelId, Reading, Timestamp};

use crate::channel::SharedChannel;

/// One shared channel per [`ChannelId`], all created at startup.
///
/// Every reading is routed to its channel by identity, so there is a
/// single update path no matter which signal arrived.
#[derive(Debug, Clone)]
pub struct ChannelTable {
    battery: SharedChannel<Reading>,
    arm: SharedChannel<Reading>,
    cell_voltage: SharedChannel<Reading>,
}

impl ChannelTable {
    /// Create every channel empty, with `created_at` as its last update time.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            battery: SharedChannel::new(created_at),
            arm: SharedChannel::new(created_at),
            cell_voltage: SharedChannel::new(created_at),
        }
    }

    /// The channel for `id`.
    pub fn channel(&self, id: ChannelId) -> &SharedChannel<Reading> {
        match id {
            ChannelId::Battery => &self.battery,
            ChannelId::Arm => &self.arm,
            ChannelId::CellVoltage => &self.cell_voltage,
        }
    }

    /// Record `reading` on its channel.
    pub fn record(&self, reading: Reading, now: Timestamp) {
        self.channel(reading.channel()).record_update(reading, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_land_on_their_own_channel() {
        let table = ChannelTable::new(Timestamp::ZERO);
        table.record(Reading::Armed(true), Timestamp::from_secs(1));
        table.record(Reading::CellVoltage(3.8), Timestamp::from_secs(2));

        let arm = table.channel(ChannelId::Arm).snapshot();
        assert_eq!(arm.value(), Some(&Reading::Armed(true)));
        assert_eq!(arm.last_update_time(), Timestamp::from_secs(1));

        let cell = table.channel(ChannelId::CellVoltage).snapshot();
        assert_eq!(cell.value(), Some(&Reading::CellVoltage(3.8)));

        let battery = table.channel(ChannelId::Battery).snapshot();
        assert_eq!(battery.value(), None);
        assert!(!battery.has_pending_update());
    }

    #[test]
    fn test_clones_share_channels() {
        let table = ChannelTable::new(Timestamp::ZERO);
        let producer = table.clone();
        producer.record(Reading::Battery(1), Timestamp::from_secs(3));

        assert!(table.channel(ChannelId::Battery).snapshot().has_pending_update());
    }
}
