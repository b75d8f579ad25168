//! Outbound query scheduling
//!
//! The module answers questions, it does not volunteer identity. On
//! power-up the host works through the startup queries until each is
//! answered, then settles into a steady cycle of status queries and
//! heartbeats.

use vigil_protocol::OutboundCommand;

use crate::radar::Radar;

/// Full polling cycle: startup identity queries first, then the
/// steady status/heartbeat tail. Order mirrors the module's own
/// power-up sequence.
const QUERY_CYCLE: [OutboundCommand; 8] = [
    OutboundCommand::QueryOutputSwitch,
    OutboundCommand::QueryProductModel,
    OutboundCommand::QueryProductId,
    OutboundCommand::QueryFirmwareVersion,
    OutboundCommand::QueryHardwareModel,
    OutboundCommand::QueryHumanStatus,
    OutboundCommand::QueryKeepAway,
    OutboundCommand::Heartbeat,
];

/// Decides which query frame to transmit on each poll tick.
///
/// Startup queries whose answers are already cached in the [`Radar`]
/// session are skipped; unanswered ones are retried on the next pass
/// around the cycle. Status queries and heartbeats never age out, so
/// every tick yields a command.
pub struct QueryPlan {
    cursor: usize,
}

impl QueryPlan {
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Next command to transmit, given what the session already knows
    pub fn next(&mut self, radar: &Radar) -> OutboundCommand {
        for _ in 0..QUERY_CYCLE.len() {
            let command = QUERY_CYCLE[self.cursor];
            self.cursor = (self.cursor + 1) % QUERY_CYCLE.len();
            if !answered(radar, command) {
                return command;
            }
        }
        // Heartbeat is never marked answered, so the scan cannot
        // exhaust; keep the return total anyway
        OutboundCommand::Heartbeat
    }
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the session has already cached the answer to a query.
/// Status queries and heartbeats are always worth re-asking.
fn answered(radar: &Radar, command: OutboundCommand) -> bool {
    match command {
        OutboundCommand::QueryOutputSwitch => radar.output_switch().is_some(),
        OutboundCommand::QueryProductModel => radar.product_model().is_some(),
        OutboundCommand::QueryProductId => radar.product_id().is_some(),
        OutboundCommand::QueryFirmwareVersion => radar.firmware_version().is_some(),
        OutboundCommand::QueryHardwareModel => radar.hardware_model().is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_protocol::{checksum, OutboundCommand};

    fn feed_frame(radar: &mut Radar, control: u8, command: u8, payload: &[u8]) {
        let mut bytes: heapless::Vec<u8, 41> = heapless::Vec::new();
        bytes.extend_from_slice(&[0x53, 0x59, control, command]).unwrap();
        bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes()).unwrap();
        bytes.extend_from_slice(payload).unwrap();
        bytes.extend_from_slice(&[0x00, 0x54, 0x43]).unwrap();
        let crc_index = bytes.len() - 3;
        bytes[crc_index] = checksum(&bytes);
        for &byte in &bytes {
            radar.push_byte(byte).unwrap();
        }
    }

    #[test]
    fn test_startup_order() {
        let radar = Radar::new();
        let mut plan = QueryPlan::new();

        assert_eq!(plan.next(&radar), OutboundCommand::QueryOutputSwitch);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryProductModel);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryProductId);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryFirmwareVersion);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryHardwareModel);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryHumanStatus);
        assert_eq!(plan.next(&radar), OutboundCommand::QueryKeepAway);
        assert_eq!(plan.next(&radar), OutboundCommand::Heartbeat);
    }

    #[test]
    fn test_answered_queries_are_skipped() {
        let mut radar = Radar::new();
        let mut plan = QueryPlan::new();

        feed_frame(&mut radar, 0x08, 0x80, &[0x01]);
        feed_frame(&mut radar, 0x02, 0xA1, b"R24BBD1");

        assert_eq!(plan.next(&radar), OutboundCommand::QueryProductId);
    }

    #[test]
    fn test_unanswered_queries_retry_next_pass() {
        let mut radar = Radar::new();
        let mut plan = QueryPlan::new();

        feed_frame(&mut radar, 0x08, 0x80, &[0x00]);
        feed_frame(&mut radar, 0x02, 0xA1, b"R24BBD1");
        feed_frame(&mut radar, 0x02, 0xA2, b"23090001");
        feed_frame(&mut radar, 0x02, 0xA3, b"HW1.0");

        // Firmware never answered; it comes up once per pass
        let mut per_pass = [0usize; 2];
        for pass in &mut per_pass {
            for _ in 0..4 {
                if plan.next(&radar) == OutboundCommand::QueryFirmwareVersion {
                    *pass += 1;
                }
            }
        }
        assert_eq!(per_pass, [1, 1]);
    }

    #[test]
    fn test_steady_cycle_once_identified() {
        let mut radar = Radar::new();
        let mut plan = QueryPlan::new();

        feed_frame(&mut radar, 0x08, 0x80, &[0x01]);
        feed_frame(&mut radar, 0x02, 0xA1, b"R24BBD1");
        feed_frame(&mut radar, 0x02, 0xA2, b"23090001");
        feed_frame(&mut radar, 0x02, 0xA4, b"G60SM1SYv010008");
        feed_frame(&mut radar, 0x02, 0xA3, b"HW1.0");

        for _ in 0..3 {
            assert_eq!(plan.next(&radar), OutboundCommand::QueryHumanStatus);
            assert_eq!(plan.next(&radar), OutboundCommand::QueryKeepAway);
            assert_eq!(plan.next(&radar), OutboundCommand::Heartbeat);
        }
    }

    #[test]
    fn test_every_planned_command_encodes() {
        let radar = Radar::new();
        let mut plan = QueryPlan::new();
        for _ in 0..QUERY_CYCLE.len() {
            assert!(plan.next(&radar).encode().is_some());
        }
    }
}
