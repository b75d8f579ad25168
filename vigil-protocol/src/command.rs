//! Outbound query and configuration frames.
//!
//! Every host-to-module message is a single-data-byte frame of fixed
//! size; queries carry the placeholder data byte `0x0F`, setters carry
//! the value being written. The checksum is stamped at build time so
//! callers hand the returned bytes straight to the UART.

use crate::events::SceneMode;
use crate::frame::{checksum, FRAME_HEADER1, FRAME_HEADER2, FRAME_TAIL1, FRAME_TAIL2};

/// Wire size of every outbound frame (one data byte)
pub const COMMAND_FRAME_SIZE: usize = 10;

/// Placeholder data byte carried by query frames
const QUERY_DATA: u8 = 0x0F;

/// One host-to-module query or configuration write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboundCommand {
    /// Liveness probe; the module answers with a heartbeat report
    Heartbeat,
    /// Ask for the underlying open-parameter reporting toggle state
    QueryOutputSwitch,
    /// Ask for the product model string
    QueryProductModel,
    /// Ask for the product id string
    QueryProductId,
    /// Ask for the hardware model string
    QueryHardwareModel,
    /// Ask for the firmware version string
    QueryFirmwareVersion,
    /// Ask for the current occupancy flag
    QueryHumanStatus,
    /// Ask for the current proximity trend
    QueryKeepAway,
    /// Enable or disable underlying open-parameter reporting
    SetOutputSwitch(bool),
    /// Select an operating scene profile
    SetSceneMode(SceneMode),
}

impl OutboundCommand {
    /// Build the wire frame for this command.
    ///
    /// Returns `None` only for [`OutboundCommand::SetSceneMode`] with
    /// [`SceneMode::None`]: code 0 is reserved and must never reach the
    /// module.
    pub fn encode(self) -> Option<[u8; COMMAND_FRAME_SIZE]> {
        let (control, command, data) = match self {
            OutboundCommand::Heartbeat => (0x01, 0x01, QUERY_DATA),
            OutboundCommand::QueryOutputSwitch => (0x08, 0x80, QUERY_DATA),
            OutboundCommand::QueryProductModel => (0x02, 0xA1, QUERY_DATA),
            OutboundCommand::QueryProductId => (0x02, 0xA2, QUERY_DATA),
            OutboundCommand::QueryHardwareModel => (0x02, 0xA3, QUERY_DATA),
            OutboundCommand::QueryFirmwareVersion => (0x02, 0xA4, QUERY_DATA),
            OutboundCommand::QueryHumanStatus => (0x80, 0x81, QUERY_DATA),
            OutboundCommand::QueryKeepAway => (0x80, 0x8B, QUERY_DATA),
            OutboundCommand::SetOutputSwitch(enable) => (0x08, 0x00, enable as u8),
            OutboundCommand::SetSceneMode(SceneMode::None) => return None,
            OutboundCommand::SetSceneMode(mode) => (0x05, 0x07, mode.to_code()),
        };
        Some(build_frame(control, command, data))
    }
}

/// Build the scene-mode write for a vendor UI display name.
///
/// `None` for unknown names and for the reserved "None" scene.
pub fn set_scene_mode(name: &str) -> Option<[u8; COMMAND_FRAME_SIZE]> {
    let mode = SceneMode::from_name(name)?;
    OutboundCommand::SetSceneMode(mode).encode()
}

fn build_frame(control: u8, command: u8, data: u8) -> [u8; COMMAND_FRAME_SIZE] {
    let mut frame = [
        FRAME_HEADER1,
        FRAME_HEADER2,
        control,
        command,
        0x00,
        0x01,
        data,
        0x00,
        FRAME_TAIL1,
        FRAME_TAIL2,
    ];
    frame[7] = checksum(&frame);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::decode;
    use crate::events::SensorEvent;
    use crate::frame::FrameParser;

    #[test]
    fn test_heartbeat_bytes() {
        assert_eq!(
            OutboundCommand::Heartbeat.encode(),
            Some([0x53, 0x59, 0x01, 0x01, 0x00, 0x01, 0x0F, 0xBE, 0x54, 0x43])
        );
    }

    #[test]
    fn test_output_switch_bytes() {
        assert_eq!(
            OutboundCommand::SetOutputSwitch(true).encode(),
            Some([0x53, 0x59, 0x08, 0x00, 0x00, 0x01, 0x01, 0xB6, 0x54, 0x43])
        );
        assert_eq!(
            OutboundCommand::SetOutputSwitch(false).encode(),
            Some([0x53, 0x59, 0x08, 0x00, 0x00, 0x01, 0x00, 0xB5, 0x54, 0x43])
        );
    }

    #[test]
    fn test_every_encoded_frame_parses_back() {
        let commands = [
            OutboundCommand::Heartbeat,
            OutboundCommand::QueryOutputSwitch,
            OutboundCommand::QueryProductModel,
            OutboundCommand::QueryProductId,
            OutboundCommand::QueryHardwareModel,
            OutboundCommand::QueryFirmwareVersion,
            OutboundCommand::QueryHumanStatus,
            OutboundCommand::QueryKeepAway,
            OutboundCommand::SetOutputSwitch(true),
            OutboundCommand::SetSceneMode(SceneMode::Bedroom),
        ];
        for command in commands {
            let bytes = command.encode().unwrap();
            let mut parser = FrameParser::new();
            let frame = parser.feed_bytes(&bytes).unwrap().unwrap();
            assert!(frame.verify_checksum().is_ok());
            assert_eq!(frame.payload().len(), 1);
        }
    }

    #[test]
    fn test_reserved_scene_is_suppressed() {
        assert_eq!(OutboundCommand::SetSceneMode(SceneMode::None).encode(), None);
        assert_eq!(set_scene_mode("None"), None);
    }

    #[test]
    fn test_scene_mode_by_name() {
        let bytes = set_scene_mode("Washroom").unwrap();
        assert_eq!(&bytes[2..4], &[0x05, 0x07]);
        assert_eq!(bytes[6], 0x03);
        assert_eq!(set_scene_mode("Garage"), None);
    }

    #[test]
    fn test_output_switch_query_decodes_as_report_shape() {
        // The query and its report share a command word; an echoed query
        // must still decode without error
        let bytes = OutboundCommand::QueryOutputSwitch.encode().unwrap();
        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&bytes).unwrap().unwrap();
        assert_eq!(decode(&frame), Ok(Some(SensorEvent::OutputSwitch(true))));
    }
}
