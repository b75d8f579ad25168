//! Payload dispatch: validated frames to typed sensor events.
//!
//! The top level keys on the control word; four sub-dispatchers cover
//! the product-information, work-status, underlying-parameter and
//! human-presence categories. Dispatch is total: every frame yields an
//! event, a recognized silence (`Ok(None)`), or a decode error - never
//! a panic and never a partial event.

use crate::events::{
    KeepAwayState, MotionStatus, ProductInfo, SceneMode, SensorEvent, UnmannedDuration,
    PRODUCT_INFO_MAX_LEN,
};
use crate::frame::RawFrame;

/// Control word values
pub mod ctrl {
    /// Heartbeat and reset acknowledgements
    pub const SYSTEM: u8 = 0x01;
    /// Product model / id / hardware / firmware strings
    pub const PRODUCT_INFO: u8 = 0x02;
    /// Initialization, scene mode, sensitivity
    pub const WORK_STATUS: u8 = 0x05;
    /// Underlying open-parameter measurements and settings
    pub const UNDERLYING: u8 = 0x08;
    /// Presence, motion and proximity reports
    pub const HUMAN_PRESENCE: u8 = 0x80;
}

/// Errors raised while decoding a validated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame payload is shorter than the command requires
    ShortPayload { control: u8, command: u8 },
    /// A decoded byte falls outside its closed enumeration
    ValueOutOfRange { control: u8, command: u8, value: u8 },
    /// Product-information text too long or not valid UTF-8
    BadProductInfo { command: u8 },
}

/// Decode a checksum-validated frame into at most one sensor event.
///
/// `Ok(None)` marks command words that are acknowledged but carry no
/// host-visible fact (reset ack, init status). Unknown words come back
/// as [`SensorEvent::Unrecognized`] so hosts can observe protocol drift.
pub fn decode(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    match frame.control_word() {
        ctrl::SYSTEM => decode_system(frame),
        ctrl::PRODUCT_INFO => decode_product_info(frame),
        ctrl::WORK_STATUS => decode_work_status(frame),
        ctrl::UNDERLYING => decode_underlying(frame),
        ctrl::HUMAN_PRESENCE => decode_presence(frame),
        control => Ok(Some(SensorEvent::Unrecognized {
            control,
            command: frame.command_word(),
        })),
    }
}

fn decode_system(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    match frame.command_word() {
        0x01 => Ok(Some(SensorEvent::Heartbeat)),
        // Reset acknowledged; the module reboots on its own schedule
        0x02 => Ok(None),
        command => Ok(Some(SensorEvent::Unrecognized {
            control: ctrl::SYSTEM,
            command,
        })),
    }
}

fn decode_product_info(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    let command = frame.command_word();
    let build: fn(ProductInfo) -> SensorEvent = match command {
        0xA1 => SensorEvent::ProductModel,
        0xA2 => SensorEvent::ProductId,
        0xA3 => SensorEvent::HardwareModel,
        0xA4 => SensorEvent::FirmwareVersion,
        command => {
            return Ok(Some(SensorEvent::Unrecognized {
                control: ctrl::PRODUCT_INFO,
                command,
            }))
        }
    };

    let payload = frame.payload();
    if payload.len() >= PRODUCT_INFO_MAX_LEN {
        return Err(DecodeError::BadProductInfo { command });
    }
    let text = core::str::from_utf8(payload).map_err(|_| DecodeError::BadProductInfo { command })?;

    // Length checked above, push cannot fail
    let mut info = ProductInfo::new();
    let _ = info.push_str(text);
    Ok(Some(build(info)))
}

fn decode_work_status(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    match frame.command_word() {
        // Radar initialization status, diagnostic only
        0x01 | 0x81 => Ok(None),
        0x07 | 0x87 => {
            let byte = payload_byte(frame, 0)?;
            match SceneMode::from_code(byte) {
                // The module reports codes 1..=4; 0 is the reserved
                // set-side no-op and never a valid report
                Some(mode) if mode != SceneMode::None => Ok(Some(SensorEvent::SceneMode(mode))),
                _ => Err(out_of_range(frame, byte)),
            }
        }
        0x08 | 0x88 => Ok(Some(SensorEvent::Sensitivity(payload_byte(frame, 0)?))),
        0x09 | 0x89 => Ok(Some(SensorEvent::CustomModeSetting(payload_byte(frame, 0)?))),
        command => Ok(Some(SensorEvent::Unrecognized {
            control: ctrl::WORK_STATUS,
            command,
        })),
    }
}

fn decode_underlying(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    match frame.command_word() {
        0x00 | 0x80 => Ok(Some(SensorEvent::OutputSwitch(payload_byte(frame, 0)? != 0))),
        0x01 => {
            // Packed report: all five measurements in one payload
            let payload = frame.payload();
            if payload.len() < 5 {
                return Err(short_payload(frame));
            }
            Ok(Some(SensorEvent::UnderlyingParameters {
                spatial_static: payload[0],
                detection_distance: payload[1] as f32 * 0.5,
                spatial_motion: payload[2],
                motion_distance: payload[3] as f32 * 0.5,
                motion_speed: (payload[4] as f32 - 10.0) * 0.5,
            }))
        }
        0x81 => Ok(Some(SensorEvent::SpatialStaticValue(payload_byte(frame, 0)?))),
        0x82 => Ok(Some(SensorEvent::SpatialMotionValue(payload_byte(frame, 0)?))),
        0x83 => Ok(Some(SensorEvent::PresenceDetectionDistance(
            payload_byte(frame, 0)? as f32 * 0.5,
        ))),
        0x84 => Ok(Some(SensorEvent::MotionDistance(
            payload_byte(frame, 0)? as f32 * 0.5,
        ))),
        0x85 => Ok(Some(SensorEvent::MotionSpeed(
            (payload_byte(frame, 0)? as f32 - 10.0) * 0.5,
        ))),
        0x06 | 0x86 => {
            let byte = payload_byte(frame, 0)?;
            match KeepAwayState::from_byte(byte) {
                Some(state) => Ok(Some(SensorEvent::KeepAway(state))),
                None => Err(out_of_range(frame, byte)),
            }
        }
        0x07 | 0x87 => Ok(Some(SensorEvent::MovementSigns(payload_byte(frame, 0)?))),
        0x08 | 0x88 => Ok(Some(SensorEvent::ExistenceThreshold(payload_byte(frame, 0)?))),
        0x09 | 0x89 => Ok(Some(SensorEvent::MotionTriggerThreshold(payload_byte(frame, 0)?))),
        0x0A | 0x8A => Ok(Some(SensorEvent::PresenceBoundary(payload_byte(frame, 0)?))),
        0x0B | 0x8B => Ok(Some(SensorEvent::MotionBoundary(payload_byte(frame, 0)?))),
        0x0C | 0x8C => Ok(Some(SensorEvent::MotionTriggerTime(payload_u32(frame)?))),
        0x0D | 0x8D => Ok(Some(SensorEvent::MotionToRestTime(payload_u32(frame)?))),
        0x0E | 0x8E => Ok(Some(SensorEvent::EnterUnmannedTime(payload_u32(frame)?))),
        command => Ok(Some(SensorEvent::Unrecognized {
            control: ctrl::UNDERLYING,
            command,
        })),
    }
}

fn decode_presence(frame: &RawFrame) -> Result<Option<SensorEvent>, DecodeError> {
    match frame.command_word() {
        0x01 | 0x81 => {
            let byte = payload_byte(frame, 0)?;
            match byte {
                0x00 => Ok(Some(SensorEvent::HumanPresence(false))),
                0x01 => Ok(Some(SensorEvent::HumanPresence(true))),
                _ => Err(out_of_range(frame, byte)),
            }
        }
        0x02 | 0x82 => {
            let byte = payload_byte(frame, 0)?;
            match MotionStatus::from_byte(byte) {
                Some(status) => Ok(Some(SensorEvent::MotionStatus(status))),
                None => Err(out_of_range(frame, byte)),
            }
        }
        0x03 | 0x83 => Ok(Some(SensorEvent::MovementSigns(payload_byte(frame, 0)?))),
        0x0A | 0x8A => {
            let byte = payload_byte(frame, 0)?;
            match UnmannedDuration::from_byte(byte) {
                Some(duration) => Ok(Some(SensorEvent::UnmannedDuration(duration))),
                None => Err(out_of_range(frame, byte)),
            }
        }
        0x0B | 0x8B => {
            let byte = payload_byte(frame, 0)?;
            match KeepAwayState::from_byte(byte) {
                Some(state) => Ok(Some(SensorEvent::KeepAway(state))),
                None => Err(out_of_range(frame, byte)),
            }
        }
        command => Ok(Some(SensorEvent::Unrecognized {
            control: ctrl::HUMAN_PRESENCE,
            command,
        })),
    }
}

/// Fetch one payload byte, or fail with the frame's words attached
fn payload_byte(frame: &RawFrame, index: usize) -> Result<u8, DecodeError> {
    frame
        .payload()
        .get(index)
        .copied()
        .ok_or_else(|| short_payload(frame))
}

/// Fetch a big-endian u32 from the start of the payload
fn payload_u32(frame: &RawFrame) -> Result<u32, DecodeError> {
    let payload = frame.payload();
    match payload.first_chunk::<4>() {
        Some(bytes) => Ok(u32::from_be_bytes(*bytes)),
        None => Err(short_payload(frame)),
    }
}

fn short_payload(frame: &RawFrame) -> DecodeError {
    DecodeError::ShortPayload {
        control: frame.control_word(),
        command: frame.command_word(),
    }
}

fn out_of_range(frame: &RawFrame, value: u8) -> DecodeError {
    DecodeError::ValueOutOfRange {
        control: frame.control_word(),
        command: frame.command_word(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(control: u8, command: u8, payload: &[u8]) -> Result<Option<SensorEvent>, DecodeError> {
        let frame = RawFrame::new(control, command, payload).unwrap();
        decode(&frame)
    }

    #[test]
    fn test_heartbeat() {
        assert_eq!(decode_one(0x01, 0x01, &[0x0F]), Ok(Some(SensorEvent::Heartbeat)));
    }

    #[test]
    fn test_reset_ack_is_silent() {
        assert_eq!(decode_one(0x01, 0x02, &[0x0F]), Ok(None));
    }

    #[test]
    fn test_product_model_text() {
        let event = decode_one(0x02, 0xA1, b"ABC").unwrap().unwrap();
        match event {
            SensorEvent::ProductModel(text) => assert_eq!(text.as_str(), "ABC"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_firmware_version_text() {
        let event = decode_one(0x02, 0xA4, b"G60SM1SYv010008").unwrap().unwrap();
        match event {
            SensorEvent::FirmwareVersion(text) => assert_eq!(text.as_str(), "G60SM1SYv010008"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_product_info_rejects_non_utf8() {
        assert_eq!(
            decode_one(0x02, 0xA2, &[0xFF, 0xFE]),
            Err(DecodeError::BadProductInfo { command: 0xA2 })
        );
    }

    #[test]
    fn test_output_switch() {
        assert_eq!(
            decode_one(0x08, 0x00, &[0x01]),
            Ok(Some(SensorEvent::OutputSwitch(true)))
        );
        assert_eq!(
            decode_one(0x08, 0x80, &[0x00]),
            Ok(Some(SensorEvent::OutputSwitch(false)))
        );
    }

    #[test]
    fn test_packed_underlying_parameters() {
        let event = decode_one(0x08, 0x01, &[3, 4, 7, 6, 14]).unwrap().unwrap();
        match event {
            SensorEvent::UnderlyingParameters {
                spatial_static,
                detection_distance,
                spatial_motion,
                motion_distance,
                motion_speed,
            } => {
                assert_eq!(spatial_static, 3);
                assert_eq!(detection_distance, 2.0);
                assert_eq!(spatial_motion, 7);
                assert_eq!(motion_distance, 3.0);
                assert_eq!(motion_speed, 2.0);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_packed_underlying_requires_five_bytes() {
        assert_eq!(
            decode_one(0x08, 0x01, &[3, 4, 7]),
            Err(DecodeError::ShortPayload { control: 0x08, command: 0x01 })
        );
    }

    #[test]
    fn test_individual_underlying_fields() {
        assert_eq!(
            decode_one(0x08, 0x84, &[5]),
            Ok(Some(SensorEvent::MotionDistance(2.5)))
        );
        // Speed is centered on 10: below it reads negative (receding)
        assert_eq!(
            decode_one(0x08, 0x85, &[8]),
            Ok(Some(SensorEvent::MotionSpeed(-1.0)))
        );
    }

    #[test]
    fn test_keep_away_out_of_range_produces_no_event() {
        assert_eq!(
            decode_one(0x08, 0x86, &[0x03]),
            Err(DecodeError::ValueOutOfRange { control: 0x08, command: 0x86, value: 3 })
        );
        assert_eq!(
            decode_one(0x80, 0x0B, &[0x03]),
            Err(DecodeError::ValueOutOfRange { control: 0x80, command: 0x0B, value: 3 })
        );
    }

    #[test]
    fn test_keep_away_in_range() {
        assert_eq!(
            decode_one(0x80, 0x8B, &[0x01]),
            Ok(Some(SensorEvent::KeepAway(KeepAwayState::CloseTo)))
        );
    }

    #[test]
    fn test_human_presence_bounds() {
        assert_eq!(
            decode_one(0x80, 0x01, &[0x01]),
            Ok(Some(SensorEvent::HumanPresence(true)))
        );
        assert_eq!(
            decode_one(0x80, 0x81, &[0x02]),
            Err(DecodeError::ValueOutOfRange { control: 0x80, command: 0x81, value: 2 })
        );
    }

    #[test]
    fn test_motion_status() {
        assert_eq!(
            decode_one(0x80, 0x82, &[0x02]),
            Ok(Some(SensorEvent::MotionStatus(MotionStatus::Active)))
        );
    }

    #[test]
    fn test_scene_mode_report() {
        assert_eq!(
            decode_one(0x05, 0x87, &[0x02]),
            Ok(Some(SensorEvent::SceneMode(SceneMode::Bedroom)))
        );
        // Code 0 is the set-side no-op, never a valid report
        assert_eq!(
            decode_one(0x05, 0x87, &[0x00]),
            Err(DecodeError::ValueOutOfRange { control: 0x05, command: 0x87, value: 0 })
        );
        assert_eq!(
            decode_one(0x05, 0x07, &[0x05]),
            Err(DecodeError::ValueOutOfRange { control: 0x05, command: 0x07, value: 5 })
        );
    }

    #[test]
    fn test_init_status_is_silent() {
        assert_eq!(decode_one(0x05, 0x01, &[0x01]), Ok(None));
        assert_eq!(decode_one(0x05, 0x81, &[0x02]), Ok(None));
    }

    #[test]
    fn test_timing_fields_big_endian() {
        assert_eq!(
            decode_one(0x08, 0x8C, &[0x00, 0x00, 0x01, 0x90]),
            Ok(Some(SensorEvent::MotionTriggerTime(400)))
        );
        assert_eq!(
            decode_one(0x08, 0x0E, &[0x00, 0x01, 0x00, 0x00]),
            Ok(Some(SensorEvent::EnterUnmannedTime(65536)))
        );
        assert_eq!(
            decode_one(0x08, 0x0D, &[0x01]),
            Err(DecodeError::ShortPayload { control: 0x08, command: 0x0D })
        );
    }

    #[test]
    fn test_unmanned_duration() {
        assert_eq!(
            decode_one(0x80, 0x8A, &[0x05]),
            Ok(Some(SensorEvent::UnmannedDuration(UnmannedDuration::Minutes5)))
        );
        assert_eq!(
            decode_one(0x80, 0x0A, &[0x09]),
            Err(DecodeError::ValueOutOfRange { control: 0x80, command: 0x0A, value: 9 })
        );
    }

    #[test]
    fn test_unknown_command_word_is_unrecognized() {
        assert_eq!(
            decode_one(0x80, 0x42, &[]),
            Ok(Some(SensorEvent::Unrecognized { control: 0x80, command: 0x42 }))
        );
    }

    #[test]
    fn test_unknown_control_word_is_unrecognized() {
        assert_eq!(
            decode_one(0x42, 0x01, &[]),
            Ok(Some(SensorEvent::Unrecognized { control: 0x42, command: 0x01 }))
        );
    }

    #[test]
    fn test_missing_payload_byte() {
        assert_eq!(
            decode_one(0x80, 0x01, &[]),
            Err(DecodeError::ShortPayload { control: 0x80, command: 0x01 })
        );
    }
}
