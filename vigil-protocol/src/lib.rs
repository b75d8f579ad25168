//! R24 mmWave Presence Radar Protocol
//!
//! This crate defines the UART-based protocol spoken by the R24 family of
//! 24 GHz millimeter-wave presence/motion radar modules. The radar streams
//! unsolicited reports and answers host queries over the same link.
//!
//! # Protocol Overview
//!
//! All messages use a checksummed binary frame with fixed header and tail
//! markers:
//! ```text
//! ┌────────┬──────┬──────┬────────┬─────────┬─────┬────────┐
//! │ HEADER │ CTRL │ CMD  │ LENGTH │ PAYLOAD │ CRC │ TAIL   │
//! │ 53 59  │ 1B   │ 1B   │ 2B BE  │ 0–32B   │ 1B  │ 54 43  │
//! └────────┴──────┴──────┴────────┴─────────┴─────┴────────┘
//! ```
//!
//! The control word selects a protocol category (system, product info,
//! work status, underlying parameters, human presence); the command word
//! selects the specific field or action within it. The CRC is the 8-bit
//! wrapping sum of every byte before it.
//!
//! The crate is sans-io: [`frame::FrameParser`] consumes one byte at a
//! time and recovers frames from an untrusted stream, [`dispatch::decode`]
//! turns validated frames into typed [`events::SensorEvent`]s, and
//! [`command::OutboundCommand`] builds the checksummed query/command
//! frames a host transmits.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod dispatch;
pub mod events;
pub mod frame;

pub use command::{OutboundCommand, COMMAND_FRAME_SIZE};
pub use dispatch::{decode, DecodeError};
pub use events::{
    KeepAwayState, MotionStatus, ProductInfo, SceneMode, SensorEvent, UnmannedDuration,
};
pub use frame::{checksum, FrameError, FrameParser, RawFrame, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
