//! Frame assembly and validation for the R24 radar protocol.
//!
//! Frame format:
//! - HEADER (2 bytes): 0x53 0x59 synchronization markers
//! - CTRL (1 byte): control word, first-level category selector
//! - CMD (1 byte): command word, field/action within the category
//! - LENGTH (2 bytes): payload length, big-endian (0-32)
//! - PAYLOAD (0-32 bytes): command-specific data
//! - CRC (1 byte): wrapping 8-bit sum of every preceding byte
//! - TAIL (2 bytes): 0x54 0x43 end markers

use heapless::Vec;

/// First frame header byte ('S')
pub const FRAME_HEADER1: u8 = 0x53;
/// Second frame header byte ('Y')
pub const FRAME_HEADER2: u8 = 0x59;
/// First frame tail byte ('T')
pub const FRAME_TAIL1: u8 = 0x54;
/// Second frame tail byte ('C')
pub const FRAME_TAIL2: u8 = 0x43;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Maximum value of the high length byte
pub const MAX_LEN_HIGH: u8 = 4;

/// Maximum complete frame size (HEADER + CTRL + CMD + LENGTH + MAX_PAYLOAD + CRC + TAIL)
pub const MAX_FRAME_SIZE: usize = 6 + MAX_PAYLOAD_SIZE + 3;

/// Errors that can occur while assembling or validating frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Unexpected byte at a header or tail boundary
    Desync,
    /// Declared payload length exceeds the 32-byte bound
    LengthOutOfRange,
    /// Stored checksum does not match the computed sum
    ChecksumMismatch,
}

/// Compute the 8-bit additive checksum over a complete frame image.
///
/// Sums every byte except the trailing CRC/tail triple, truncated to
/// 8 bits. The same sum validates inbound frames and stamps outbound
/// ones (the CRC slot may hold any placeholder while summing). Total
/// over any slice; short slices sum to zero.
pub fn checksum(frame: &[u8]) -> u8 {
    let end = frame.len().saturating_sub(3);
    frame[..end].iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// A complete wire frame, header through tail.
///
/// Produced transiently by [`FrameParser`]; consumed by checksum
/// validation and dispatch, never retained across decode cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl RawFrame {
    /// Build a frame image for the given words and payload, CRC included.
    pub fn new(control: u8, command: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::LengthOutOfRange);
        }

        // Capacity covers the largest legal frame, pushes cannot fail
        let mut bytes = Vec::new();
        let _ = bytes.push(FRAME_HEADER1);
        let _ = bytes.push(FRAME_HEADER2);
        let _ = bytes.push(control);
        let _ = bytes.push(command);
        let _ = bytes.push((payload.len() >> 8) as u8);
        let _ = bytes.push(payload.len() as u8);
        let _ = bytes.extend_from_slice(payload);
        let _ = bytes.push(0x00); // CRC slot, stamped below
        let _ = bytes.push(FRAME_TAIL1);
        let _ = bytes.push(FRAME_TAIL2);

        let crc = checksum(&bytes);
        let crc_index = bytes.len() - 3;
        bytes[crc_index] = crc;

        Ok(Self { bytes })
    }

    /// Control word (protocol category)
    pub fn control_word(&self) -> u8 {
        self.bytes[2]
    }

    /// Command word (field/action within the category)
    pub fn command_word(&self) -> u8 {
        self.bytes[3]
    }

    /// Payload bytes between the length field and the CRC
    pub fn payload(&self) -> &[u8] {
        &self.bytes[6..self.bytes.len() - 3]
    }

    /// CRC byte as carried on the wire
    pub fn stored_checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 3]
    }

    /// Complete frame image, header through tail
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check the stored CRC against the computed sum.
    ///
    /// A mismatched frame must be dropped without dispatch.
    pub fn verify_checksum(&self) -> Result<(), FrameError> {
        if self.stored_checksum() == checksum(&self.bytes) {
            Ok(())
        } else {
            Err(FrameError::ChecksumMismatch)
        }
    }
}

/// State machine for recovering frames from an untrusted byte stream
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    remaining: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first header byte
    Idle,
    /// Got 0x53, waiting for 0x59
    Header2,
    /// Waiting for the control word
    ControlWord,
    /// Waiting for the command word
    CommandWord,
    /// Waiting for the high length byte
    LenHigh,
    /// Waiting for the low length byte
    LenLow,
    /// Reading payload bytes
    Payload,
    /// Waiting for the CRC byte
    Checksum,
    /// Waiting for the first tail byte
    Tail1,
    /// Waiting for the second tail byte
    Tail2,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Idle,
            buffer: Vec::new(),
            remaining: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.buffer.clear();
        self.remaining = 0;
    }

    /// Feed a single byte to the parser.
    ///
    /// Returns `Ok(Some(frame))` when a structurally complete frame has
    /// been assembled, `Ok(None)` when more bytes are needed, or `Err`
    /// when the stream desynchronized and the parser reset to idle.
    /// Checksum correctness is not checked here; call
    /// [`RawFrame::verify_checksum`] on the result.
    pub fn feed(&mut self, byte: u8) -> Result<Option<RawFrame>, FrameError> {
        match self.state {
            ParseState::Idle => {
                if byte == FRAME_HEADER1 {
                    self.state = ParseState::Header2;
                }
                // Silently skip noise while hunting for a header
                Ok(None)
            }
            ParseState::Header2 => {
                if byte == FRAME_HEADER2 {
                    self.buffer.clear();
                    let _ = self.buffer.push(FRAME_HEADER1);
                    let _ = self.buffer.push(FRAME_HEADER2);
                    self.state = ParseState::ControlWord;
                    Ok(None)
                } else {
                    self.reset();
                    Err(FrameError::Desync)
                }
            }
            ParseState::ControlWord => {
                let _ = self.buffer.push(byte);
                self.state = ParseState::CommandWord;
                Ok(None)
            }
            ParseState::CommandWord => {
                let _ = self.buffer.push(byte);
                self.state = ParseState::LenHigh;
                Ok(None)
            }
            ParseState::LenHigh => {
                if byte <= MAX_LEN_HIGH {
                    self.remaining = (byte as u16) << 8;
                    let _ = self.buffer.push(byte);
                    self.state = ParseState::LenLow;
                    Ok(None)
                } else {
                    self.reset();
                    Err(FrameError::LengthOutOfRange)
                }
            }
            ParseState::LenLow => {
                let len = self.remaining + byte as u16;
                if len > MAX_PAYLOAD_SIZE as u16 {
                    self.reset();
                    Err(FrameError::LengthOutOfRange)
                } else {
                    let _ = self.buffer.push(byte);
                    self.remaining = len;
                    self.state = if len == 0 {
                        ParseState::Checksum
                    } else {
                        ParseState::Payload
                    };
                    Ok(None)
                }
            }
            ParseState::Payload => {
                let _ = self.buffer.push(byte);
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let _ = self.buffer.push(byte);
                self.state = ParseState::Tail1;
                Ok(None)
            }
            ParseState::Tail1 => {
                if byte == FRAME_TAIL1 {
                    self.state = ParseState::Tail2;
                    Ok(None)
                } else {
                    self.reset();
                    Err(FrameError::Desync)
                }
            }
            ParseState::Tail2 => {
                if byte == FRAME_TAIL2 {
                    let _ = self.buffer.push(FRAME_TAIL1);
                    let _ = self.buffer.push(FRAME_TAIL2);
                    let frame = RawFrame {
                        bytes: self.buffer.clone(),
                    };
                    self.reset();
                    Ok(Some(frame))
                } else {
                    self.reset();
                    Err(FrameError::Desync)
                }
            }
        }
    }

    /// Feed multiple bytes to the parser.
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<RawFrame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
