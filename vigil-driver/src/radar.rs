//! Radar session state
//!
//! [`Radar`] owns the byte-stream parser and a cache of the module's
//! slow-changing identity fields. The cache is what lets the polling
//! side stop re-asking questions the module has already answered.

use vigil_protocol::events::ProductInfo;
use vigil_protocol::{decode, DecodeError, FrameError, FrameParser, SensorEvent};

/// Link settings for an R24 module
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadarConfig {
    /// UART baud rate; the module is fixed at 115200 8N1
    pub baud_rate: u32,
    /// Interval between outbound query frames in milliseconds
    pub poll_interval_ms: u32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            poll_interval_ms: 1_000,
        }
    }
}

/// Session-level receive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadarError {
    /// Stream-level framing failure; the parser has resynchronized
    Frame(FrameError),
    /// A structurally valid frame carried an undecodable payload
    Decode(DecodeError),
}

impl From<FrameError> for RadarError {
    fn from(err: FrameError) -> Self {
        RadarError::Frame(err)
    }
}

impl From<DecodeError> for RadarError {
    fn from(err: DecodeError) -> Self {
        RadarError::Decode(err)
    }
}

/// One radar module session.
///
/// Feed every received byte through [`Radar::push_byte`]; identity
/// replies are cached as a side effect so [`crate::poll::QueryPlan`]
/// can skip startup queries that are already answered.
pub struct Radar {
    parser: FrameParser,
    product_model: Option<ProductInfo>,
    product_id: Option<ProductInfo>,
    hardware_model: Option<ProductInfo>,
    firmware_version: Option<ProductInfo>,
    output_switch: Option<bool>,
}

impl Radar {
    pub const fn new() -> Self {
        Self {
            parser: FrameParser::new(),
            product_model: None,
            product_id: None,
            hardware_model: None,
            firmware_version: None,
            output_switch: None,
        }
    }

    /// Consume one received byte.
    ///
    /// Most bytes return `Ok(None)`: either mid-frame, or a completed
    /// frame that carries no host-visible fact. Errors leave the parser
    /// resynchronized, so the caller logs and keeps feeding.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<SensorEvent>, RadarError> {
        let frame = match self.parser.feed(byte)? {
            Some(frame) => frame,
            None => return Ok(None),
        };
        frame.verify_checksum()?;

        match decode(&frame)? {
            Some(event) => {
                self.record(&event);
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Cache the identity facts the startup queries ask for
    fn record(&mut self, event: &SensorEvent) {
        match event {
            SensorEvent::ProductModel(text) => self.product_model = Some(text.clone()),
            SensorEvent::ProductId(text) => self.product_id = Some(text.clone()),
            SensorEvent::HardwareModel(text) => self.hardware_model = Some(text.clone()),
            SensorEvent::FirmwareVersion(text) => self.firmware_version = Some(text.clone()),
            SensorEvent::OutputSwitch(enabled) => self.output_switch = Some(*enabled),
            _ => {}
        }
    }

    pub fn product_model(&self) -> Option<&str> {
        self.product_model.as_deref()
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn hardware_model(&self) -> Option<&str> {
        self.hardware_model.as_deref()
    }

    pub fn firmware_version(&self) -> Option<&str> {
        self.firmware_version.as_deref()
    }

    /// Last reported underlying open-parameter toggle state
    pub fn output_switch(&self) -> Option<bool> {
        self.output_switch
    }
}

impl Default for Radar {
    fn default() -> Self {
        Self::new()
    }
}
