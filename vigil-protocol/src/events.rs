//! Decoded radar facts and the closed wire enumerations they draw from.

use heapless::String;

/// Fixed bound for product-information text (model, id, hardware,
/// firmware). Payloads at or above this length are rejected, never
/// copied.
pub const PRODUCT_INFO_MAX_LEN: usize = 32;

/// Product-information text reported by the module
pub type ProductInfo = String<PRODUCT_INFO_MAX_LEN>;

/// Proximity-trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeepAwayState {
    /// No directional trend
    None,
    /// Target approaching the sensor
    CloseTo,
    /// Target receding from the sensor
    FarAway,
}

impl KeepAwayState {
    /// Parse from the wire byte; values outside the 3-entry table are
    /// rejected.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(KeepAwayState::None),
            0x01 => Some(KeepAwayState::CloseTo),
            0x02 => Some(KeepAwayState::FarAway),
            _ => None,
        }
    }
}

/// Coarse activity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionStatus {
    /// No occupant
    None,
    /// Occupant present, motionless
    Still,
    /// Occupant moving
    Active,
}

impl MotionStatus {
    /// Parse from the wire byte; values outside the 3-entry table are
    /// rejected.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(MotionStatus::None),
            0x01 => Some(MotionStatus::Still),
            0x02 => Some(MotionStatus::Active),
            _ => None,
        }
    }
}

/// Time the room must stay empty before the module reports unmanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnmannedDuration {
    None,
    Seconds1,
    Seconds30,
    Minutes1,
    Minutes2,
    Minutes5,
    Minutes10,
    Minutes30,
    Hours1,
}

impl UnmannedDuration {
    /// Parse from the wire byte; values outside the 9-entry table are
    /// rejected.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(UnmannedDuration::None),
            0x01 => Some(UnmannedDuration::Seconds1),
            0x02 => Some(UnmannedDuration::Seconds30),
            0x03 => Some(UnmannedDuration::Minutes1),
            0x04 => Some(UnmannedDuration::Minutes2),
            0x05 => Some(UnmannedDuration::Minutes5),
            0x06 => Some(UnmannedDuration::Minutes10),
            0x07 => Some(UnmannedDuration::Minutes30),
            0x08 => Some(UnmannedDuration::Hours1),
            _ => None,
        }
    }
}

/// Named operating profile selectable on the module.
///
/// Code 0x00 is reserved: the module never reports it and a set command
/// carrying it is suppressed rather than transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneMode {
    None,
    LivingRoom,
    Bedroom,
    Washroom,
    AreaDetection,
}

impl SceneMode {
    /// Protocol integer code for this scene
    pub fn to_code(self) -> u8 {
        match self {
            SceneMode::None => 0x00,
            SceneMode::LivingRoom => 0x01,
            SceneMode::Bedroom => 0x02,
            SceneMode::Washroom => 0x03,
            SceneMode::AreaDetection => 0x04,
        }
    }

    /// Parse from a protocol code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(SceneMode::None),
            0x01 => Some(SceneMode::LivingRoom),
            0x02 => Some(SceneMode::Bedroom),
            0x03 => Some(SceneMode::Washroom),
            0x04 => Some(SceneMode::AreaDetection),
            _ => None,
        }
    }

    /// Resolve a scene display name as shown in the vendor UI
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(SceneMode::None),
            "Living Room" => Some(SceneMode::LivingRoom),
            "Bedroom" => Some(SceneMode::Bedroom),
            "Washroom" => Some(SceneMode::Washroom),
            "Area Detection" => Some(SceneMode::AreaDetection),
            _ => None,
        }
    }

    /// Display name as shown in the vendor UI
    pub fn name(self) -> &'static str {
        match self {
            SceneMode::None => "None",
            SceneMode::LivingRoom => "Living Room",
            SceneMode::Bedroom => "Bedroom",
            SceneMode::Washroom => "Washroom",
            SceneMode::AreaDetection => "Area Detection",
        }
    }
}

/// One decoded semantic fact from the radar.
///
/// Every known command word maps to a variant, including fields no host
/// output consumes yet; future outputs are additive, not a reparse.
/// Distances are meters, speeds meters per second; threshold, boundary
/// and time fields are carried raw pending hardware-spec confirmation
/// of their units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEvent {
    /// Heartbeat reply from the module
    Heartbeat,
    /// Product model string
    ProductModel(ProductInfo),
    /// Product id string
    ProductId(ProductInfo),
    /// Hardware model string
    HardwareModel(ProductInfo),
    /// Firmware version string
    FirmwareVersion(ProductInfo),
    /// Underlying open-parameter reporting toggle state
    OutputSwitch(bool),
    /// Spatial static (micro-motion) energy, raw
    SpatialStaticValue(u8),
    /// Presence detection distance in meters
    PresenceDetectionDistance(f32),
    /// Spatial motion energy, raw
    SpatialMotionValue(u8),
    /// Distance of the moving target in meters
    MotionDistance(f32),
    /// Speed of the moving target in meters per second
    MotionSpeed(f32),
    /// All five underlying measurements packed into one report
    UnderlyingParameters {
        spatial_static: u8,
        detection_distance: f32,
        spatial_motion: u8,
        motion_distance: f32,
        motion_speed: f32,
    },
    /// Proximity trend
    KeepAway(KeepAwayState),
    /// Body-movement index (0-100)
    MovementSigns(u8),
    /// Active scene mode
    SceneMode(SceneMode),
    /// Occupancy flag
    HumanPresence(bool),
    /// Activity classification
    MotionStatus(MotionStatus),
    /// Work-status sensitivity level, raw
    Sensitivity(u8),
    /// Work-status custom mode setting, raw
    CustomModeSetting(u8),
    /// Existence judgment threshold, raw
    ExistenceThreshold(u8),
    /// Motion amplitude trigger threshold, raw
    MotionTriggerThreshold(u8),
    /// Presence perception boundary, raw code
    PresenceBoundary(u8),
    /// Motion trigger boundary, raw code
    MotionBoundary(u8),
    /// Motion trigger time, raw big-endian value
    MotionTriggerTime(u32),
    /// Motion-to-rest time, raw big-endian value
    MotionToRestTime(u32),
    /// Time before entering the unmanned state, raw big-endian value
    EnterUnmannedTime(u32),
    /// Configured unmanned-report delay
    UnmannedDuration(UnmannedDuration),
    /// Recognized control word with an unknown command word, or a wholly
    /// unknown control word; surfaced so hosts can observe protocol drift
    Unrecognized { control: u8, command: u8 },
}
