//! Inter-task communication
//!
//! Static channels and shared state used between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

use vigil_driver::Radar;
use vigil_protocol::SensorEvent;

/// Channel capacity for decoded sensor events
const EVENT_CHANNEL_SIZE: usize = 16;

/// Decoded radar events (for host outputs and logging)
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, SensorEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Radar session shared between the RX task (feeds bytes) and the TX
/// task (consults the identity cache to plan queries)
pub static RADAR: Mutex<CriticalSectionRawMutex, Radar> = Mutex::new(Radar::new());
