//! Event logging task
//!
//! Drains the event channel and logs each decoded fact. A machine
//! integration would fan these out to its own outputs instead.

use defmt::*;

use vigil_protocol::SensorEvent;

use crate::channels::EVENT_CHANNEL;

/// Event log task - reports decoded radar facts
#[embassy_executor::task]
pub async fn event_log_task() {
    info!("Event log task started");

    loop {
        let event = EVENT_CHANNEL.receive().await;
        match event {
            SensorEvent::Heartbeat => trace!("Module heartbeat"),
            SensorEvent::HumanPresence(present) => info!("Presence: {}", present),
            SensorEvent::MotionStatus(status) => info!("Motion: {:?}", status),
            SensorEvent::KeepAway(state) => info!("Proximity: {:?}", state),
            SensorEvent::ProductModel(text) => info!("Product model: {}", text.as_str()),
            SensorEvent::ProductId(text) => info!("Product id: {}", text.as_str()),
            SensorEvent::HardwareModel(text) => info!("Hardware model: {}", text.as_str()),
            SensorEvent::FirmwareVersion(text) => info!("Firmware version: {}", text.as_str()),
            SensorEvent::Unrecognized { control, command } => {
                warn!("Unrecognized frame: control={=u8:x} command={=u8:x}", control, command)
            }
            other => debug!("Radar event: {:?}", other),
        }
    }
}
