//! Radar UART receive task
//!
//! Feeds received bytes through the radar session and publishes the
//! decoded events.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::{EVENT_CHANNEL, RADAR};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Radar RX task - parses and dispatches frames from the module
#[embassy_executor::task]
pub async fn radar_rx_task(mut rx: BufferedUartRx) {
    info!("Radar RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                // Hold the session across the batch; the TX task only
                // needs it once per poll tick
                let mut radar = RADAR.lock().await;
                for &byte in &buf[..n] {
                    match radar.push_byte(byte) {
                        Ok(Some(event)) => {
                            debug!("Radar event: {:?}", event);
                            // Send to event channel, dropping if full
                            if EVENT_CHANNEL.try_send(event).is_err() {
                                warn!("Event channel full, dropping event");
                            }
                        }
                        Ok(None) => {
                            // Mid-frame, or a frame with nothing to report
                        }
                        Err(e) => {
                            warn!("Radar receive error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
