//! Radar UART transmit task
//!
//! Drives the query plan on a fixed tick and writes the encoded frames
//! to the module.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use vigil_driver::QueryPlan;

use crate::channels::RADAR;

/// Radar TX task - sends query frames to the module
#[embassy_executor::task]
pub async fn radar_tx_task(mut tx: BufferedUartTx, poll_interval_ms: u32) {
    info!("Radar TX task started");

    let mut plan = QueryPlan::new();
    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));

    loop {
        ticker.next().await;

        // Take the session lock only long enough to plan
        let command = {
            let radar = RADAR.lock().await;
            plan.next(&radar)
        };

        if let Some(frame) = command.encode() {
            trace!("TX: {:?}", command);
            if let Err(e) = tx.write_all(&frame).await {
                warn!("UART write error: {:?}", e);
            }
        }
    }
}
