//! Vigil - mmWave Presence Radar Firmware
//!
//! Main firmware binary for RP2040-based boards hosting an R24
//! presence radar over UART. Named after the practice of keeping
//! vigil - the radar watches a room around the clock and reports
//! presence, motion and proximity trends.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use vigil_driver::RadarConfig;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vigil firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let radar_config = RadarConfig::default();

    // Setup UART for the radar link (module is fixed at 115200 8N1)
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = radar_config.baud_rate;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for radar link at {} baud", radar_config.baud_rate);

    // Spawn tasks
    spawner.spawn(tasks::radar_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::radar_tx_task(tx, radar_config.poll_interval_ms))
        .unwrap();
    spawner.spawn(tasks::event_log_task()).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
