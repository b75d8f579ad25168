//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod event_log;
pub mod radar_rx;
pub mod radar_tx;

pub use event_log::event_log_task;
pub use radar_rx::radar_rx_task;
pub use radar_tx::radar_tx_task;
