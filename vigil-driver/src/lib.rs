//! Sans-io session driver for the R24 presence radar
//!
//! This crate sits between a UART and the wire protocol: [`radar::Radar`]
//! consumes received bytes and yields typed events while caching the
//! module's identity, and [`poll::QueryPlan`] decides which query frame
//! to transmit next. Neither touches hardware; the owning task moves the
//! bytes.

#![no_std]
#![deny(unsafe_code)]

pub mod poll;
pub mod radar;

pub use poll::QueryPlan;
pub use radar::{Radar, RadarConfig, RadarError};
