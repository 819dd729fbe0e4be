//! Decoder and sampling loop for MAX31855-style thermocouple converters.
//!
//! The chip emits one 32-bit frame per SPI read. [`decoder::decode`] turns that frame into a
//! [`Reading`]: cold-junction and thermocouple temperatures plus a classified fault. The decoder
//! is pure; capturing frames ([`source`]) and pacing reads ([`poll`]) live beside it.
#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, async_fn_in_trait)]

pub mod decoder;
pub mod fault;
pub mod field;
pub mod frame;
pub mod poll;
pub mod source;
pub mod thermometer;

pub use crate::{
    decoder::{decode, Reading},
    fault::FaultKind,
    frame::Frame,
    poll::{Pacer, Poller, StopSignal},
    source::FrameSource,
    thermometer::{Duration, Instant, Temperature},
};
