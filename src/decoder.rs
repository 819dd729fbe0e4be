//! Frame decoder
//!
//! Turns a raw [`Frame`] into a [`Reading`]. Pure and total: every 4-byte pattern decodes to some
//! reading, and the fault classification is carried in that reading rather than returned as an
//! error.

use crate::{
    fault::FaultKind,
    field::{INTERNAL, THERMOCOUPLE},
    frame::Frame,
    thermometer::{Instant, Temperature},
};

/// A decoded sample
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Reading {
    /// Cold-junction temperature in degrees Celsius
    pub internal: Temperature,
    /// Thermocouple temperature in degrees Celsius. Unreliable when `fault` is set.
    pub thermocouple: Temperature,
    pub fault: FaultKind,
    /// When the frame was captured, as supplied by the caller
    pub timestamp: Instant,
}

impl Reading {
    #[inline]
    pub fn internal_celsius(&self) -> f32 {
        self.internal.to_num()
    }

    #[inline]
    pub fn thermocouple_celsius(&self) -> f32 {
        self.thermocouple.to_num()
    }

    #[inline]
    pub const fn is_faulted(&self) -> bool {
        self.fault.is_fault()
    }

    #[inline]
    pub const fn fault_message(&self) -> Option<&'static str> {
        self.fault.message()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reading {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "Reading {{ internal: {=f32}, thermocouple: {=f32}, fault: {}, at: {=u64:us} }}",
            self.internal_celsius(),
            self.thermocouple_celsius(),
            self.fault,
            self.timestamp.ticks(),
        );
    }
}

/// Decode a frame captured at `now`.
///
/// Both temperature fields are always decoded, faults included.
#[cfg_attr(feature = "sizing", inline(never))]
pub const fn decode(frame: Frame, now: Instant) -> Reading {
    Reading {
        internal: INTERNAL.extract(frame.internal_bytes()),
        thermocouple: THERMOCOUPLE.extract(frame.thermocouple_bytes()),
        fault: FaultKind::classify(&frame),
        timestamp: now,
    }
}
