//! Fault classification of a frame.

use crate::frame::Frame;

/// Fault reported alongside a reading.
///
/// A fault never invalidates the temperature fields, it only marks the thermocouple value as
/// untrustworthy.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    #[default]
    None,
    /// Thermocouple is not connected
    OpenCircuit,
    ShortToGround,
    ShortToPower,
    /// Fault flag set without any cause bit
    Unknown,
}

impl FaultKind {
    /// Classify the fault bits of a frame.
    ///
    /// The summary flag in byte 2 gates everything. When several cause bits are set the first of
    /// open circuit, short to ground, short to power wins.
    pub const fn classify(frame: &Frame) -> Self {
        if !frame.fault_flag() {
            Self::None
        } else if frame.open_circuit() {
            Self::OpenCircuit
        } else if frame.short_to_ground() {
            Self::ShortToGround
        } else if frame.short_to_power() {
            Self::ShortToPower
        } else {
            Self::Unknown
        }
    }

    #[inline]
    pub const fn is_fault(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Human readable description, `None` when there is no fault
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::OpenCircuit => Some("Open circuit to thermometer probe"),
            Self::ShortToGround => Some("Thermometer probe shorted to ground"),
            Self::ShortToPower => Some("Thermometer probe shorted to power"),
            Self::Unknown => Some("Unknown fault (fault flag set, no cause bit)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(byte0: u8, byte2: u8) -> Frame {
        Frame([byte0, 0x00, byte2, 0x00])
    }

    #[test]
    fn flag_clear_is_never_a_fault() {
        for byte0 in 0..=u8::MAX {
            for low in 0..0x80 {
                assert_eq!(FaultKind::classify(&frame(byte0, low)), FaultKind::None);
            }
        }
    }

    #[test]
    fn open_circuit_wins() {
        assert_eq!(
            FaultKind::classify(&frame(0b1110_0000, 0x80)),
            FaultKind::OpenCircuit
        );
        assert_eq!(
            FaultKind::classify(&frame(0b1010_0000, 0x80)),
            FaultKind::OpenCircuit
        );
        assert_eq!(
            FaultKind::classify(&frame(0b1100_0000, 0x80)),
            FaultKind::OpenCircuit
        );
    }

    #[test]
    fn ground_beats_power() {
        assert_eq!(
            FaultKind::classify(&frame(0b0110_0000, 0x80)),
            FaultKind::ShortToGround
        );
        assert_eq!(
            FaultKind::classify(&frame(0b0100_0000, 0x80)),
            FaultKind::ShortToGround
        );
        assert_eq!(
            FaultKind::classify(&frame(0b0010_0000, 0x80)),
            FaultKind::ShortToPower
        );
    }

    #[test]
    fn flag_without_cause_is_unknown() {
        assert_eq!(FaultKind::classify(&frame(0x00, 0x80)), FaultKind::Unknown);
        // Reserved and temperature bits are not causes
        assert_eq!(FaultKind::classify(&frame(0x1F, 0xFF)), FaultKind::Unknown);
    }

    #[test]
    fn scv_echo_is_not_a_cause() {
        let frame = Frame([0x00, 0x00, 0x80, 0x01]);
        assert_eq!(FaultKind::classify(&frame), FaultKind::Unknown);

        let frame = Frame([0x00, 0x00, 0x00, 0x01]);
        assert_eq!(FaultKind::classify(&frame), FaultKind::None);
    }

    #[test]
    fn messages() {
        assert_eq!(FaultKind::None.message(), None);
        assert!(!FaultKind::None.is_fault());
        assert_eq!(
            FaultKind::OpenCircuit.message(),
            Some("Open circuit to thermometer probe")
        );
        assert_eq!(
            FaultKind::ShortToGround.message(),
            Some("Thermometer probe shorted to ground")
        );
        assert_eq!(
            FaultKind::ShortToPower.message(),
            Some("Thermometer probe shorted to power")
        );
        assert_eq!(
            FaultKind::Unknown.message(),
            Some("Unknown fault (fault flag set, no cause bit)")
        );
        assert!(FaultKind::Unknown.is_fault());
    }
}
