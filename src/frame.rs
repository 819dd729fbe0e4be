//! Raw 32-bit frame emitted by the converter on every read.

/// Open circuit fault bit in byte 0.
pub const OC_BIT: u8 = 0b1000_0000;
/// Short to ground fault bit in byte 0.
pub const SCG_BIT: u8 = 0b0100_0000;
/// Short to power fault bit in byte 0.
pub const SCV_BIT: u8 = 0b0010_0000;
/// Summary fault bit in byte 2. Set whenever any of the byte 0 fault bits are set.
pub const FAULT_BIT: u8 = 0b1000_0000;
/// Repeat of the short to power bit in byte 3.
pub const SCV_ECHO_BIT: u8 = 0b0000_0001;

/// Internal temperature bits of byte 0. Bit 3 is the sign.
pub const INTERNAL_HIGH_MASK: u8 = 0b0000_1111;
/// Thermocouple temperature bits of byte 2. Bit 5 is the sign.
pub const THERMOCOUPLE_HIGH_MASK: u8 = 0b0011_1111;

/// Number of bytes in a frame.
pub const FRAME_LEN: usize = 4;

/// One 4-byte big-endian frame, exactly as clocked out of the chip.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame(pub [u8; FRAME_LEN]);

static_assertions::assert_eq_size!(Frame, u32);

impl Frame {
    #[inline]
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn bytes(&self) -> [u8; FRAME_LEN] {
        self.0
    }

    /// The whole frame as a single big-endian word
    #[inline]
    pub const fn to_word(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    #[inline]
    pub const fn fault_flag(&self) -> bool {
        self.0[2] & FAULT_BIT != 0
    }

    #[inline]
    pub const fn open_circuit(&self) -> bool {
        self.0[0] & OC_BIT != 0
    }

    #[inline]
    pub const fn short_to_ground(&self) -> bool {
        self.0[0] & SCG_BIT != 0
    }

    #[inline]
    pub const fn short_to_power(&self) -> bool {
        self.0[0] & SCV_BIT != 0
    }

    /// Repeated short to power bit at the tail of the frame.
    ///
    /// Shares its position with the thermocouple LSB, so it is never used to classify faults.
    #[inline]
    pub const fn scv_echo(&self) -> bool {
        self.0[3] & SCV_ECHO_BIT != 0
    }

    /// Byte pair carrying the internal (cold-junction) temperature field
    #[inline]
    pub const fn internal_bytes(&self) -> [u8; 2] {
        [self.0[0] & INTERNAL_HIGH_MASK, self.0[1]]
    }

    /// Byte pair carrying the thermocouple temperature field
    #[inline]
    pub const fn thermocouple_bytes(&self) -> [u8; 2] {
        [self.0[2] & THERMOCOUPLE_HIGH_MASK, self.0[3]]
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<u32> for Frame {
    fn from(word: u32) -> Self {
        Self(word.to_be_bytes())
    }
}

impl From<Frame> for u32 {
    fn from(frame: Frame) -> Self {
        frame.to_word()
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = InvalidLength;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <[u8; FRAME_LEN]>::try_from(value)
            .map(Self)
            .map_err(|_| InvalidLength(value.len()))
    }
}

/// A byte slice of the wrong length was offered as a frame. Holds the offending length.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidLength(pub usize);

impl InvalidLength {
    pub fn as_str(&self) -> &'static str {
        "Frame must be exactly 4 bytes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_big_endian() {
        let frame = Frame::from(0x1234_5678_u32);
        assert_eq!(frame.bytes(), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(frame.to_word(), 0x1234_5678);
        assert_eq!(u32::from(frame), 0x1234_5678);
    }

    #[test]
    fn slice_length_is_checked() {
        let bytes: [u8; 5] = [0x00, 0x50, 0x02, 0x00, 0xFF];

        assert_eq!(
            Frame::try_from(&bytes[..4]),
            Ok(Frame([0x00, 0x50, 0x02, 0x00]))
        );
        assert_eq!(Frame::try_from(&bytes[..]), Err(InvalidLength(5)));
        assert_eq!(Frame::try_from(&bytes[..3]), Err(InvalidLength(3)));
        assert_eq!(Frame::try_from(&[0u8; 0][..]), Err(InvalidLength(0)));
    }

    #[test]
    fn fault_bits() {
        let frame = Frame([0b1110_0000, 0x00, 0b1000_0000, 0x01]);
        assert!(frame.open_circuit());
        assert!(frame.short_to_ground());
        assert!(frame.short_to_power());
        assert!(frame.fault_flag());
        assert!(frame.scv_echo());

        let frame = Frame([0b0001_1111, 0xFF, 0b0111_1111, 0xFE]);
        assert!(!frame.open_circuit());
        assert!(!frame.short_to_ground());
        assert!(!frame.short_to_power());
        assert!(!frame.fault_flag());
        assert!(!frame.scv_echo());
    }

    #[test]
    fn field_bytes_drop_flag_bits() {
        let frame = Frame([0xFF, 0xAB, 0xFF, 0xCD]);
        assert_eq!(frame.internal_bytes(), [0x0F, 0xAB]);
        assert_eq!(frame.thermocouple_bytes(), [0x3F, 0xCD]);
    }
}
