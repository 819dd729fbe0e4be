//! Signed fixed-point fields packed into a frame.

use crate::thermometer::Temperature;

/// Layout of one two's-complement temperature field
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Width of the field in bits. The top bit is the sign.
    pub width: u32,
    /// Resolution expressed as fractional bits, i.e. one count is 2^-frac_bits degrees.
    pub frac_bits: u32,
}

/// Cold-junction field: 12 bits, 0.0625 °C per count
pub const INTERNAL: Field = Field {
    width: 12,
    frac_bits: 4,
};

/// Thermocouple field: 14 bits, 0.25 °C per count
pub const THERMOCOUPLE: Field = Field {
    width: 14,
    frac_bits: 2,
};

// Every field must fit the temperature grid without rounding.
static_assertions::const_assert!(INTERNAL.frac_bits <= Temperature::FRAC_NBITS);
static_assertions::const_assert!(THERMOCOUPLE.frac_bits <= Temperature::FRAC_NBITS);

impl Field {
    #[inline]
    pub const fn sign_bit(self) -> u32 {
        self.width - 1
    }

    #[inline]
    const fn mask(self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    #[inline]
    const fn modulus(self) -> i32 {
        1 << self.width
    }

    /// Temperature of a single count
    pub const fn resolution(self) -> Temperature {
        Temperature::from_bits(1 << (Temperature::FRAC_NBITS - self.frac_bits))
    }

    /// Unsigned field word, bits above the field cleared
    #[inline]
    pub const fn raw(self, bytes: [u8; 2]) -> u16 {
        u16::from_be_bytes(bytes) & self.mask()
    }

    /// Signed count held by the field.
    ///
    /// The word is two's complement over `width` bits, so a set sign bit means `raw - 2^width`.
    pub const fn counts(self, bytes: [u8; 2]) -> i32 {
        let raw = self.raw(bytes) as i32;
        if raw & (1 << self.sign_bit()) != 0 {
            raw - self.modulus()
        } else {
            raw
        }
    }

    /// Decode the field into degrees Celsius
    pub const fn extract(self, bytes: [u8; 2]) -> Temperature {
        Temperature::from_bits(self.counts(bytes) << (Temperature::FRAC_NBITS - self.frac_bits))
    }

    /// Pack a temperature into the field.
    ///
    /// Off-grid values are rounded toward negative infinity and out-of-range values wrap, exactly
    /// as the chip's own converter would overflow.
    pub const fn encode(self, temp: Temperature) -> [u8; 2] {
        let counts = temp.to_bits() >> (Temperature::FRAC_NBITS - self.frac_bits);
        let word = counts.rem_euclid(self.modulus()) as u16;
        word.to_be_bytes()
    }

    /// Smallest temperature the field can hold
    pub const fn min(self) -> Temperature {
        Temperature::from_bits((-self.modulus() / 2) << (Temperature::FRAC_NBITS - self.frac_bits))
    }

    /// Largest temperature the field can hold
    pub const fn max(self) -> Temperature {
        Temperature::from_bits(
            (self.modulus() / 2 - 1) << (Temperature::FRAC_NBITS - self.frac_bits),
        )
    }
}
