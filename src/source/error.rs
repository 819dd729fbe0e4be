pub type Result<T, SpiE, CsE> = core::result::Result<T, Error<SpiE, CsE>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, CsE> {
    /// The SPI transfer failed
    Spi(SpiE),

    /// Chip select pin error
    ChipSelect(CsE),
}

impl<SpiE, CsE> Error<SpiE, CsE> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::Spi(_) => "SPI transfer failed",
            Error::ChipSelect(_) => "Chip select error",
        }
    }
}
