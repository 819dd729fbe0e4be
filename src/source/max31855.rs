//! SPI driver for the MAX31855 thermocouple converter.
//!
//! The chip has no registers and no commands: pulling chip select low latches a conversion and the
//! next 32 clocks shift the frame out, MSB first. MOSI is ignored.

use embedded_hal::{blocking::spi::Transfer, digital::v2::OutputPin};

use crate::{
    frame::{Frame, FRAME_LEN},
    source::{
        error::{Error, Result},
        FrameSource,
    },
};

/// Maximum SPI clock the chip accepts, in hertz
pub const MAX_CLOCK_HZ: u32 = 5_000_000;

pub struct Max31855<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS, SpiE, CsE> Max31855<SPI, CS>
where
    SPI: Transfer<u8, Error = SpiE>,
    CS: OutputPin<Error = CsE>,
{
    /// Take ownership of the bus and chip select.
    ///
    /// Chip select is driven high so the chip keeps converting until the first read.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, SpiE, CsE> {
        cs.set_high().map_err(Error::ChipSelect)?;
        Ok(Self { spi, cs })
    }

    /// Give back the bus and chip select
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn transfer(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), SpiE, CsE> {
        self.cs.set_low().map_err(Error::ChipSelect)?;

        let result = self.spi.transfer(buf).map(|_| ()).map_err(Error::Spi);

        // Release the chip even if the transfer failed
        self.cs.set_high().map_err(Error::ChipSelect)?;

        result
    }
}

impl<SPI, CS, SpiE, CsE> FrameSource for Max31855<SPI, CS>
where
    SPI: Transfer<u8, Error = SpiE>,
    CS: OutputPin<Error = CsE>,
{
    type Error = Error<SpiE, CsE>;

    #[cfg_attr(feature = "sizing", inline(never))]
    fn read_frame(&mut self) -> Result<Frame, SpiE, CsE> {
        let mut buf = [0u8; FRAME_LEN];
        self.transfer(&mut buf)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Raw frame: {=[u8]:x}", &buf[..]);

        Ok(Frame(buf))
    }
}
