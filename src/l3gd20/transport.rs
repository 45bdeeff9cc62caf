use crate::l3gd20::{L3gError, Register};

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Register level access to the device over a 4 wire SPI bus.
///
/// Every read or write is one chip select cycle: pull CS low, send the address byte, move
/// the data, flush, pull CS high. Bit 7 of the address byte selects a read and bit 6 auto
/// increments the address when more than one byte is transferred.
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS, SE, PE> SpiTransport<SPI, CS>
where
    SPI: SpiBus<u8, Error = SE>,
    CS: OutputPin<Error = PE>,
{
    /// Take the bus and pin. Chip select is not touched here.
    pub fn new(spi: SPI, cs: CS) -> Self {
        SpiTransport { spi, cs }
    }

    /// Drive chip select to its idle (high) level.
    pub fn deselect(&mut self) -> Result<(), L3gError<SE, PE>> {
        self.cs.set_high().map_err(L3gError::PinError)
    }

    /// Read `buf.len()` consecutive registers starting at `reg`.
    pub fn read_bytes(&mut self, reg: Register, buf: &mut [u8]) -> Result<(), L3gError<SE, PE>> {
        if buf.is_empty() {
            return Err(L3gError::InvalidInput);
        }
        let cmd = reg.command(true, buf.len());

        #[cfg(feature = "defmt")]
        defmt::trace!("SPI read addr: {:#x}", cmd);

        self.transaction(|spi| {
            spi.write(&[cmd])?;
            spi.read(buf)
        })?;

        #[cfg(feature = "defmt")]
        defmt::trace!("SPI read data: {=[u8]:#x}", &buf[..]);

        Ok(())
    }

    /// Write `data` to consecutive registers starting at `reg`.
    pub fn write_bytes(&mut self, reg: Register, data: &[u8]) -> Result<(), L3gError<SE, PE>> {
        if data.is_empty() {
            return Err(L3gError::InvalidInput);
        }
        let cmd = reg.command(false, data.len());

        #[cfg(feature = "defmt")]
        defmt::trace!("SPI write addr: {:#x} data: {=[u8]:#x}", cmd, data);

        self.transaction(|spi| {
            spi.write(&[cmd])?;
            spi.write(data)
        })
    }

    /// Give back the bus and pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    // CS goes high again even when the bus fails, so the device never stays selected.
    fn transaction<F>(&mut self, f: F) -> Result<(), L3gError<SE, PE>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SE>,
    {
        self.cs.set_low().map_err(L3gError::PinError)?;
        let res = f(&mut self.spi).and_then(|()| self.spi.flush());
        self.cs.set_high().map_err(L3gError::PinError)?;
        res.map_err(L3gError::BusError)
    }
}
