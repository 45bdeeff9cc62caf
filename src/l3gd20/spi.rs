use crate::l3gd20::bits::{CtrlReg1, CtrlReg4, StatusReg};
use crate::l3gd20::transport::SpiTransport;
use crate::l3gd20::{decode_raw, decode_temperature, raw_to_dps};
use crate::l3gd20::{Axis, FullScale, L3gError, Register};
use crate::l3gd20::{DEFAULT_CONFIG, I_AM_L3GD20};

#[cfg(feature = "defmt")]
use defmt::{Format, Formatter};
use heapless::LinearMap;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Last written value of each control register.
pub type RegisterConfig = LinearMap<Register, u8, 5>;

/// L3GD20 gyroscope on an SPI bus.
///
/// A value of this type only exists once the device answered with the right `WHO_AM_I` and
/// the default configuration has been written.
pub struct L3gGyro<SPI, CS> {
    transport: SpiTransport<SPI, CS>,
    config: RegisterConfig,
    dps_fs: f32,
}

impl<SPI, CS, SE, PE> L3gGyro<SPI, CS>
where
    SPI: SpiBus<u8, Error = SE>,
    CS: OutputPin<Error = PE>,
{
    /// Check the device identity and write the default configuration.
    ///
    /// The bus must already be set up for [`MODE`](crate::l3gd20::MODE). Fails with
    /// `DeviceNotFound` if `WHO_AM_I` does not read back as `0xD4`.
    pub fn new(spi: SPI, cs: CS) -> Result<Self, L3gError<SE, PE>> {
        let mut transport = SpiTransport::new(spi, cs);
        transport.deselect()?;

        let mut gyro = L3gGyro {
            transport,
            config: LinearMap::new(),
            dps_fs: FullScale::Dps250.dps(),
        };

        let id = gyro.read_id()?;
        if id != I_AM_L3GD20 {
            #[cfg(feature = "defmt")]
            defmt::warn!("L3GD20 not present, WHO_AM_I = {:#x}", id);
            return Err(L3gError::DeviceNotFound(id));
        }

        for (reg, value) in DEFAULT_CONFIG.iter() {
            gyro.write_register(*reg, *value)?;
        }
        gyro.update_full_scale();

        #[cfg(feature = "defmt")]
        defmt::debug!("L3GD20 configured, full scale {} dps", gyro.dps_fs);

        Ok(gyro)
    }

    /// Read the `WHO_AM_I` register.
    pub fn read_id(&mut self) -> Result<u8, L3gError<SE, PE>> {
        let mut buf = [0; 1];
        self.transport.read_bytes(Register::WhoAmI, &mut buf)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("WHO_AM_I: {:#x}", buf[0]);

        Ok(buf[0])
    }

    /// Write a single register. Control register values are remembered in [`config`](Self::config).
    ///
    /// Rewriting CTRL_REG4 does not change the scale used by the axis reads until
    /// [`update_full_scale`](Self::update_full_scale) is called.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), L3gError<SE, PE>> {
        self.transport.write_bytes(reg, &[value])?;
        if reg.is_control() {
            // capacity is exactly the five control registers
            let recorded = self.config.insert(reg, value);
            debug_assert!(recorded.is_ok(), "control register map is full");
        }
        Ok(())
    }

    /// Read a single register.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, L3gError<SE, PE>> {
        let mut buf = [0; 1];
        self.transport.read_bytes(reg, &mut buf)?;
        Ok(buf[0])
    }

    /// Recompute the full scale from the last value written to CTRL_REG4.
    pub fn update_full_scale(&mut self) {
        if let Some(reg) = self.ctrl_reg4() {
            self.dps_fs = FullScale::from_ctrl_reg4(reg.0).dps();
        }
    }

    /// Last value written to CTRL_REG1.
    pub fn ctrl_reg1(&self) -> Option<CtrlReg1> {
        self.config.get(&Register::CtrlReg1).map(|v| CtrlReg1(*v))
    }

    /// Last value written to CTRL_REG4.
    pub fn ctrl_reg4(&self) -> Option<CtrlReg4> {
        self.config.get(&Register::CtrlReg4).map(|v| CtrlReg4(*v))
    }

    /// Full scale currently used to convert samples, in dps.
    pub fn full_scale_dps(&self) -> f32 {
        self.dps_fs
    }

    /// Control register values as last written by the driver.
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Raw two's complement sample of one axis.
    pub fn read_raw_axis(&mut self, axis: Axis) -> Result<i16, L3gError<SE, PE>> {
        let mut buf = [0; 2];
        self.transport.read_bytes(axis.low_register(), &mut buf)?;
        Ok(decode_raw(buf[0], buf[1]))
    }

    /// Raw samples of all three axes from a single burst read, so they belong to the same
    /// output data set.
    pub fn read_raw_axes(&mut self) -> Result<[i16; 3], L3gError<SE, PE>> {
        let mut buf = [0; 6];
        self.transport.read_bytes(Register::OutXL, &mut buf)?;
        Ok([
            decode_raw(buf[0], buf[1]),
            decode_raw(buf[2], buf[3]),
            decode_raw(buf[4], buf[5]),
        ])
    }

    /// Angular rate of one axis in dps.
    pub fn read_axis(&mut self, axis: Axis) -> Result<f32, L3gError<SE, PE>> {
        let raw = self.read_raw_axis(axis)?;
        Ok(raw_to_dps(raw, self.dps_fs))
    }

    /// Angular rate around X in dps.
    pub fn read_x(&mut self) -> Result<f32, L3gError<SE, PE>> {
        self.read_axis(Axis::X)
    }

    /// Angular rate around Y in dps.
    pub fn read_y(&mut self) -> Result<f32, L3gError<SE, PE>> {
        self.read_axis(Axis::Y)
    }

    /// Angular rate around Z in dps.
    pub fn read_z(&mut self) -> Result<f32, L3gError<SE, PE>> {
        self.read_axis(Axis::Z)
    }

    /// X, Y and Z angular rates in dps. These are three separate transactions, use
    /// [`read_raw_axes`](Self::read_raw_axes) for a consistent set.
    pub fn read_xyz(&mut self) -> Result<[f32; 3], L3gError<SE, PE>> {
        let mut res = [0.0; 3];
        res[0] = self.read_x()?;
        res[1] = self.read_y()?;
        res[2] = self.read_z()?;

        Ok(res)
    }

    /// Temperature register. The value is relative and not calibrated.
    pub fn read_temp(&mut self) -> Result<i8, L3gError<SE, PE>> {
        let raw = self.read_register(Register::OutTemp)?;
        Ok(decode_temperature(raw))
    }

    /// Data ready and overrun flags.
    pub fn read_status(&mut self) -> Result<StatusReg, L3gError<SE, PE>> {
        let raw = self.read_register(Register::StatusReg)?;
        Ok(StatusReg(raw))
    }

    /// Give back the bus and chip select pin.
    pub fn release(self) -> (SPI, CS) {
        self.transport.release()
    }
}

#[cfg(feature = "defmt")]
impl<SPI, CS> Format for L3gGyro<SPI, CS> {
    fn format(&self, fmt: Formatter) {
        defmt::write!(fmt, "L3GD20 gyro")
    }
}
