// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

/// Bitfield views of the configuration and status registers
pub mod bits;

/// The SPI module holds the driver itself
pub mod spi;

/// The transport module encodes register reads and writes into SPI transactions
pub mod transport;

use bits::CtrlReg4;
#[cfg(feature = "defmt")]
use defmt::{Format, Formatter};
use strum::{EnumIter, FromRepr};

/// SPI mode required by the device (CPOL = 1, CPHA = 1).
pub const MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_3;

/// Address bit 7: set for reads, clear for writes.
pub const READWRITE_CMD: u8 = 0x80;
/// Address bit 6: set when more than one consecutive register is transferred.
pub const MULTIPLEBYTE_CMD: u8 = 0x40;
/// Bits 5-0 of the address byte hold the register sub-address.
pub const SUB_ADDRESS_MASK: u8 = 0x3F;

/// `WHO_AM_I` value of the L3GD20.
pub const I_AM_L3GD20: u8 = 0xD4;
/// `WHO_AM_I` value of the L3GD20TR.
pub const I_AM_L3GD20_TR: u8 = 0xD5;

// CTRL_REG1
/// Power down mode
pub const MODE_POWERDOWN: u8 = 0x00;
/// Normal (active) mode
pub const MODE_ACTIVE: u8 = 0x08;
/// 95Hz output data rate
pub const OUTPUT_DATARATE_1: u8 = 0x00;
/// 190Hz output data rate
pub const OUTPUT_DATARATE_2: u8 = 0x40;
/// 380Hz output data rate
pub const OUTPUT_DATARATE_3: u8 = 0x80;
/// 760Hz output data rate
pub const OUTPUT_DATARATE_4: u8 = 0xC0;
/// X axis enable
pub const X_ENABLE: u8 = 0x02;
/// Y axis enable
pub const Y_ENABLE: u8 = 0x01;
/// Z axis enable
pub const Z_ENABLE: u8 = 0x04;
/// All axes enabled
pub const AXES_ENABLE: u8 = 0x07;
/// All axes disabled
pub const AXES_DISABLE: u8 = 0x00;
/// Bandwidth selection 0
pub const BANDWIDTH_1: u8 = 0x00;
/// Bandwidth selection 1
pub const BANDWIDTH_2: u8 = 0x10;
/// Bandwidth selection 2
pub const BANDWIDTH_3: u8 = 0x20;
/// Bandwidth selection 3
pub const BANDWIDTH_4: u8 = 0x30;

// CTRL_REG2
/// High pass filter normal mode, reset by reading the reference register
pub const HPM_NORMAL_MODE_RES: u8 = 0x00;
/// High pass filter reference signal mode
pub const HPM_REF_SIGNAL: u8 = 0x10;
/// High pass filter normal mode
pub const HPM_NORMAL_MODE: u8 = 0x20;
/// High pass filter autoreset on interrupt
pub const HPM_AUTORESET_INT: u8 = 0x30;
/// High pass cut-off frequency configuration 0
pub const HPFCF_0: u8 = 0x00;
/// High pass cut-off frequency configuration 1
pub const HPFCF_1: u8 = 0x01;
/// High pass cut-off frequency configuration 2
pub const HPFCF_2: u8 = 0x02;
/// High pass cut-off frequency configuration 3
pub const HPFCF_3: u8 = 0x03;
/// High pass cut-off frequency configuration 4
pub const HPFCF_4: u8 = 0x04;
/// High pass cut-off frequency configuration 5
pub const HPFCF_5: u8 = 0x05;
/// High pass cut-off frequency configuration 6
pub const HPFCF_6: u8 = 0x06;
/// High pass cut-off frequency configuration 7
pub const HPFCF_7: u8 = 0x07;
/// High pass cut-off frequency configuration 8
pub const HPFCF_8: u8 = 0x08;
/// High pass cut-off frequency configuration 9, 0.018Hz at 190Hz output data rate
pub const HPFCF_9: u8 = 0x09;

// CTRL_REG4
/// 250 dps full scale
pub const FULLSCALE_250: u8 = 0x00;
/// 500 dps full scale
pub const FULLSCALE_500: u8 = 0x10;
/// 2000 dps full scale
pub const FULLSCALE_2000: u8 = 0x20;
/// Mask of the two full scale bits
pub const FULLSCALE_SELECTION: u8 = 0x30;
/// Output registers updated continuously
pub const BLOCK_DATA_UPDATE_CONTINUOUS: u8 = 0x00;
/// Output registers not updated until both bytes were read
pub const BLOCK_DATA_UPDATE_SINGLE: u8 = 0x80;
/// Little endian output data
pub const BLE_LSB: u8 = 0x00;
/// Big endian output data
pub const BLE_MSB: u8 = 0x40;

// CTRL_REG5
/// Reboot memory content
pub const BOOT: u8 = 0x80;
/// FIFO enable
pub const FIFO_ENABLE: u8 = 0x40;
/// High pass filter disabled
pub const HIGHPASSFILTER_DISABLE: u8 = 0x00;
/// High pass filter enabled
pub const HIGHPASSFILTER_ENABLE: u8 = 0x10;

/// 190Hz output data rate, 50Hz cut-off, normal mode, all axes on.
pub const CTRL_REG1_VAL: u8 = OUTPUT_DATARATE_2 | BANDWIDTH_3 | MODE_ACTIVE | AXES_ENABLE;
/// Normal high pass mode, 0.018Hz cut-off.
pub const CTRL_REG2_VAL: u8 = HPM_NORMAL_MODE_RES | HPFCF_9;
/// No interrupts.
pub const CTRL_REG3_VAL: u8 = 0x00;
/// Continuous update, little endian, 250 dps, 4 wire SPI.
pub const CTRL_REG4_VAL: u8 = BLOCK_DATA_UPDATE_CONTINUOUS | BLE_LSB | FULLSCALE_250;
/// FIFO enabled, high pass filter off.
pub const CTRL_REG5_VAL: u8 = FIFO_ENABLE | HIGHPASSFILTER_DISABLE;

/// Configuration written on construction, in this order.
pub const DEFAULT_CONFIG: [(Register, u8); 5] = [
    (Register::CtrlReg1, CTRL_REG1_VAL),
    (Register::CtrlReg2, CTRL_REG2_VAL),
    (Register::CtrlReg3, CTRL_REG3_VAL),
    (Register::CtrlReg4, CTRL_REG4_VAL),
    (Register::CtrlReg5, CTRL_REG5_VAL),
];

/// Register map of the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[repr(u8)]
pub enum Register {
    /// Device identification
    WhoAmI = 0x0F,
    /// Control register 1
    CtrlReg1 = 0x20,
    /// Control register 2
    CtrlReg2 = 0x21,
    /// Control register 3
    CtrlReg3 = 0x22,
    /// Control register 4
    CtrlReg4 = 0x23,
    /// Control register 5
    CtrlReg5 = 0x24,
    /// Reference value for interrupt generation
    Reference = 0x25,
    /// Temperature output
    OutTemp = 0x26,
    /// Status register
    StatusReg = 0x27,
    /// X axis output, low byte
    OutXL = 0x28,
    /// X axis output, high byte
    OutXH = 0x29,
    /// Y axis output, low byte
    OutYL = 0x2A,
    /// Y axis output, high byte
    OutYH = 0x2B,
    /// Z axis output, low byte
    OutZL = 0x2C,
    /// Z axis output, high byte
    OutZH = 0x2D,
    /// FIFO control
    FifoCtrlReg = 0x2E,
    /// FIFO source
    FifoSrcReg = 0x2F,
    /// Interrupt 1 configuration
    Int1Cfg = 0x30,
    /// Interrupt 1 source
    Int1Src = 0x31,
    /// Interrupt 1 X threshold, high byte
    Int1TshXH = 0x32,
    /// Interrupt 1 X threshold, low byte
    Int1TshXL = 0x33,
    /// Interrupt 1 Y threshold, high byte
    Int1TshYH = 0x34,
    /// Interrupt 1 Y threshold, low byte
    Int1TshYL = 0x35,
    /// Interrupt 1 Z threshold, high byte
    Int1TshZH = 0x36,
    /// Interrupt 1 Z threshold, low byte
    Int1TshZL = 0x37,
    /// Interrupt 1 duration
    Int1Duration = 0x38,
}

impl Register {
    /// Raw register sub-address.
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Control registers 1 to 5 are the ones the driver keeps track of.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            Register::CtrlReg1
                | Register::CtrlReg2
                | Register::CtrlReg3
                | Register::CtrlReg4
                | Register::CtrlReg5
        )
    }

    /// Address byte sent on the bus for a transfer of `len` bytes.
    pub(crate) fn command(self, is_read: bool, len: usize) -> u8 {
        let mut cmd = self.addr();
        if is_read {
            cmd |= READWRITE_CMD;
        }
        if len > 1 {
            cmd |= MULTIPLEBYTE_CMD;
        }
        cmd
    }
}

/// Gyro full scale options in degrees per second (dps).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum FullScale {
    /// 250 dps
    Dps250,
    /// 500 dps
    Dps500,
    /// 2000 dps
    Dps2000,
}

impl FullScale {
    /// Decode the FS field (bits 5-4) of a CTRL_REG4 value. The reserved pattern `0b11` also
    /// selects 2000 dps on the device.
    pub fn from_ctrl_reg4(value: u8) -> Self {
        match CtrlReg4(value).fs() {
            0b00 => FullScale::Dps250,
            0b01 => FullScale::Dps500,
            _ => FullScale::Dps2000,
        }
    }

    /// Full scale in dps.
    pub fn dps(self) -> f32 {
        match self {
            FullScale::Dps250 => 250.0,
            FullScale::Dps500 => 500.0,
            FullScale::Dps2000 => 2000.0,
        }
    }
}

/// Measurement axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Low byte output register; the high byte follows at the next address.
    pub fn low_register(self) -> Register {
        match self {
            Axis::X => Register::OutXL,
            Axis::Y => Register::OutYL,
            Axis::Z => Register::OutZL,
        }
    }
}

/// The possible errors that the driver can return.
///
/// `BusError` is for when an SPI bus operation fails and `PinError` for when driving the chip
/// select pin fails. Both hold the HAL error untouched; the driver never retries.
///
/// `DeviceNotFound` is returned on construction when `WHO_AM_I` does not read back as
/// [`I_AM_L3GD20`]. It holds the value that was read.
///
/// `InvalidInput` is for when an input to a driver function is unacceptable.
#[derive(Debug)]
pub enum L3gError<SE, PE> {
    /// An error occurred when using the bus
    BusError(SE),
    /// An error occurred when driving chip select
    PinError(PE),
    /// The device did not identify as an L3GD20
    DeviceNotFound(u8),
    /// An invalid input was passed to the function
    InvalidInput,
}

#[cfg(feature = "defmt")]
impl<SE, PE> Format for L3gError<SE, PE> {
    fn format(&self, fmt: Formatter) {
        match *self {
            L3gError::BusError(_) => defmt::write!(fmt, "Bus Error!"),
            L3gError::PinError(_) => defmt::write!(fmt, "Chip select Error!"),
            L3gError::DeviceNotFound(id) => {
                defmt::write!(fmt, "L3GD20 not present (WHO_AM_I = {:#x})", id)
            }
            L3gError::InvalidInput => defmt::write!(fmt, "Invalid input in the function!"),
        }
    }
}

/// Decode a little endian two's complement sample from its low and high byte.
pub fn decode_raw(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Decode the temperature register as a signed 8 bit value.
pub fn decode_temperature(raw: u8) -> i8 {
    raw as i8
}

/// Scale a raw sample by the full scale factor.
pub fn raw_to_dps(raw: i16, full_scale_dps: f32) -> f32 {
    raw as f32 * full_scale_dps / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn register_addresses_are_in_range() {
        for reg in Register::iter() {
            assert!((0x0F..=0x38).contains(&reg.addr()));
            assert_eq!(reg.addr() & !SUB_ADDRESS_MASK, 0);
            assert_eq!(Register::from_repr(reg.addr()), Some(reg));
        }
        assert_eq!(Register::from_repr(0x10), None);
        assert_eq!(Register::from_repr(0x39), None);
    }

    #[test]
    fn read_command_flags() {
        for reg in Register::iter() {
            assert_eq!(reg.command(true, 1), reg.addr() | 0x80);
            assert_eq!(reg.command(true, 2), reg.addr() | 0xC0);
            assert_eq!(reg.command(true, 6), reg.addr() | 0xC0);
        }
    }

    #[test]
    fn write_command_flags() {
        for reg in Register::iter() {
            assert_eq!(reg.command(false, 1), reg.addr());
            assert_eq!(reg.command(false, 3), reg.addr() | 0x40);
            assert_eq!(reg.command(false, 3) & READWRITE_CMD, 0);
        }
    }

    #[test]
    fn only_ctrl_registers_are_control() {
        let count = Register::iter().filter(|r| r.is_control()).count();
        assert_eq!(count, 5);
        for (reg, _) in DEFAULT_CONFIG.iter() {
            assert!(reg.is_control());
        }
    }

    #[test]
    fn default_config_values() {
        assert_eq!(CTRL_REG1_VAL, 0b0110_1111);
        assert_eq!(CTRL_REG2_VAL, 0b0000_1001);
        assert_eq!(CTRL_REG3_VAL, 0b0000_0000);
        assert_eq!(CTRL_REG4_VAL, 0b0000_0000);
        assert_eq!(CTRL_REG5_VAL, 0b0100_0000);
        assert_eq!(CTRL_REG2_VAL & 0x0F, HPFCF_9);
    }

    #[test]
    fn full_scale_from_fs_bits() {
        assert_eq!(FullScale::from_ctrl_reg4(0b0000_0000), FullScale::Dps250);
        assert_eq!(FullScale::from_ctrl_reg4(0b0001_0000), FullScale::Dps500);
        assert_eq!(FullScale::from_ctrl_reg4(0b0010_0000), FullScale::Dps2000);
        assert_eq!(FullScale::from_ctrl_reg4(0b0011_0000), FullScale::Dps2000);
        // other bits are ignored
        assert_eq!(FullScale::from_ctrl_reg4(0b1100_1111), FullScale::Dps250);
    }

    #[test]
    fn two_complement_samples() {
        assert_eq!(decode_raw(0xFF, 0xFF), -1);
        assert_eq!(decode_raw(0x00, 0x80), -32768);
        assert_eq!(decode_raw(0xFF, 0x7F), 32767);
        assert_eq!(decode_raw(0x34, 0x12), 0x1234);
    }

    #[test]
    fn temperature_samples() {
        assert_eq!(decode_temperature(0x00), 0);
        assert_eq!(decode_temperature(0x80), -128);
        assert_eq!(decode_temperature(0xFF), -1);
        assert_eq!(decode_temperature(0x19), 25);
    }

    #[test]
    fn dps_scaling() {
        assert_eq!(raw_to_dps(1000, 250.0), 250.0);
        assert_eq!(raw_to_dps(-4, 2000.0), -8.0);
        assert_eq!(raw_to_dps(0, 500.0), 0.0);
    }
}
