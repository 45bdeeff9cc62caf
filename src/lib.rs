// Copyright (c) 2022, Zachary D. Olkin.
// This code is provided under the MIT license.

//! Device agnostic driver for the L3GD20 three-axis gyroscope over SPI.
//! The driver depends on embedded-hal 1.0, so as long as the HAL you use implements `SpiBus`
//! and `OutputPin`, this driver should be compatible.
//!
//! The data sheet for this device can be found [here](https://www.st.com/resource/en/datasheet/l3gd20.pdf).
//!
//! The bus has to be configured by the caller before the driver is created: SPI mode 3
//! (see [`l3gd20::MODE`]), 8 bit frames, at most 10MHz. The chip select pin is driven by the
//! driver and idles high.
//!
//! On construction the driver checks the `WHO_AM_I` register and writes a fixed default
//! configuration (190Hz output data rate, 50Hz cut-off, all axes on, 250 dps full scale).
//! Angular rates are returned in degrees per second.
//!
//! There is no support for interrupts, FIFO streaming or self test.
//!
//! The driver assumes exclusive ownership of the bus. Wrap it in a mutex if it has to be
//! shared between threads or tasks.
//!
//! Logging goes through `defmt` when the `defmt` feature is on. The `rtt` feature also links
//! `defmt-rtt` and `panic-probe`, which is what a firmware image usually wants.

#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "rtt")]
use defmt_rtt as _; // global logger
#[cfg(feature = "rtt")]
use panic_probe as _;

/// Main module that holds the SPI driver and the register transport.
/// Also holds the register map, configuration constants and the error type.
pub mod l3gd20;
