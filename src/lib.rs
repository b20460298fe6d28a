//! Blocking driver for the Bosch BMP390 pressure and temperature sensor.
//!
//! The driver talks to the device over I2C through [`embedded_hal::i2c::I2c`], loads the factory
//! calibration from NVM on construction and turns raw ADC counts into °C and Pa.
//!
//! ```rust,no_run
//! # use embedded_hal::i2c::I2c;
//! use bmp390_blocking::{Bmp390, Bmp390Result, SdoPinState};
//! use bmp390_blocking::config::{Configuration, Preset};
//!
//! # fn demo<I: I2c>(i2c: I) -> Bmp390Result<(), I::Error> {
//! let mut device = Bmp390::new_i2c(i2c, SdoPinState::High)?;
//! device.apply_configuration(&Configuration::from_preset(Preset::WeatherMonitoring))?;
//!
//! let measurement = device.measure()?;
//! log::info!("{:?}", measurement);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

mod bmp390;
pub mod bus;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod error;
pub mod measurement;
pub mod register;

#[cfg(test)]
mod testing;

pub use bmp390::{Bmp390, Bmp390I2c, Bmp390Result, SdoPinState, DEFAULT_ADDRESS};
pub use error::Bmp390Error;
pub use measurement::Measurement;
