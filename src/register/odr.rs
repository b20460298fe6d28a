//! ### ODR - Output data rate (`0x1D`, 1 byte, R/W)
//!
//! Selects the output data rate as a subdivision of the 200 Hz base rate (bits 0-4). Only
//! meaningful in normal mode.
//!
//! ### Default values
//! 0x00 (200 Hz)

use crate::register::{Field, Reg, UnexpectedValue};

/// Marker type for the `odr_sel` field (bits 0-4) of the ODR (0x1D) register
pub struct Odr;
impl Reg for Odr { const ADDR: u8 = 0x1D; }

impl Field for Odr {
    const SHIFT: u8 = 0;
    const MASK: u8 = 0b1_1111;
    type Value = OutputDataRate;
}

/// The 18 output data rates of the ODR (0x1D) register, from 200 Hz down to 200/2^17 Hz.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OutputDataRate {
    /// 200Hz, sampling period 5ms.
    R200Hz      = 0x00,
    R100Hz      = 0x01,
    R50Hz       = 0x02,
    R25Hz       = 0x03,
    /// 25/2Hz
    R12p5Hz     = 0x04,
    /// 25/4Hz
    R6p25Hz     = 0x05,
    /// 25/8Hz
    R3p1Hz      = 0x06,
    /// 25/16Hz
    R1p5Hz      = 0x07,
    /// 25/32Hz
    R0p78Hz     = 0x08,
    /// 25/64Hz
    R0p39Hz     = 0x09,
    /// 25/128Hz
    R0p2Hz      = 0x0A,
    /// 25/256Hz
    R0p1Hz      = 0x0B,
    /// 25/512Hz
    R0p05Hz     = 0x0C,
    /// 25/1024Hz
    R0p02Hz     = 0x0D,
    /// 25/2048Hz
    R0p01Hz     = 0x0E,
    /// 25/4096Hz
    R0p006Hz    = 0x0F,
    /// 25/8192Hz
    R0p003Hz    = 0x10,
    /// 25/16384Hz, sampling period 655.36s.
    R0p0015Hz   = 0x11,
}

impl OutputDataRate {
    /// The exact output data rate in Hz (200 Hz divided by 2^prescaler).
    pub fn frequency_hz(self) -> f32 {
        200.0 / (1u32 << (self as u8)) as f32
    }

    // indexed by prescaler
    const ALL: [OutputDataRate; 18] = [
        Self::R200Hz, Self::R100Hz, Self::R50Hz, Self::R25Hz, Self::R12p5Hz, Self::R6p25Hz,
        Self::R3p1Hz, Self::R1p5Hz, Self::R0p78Hz, Self::R0p39Hz, Self::R0p2Hz, Self::R0p1Hz,
        Self::R0p05Hz, Self::R0p02Hz, Self::R0p01Hz, Self::R0p006Hz, Self::R0p003Hz, Self::R0p0015Hz,
    ];
}

impl TryFrom<u8> for OutputDataRate {
    type Error = UnexpectedValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(UnexpectedValue(value))
    }
}

impl From<OutputDataRate> for u8 {
    fn from(value: OutputDataRate) -> u8 {
        value as u8
    }
}
