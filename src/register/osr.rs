//! ### OSR - Oversampling settings (`0x1C`, 1 byte, R/W)
//!
//! Controls the oversampling of pressure (bits 0-2) and temperature (bits 3-5) measurements.
//!
//! ### Default values
//! 0x02 (Pressure x4, Temperature x1)

use crate::register::{Field, Reg, UnexpectedValue};

/// Marker type for the pressure half (bits 0-2) of the OSR (0x1C) register
pub struct PressureOversampling;
impl Reg for PressureOversampling { const ADDR: u8 = 0x1C; }

impl Field for PressureOversampling {
    const SHIFT: u8 = 0;
    const MASK: u8 = 0b111;
    type Value = Oversampling;
}

/// Marker type for the temperature half (bits 3-5) of the OSR (0x1C) register
pub struct TemperatureOversampling;
impl Reg for TemperatureOversampling { const ADDR: u8 = 0x1C; }

impl Field for TemperatureOversampling {
    const SHIFT: u8 = 3;
    const MASK: u8 = 0b111;
    type Value = Oversampling;
}

/// Both oversampling settings as stored in the OSR (0x1C) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OsrCfg {
    pub osr_p: Oversampling,
    pub osr_t: Oversampling,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Oversampling {
    X1,
    X2,
    X4,
    X8,
    X16,
    X32,
}

impl TryFrom<u8> for Oversampling {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(Oversampling::X1),
            0b001 => Ok(Oversampling::X2),
            0b010 => Ok(Oversampling::X4),
            0b011 => Ok(Oversampling::X8),
            0b100 => Ok(Oversampling::X16),
            0b101 => Ok(Oversampling::X32),
            other => Err(UnexpectedValue(other))
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(value: Oversampling) -> u8 {
        match value {
            Oversampling::X1 => 0b000,
            Oversampling::X2 => 0b001,
            Oversampling::X4 => 0b010,
            Oversampling::X8 => 0b011,
            Oversampling::X16 => 0b100,
            Oversampling::X32 => 0b101,
        }
    }
}
