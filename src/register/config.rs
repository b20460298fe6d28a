//! ### CONFIG - IIR filter configuration (`0x1F`, 1 byte, R/W)
//!
//! Controls the IIR filter coefficient (bits 1-3).
//!
//! ### Default values
//! 0x00 (Bypass mode / No filter)

use crate::register::{Field, Reg, UnexpectedValue};

/// Marker type for the `iir_filter` field (bits 1-3) of the CONFIG (0x1F) register
pub struct IirFilter;
impl Reg for IirFilter { const ADDR: u8 = 0x1F; }

impl Field for IirFilter {
    const SHIFT: u8 = 1;
    const MASK: u8 = 0b111;
    type Value = IIRFilterCoefficient;
}

/// This enum holds all configurable IIR filter coefficients.
///
/// Read more about the IIR filter in the datasheet section 3.4.3
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum IIRFilterCoefficient {
    /// Filter coefficient is 0 => bypass-mode
    Coef0,
    Coef1,
    Coef3,
    Coef7,
    Coef15,
    Coef31,
    Coef63,
    /// Highest setting, field value `0b111`
    Coef127,
}

impl TryFrom<u8> for IIRFilterCoefficient {
    type Error = UnexpectedValue;

    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(IIRFilterCoefficient::Coef0),
            0b001 => Ok(IIRFilterCoefficient::Coef1),
            0b010 => Ok(IIRFilterCoefficient::Coef3),
            0b011 => Ok(IIRFilterCoefficient::Coef7),
            0b100 => Ok(IIRFilterCoefficient::Coef15),
            0b101 => Ok(IIRFilterCoefficient::Coef31),
            0b110 => Ok(IIRFilterCoefficient::Coef63),
            0b111 => Ok(IIRFilterCoefficient::Coef127),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<IIRFilterCoefficient> for u8 {
    fn from(value: IIRFilterCoefficient) -> u8 {
        match value {
            IIRFilterCoefficient::Coef0 =>      0b000,
            IIRFilterCoefficient::Coef1 =>      0b001,
            IIRFilterCoefficient::Coef3 =>      0b010,
            IIRFilterCoefficient::Coef7 =>      0b011,
            IIRFilterCoefficient::Coef15 =>     0b100,
            IIRFilterCoefficient::Coef31 =>     0b101,
            IIRFilterCoefficient::Coef63 =>     0b110,
            IIRFilterCoefficient::Coef127 =>    0b111,
        }
    }
}
