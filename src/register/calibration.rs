//! ### NVM_PAR_T1 .. NVM_PAR_P11 - Factory calibration (`0x31` - `0x45`, 21 bytes, R)
//!
//! Fourteen trimming cells written at production time. Multi-byte cells are little-endian.

use crate::register::{Readable, Reg};

pub const NVM_PAR_T1: u8 = 0x31;
pub const NVM_PAR_T2: u8 = 0x33;
pub const NVM_PAR_T3: u8 = 0x35;
pub const NVM_PAR_P1: u8 = 0x36;
pub const NVM_PAR_P2: u8 = 0x38;
pub const NVM_PAR_P3: u8 = 0x3A;
pub const NVM_PAR_P4: u8 = 0x3B;
pub const NVM_PAR_P5: u8 = 0x3C;
pub const NVM_PAR_P6: u8 = 0x3E;
pub const NVM_PAR_P7: u8 = 0x40;
pub const NVM_PAR_P8: u8 = 0x41;
pub const NVM_PAR_P9: u8 = 0x42;
pub const NVM_PAR_P10: u8 = 0x44;
pub const NVM_PAR_P11: u8 = 0x45;

/// Number of calibration cells.
pub const CELL_COUNT: usize = 14;

/// Marker struct for the whole calibration block, read in one burst starting at NVM_PAR_T1 (0x31).
///
/// - **Length:** 21 bytes
/// - **Access:** Read-only
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = NVM_PAR_T1; }

/// The calibration cells exactly as stored in NVM.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawCalibrationCells {
    pub nvm_par_t1: u16,
    pub nvm_par_t2: u16,
    pub nvm_par_t3: i8,
    pub nvm_par_p1: i16,
    pub nvm_par_p2: i16,
    pub nvm_par_p3: i8,
    pub nvm_par_p4: i8,
    pub nvm_par_p5: u16,
    pub nvm_par_p6: u16,
    pub nvm_par_p7: i8,
    pub nvm_par_p8: i8,
    pub nvm_par_p9: i16,
    pub nvm_par_p10: i8,
    pub nvm_par_p11: i8,
}

impl Readable for Calibration {
    type Out = RawCalibrationCells;

    const N: usize = 21;

    fn decode(b: &[u8]) -> Self::Out {
        // offsets are relative to NVM_PAR_T1
        RawCalibrationCells {
            nvm_par_t1: u16::from_le_bytes([b[0], b[1]]),
            nvm_par_t2: u16::from_le_bytes([b[2], b[3]]),
            nvm_par_t3: i8::from_le_bytes([b[4]]),
            nvm_par_p1: i16::from_le_bytes([b[5], b[6]]),
            nvm_par_p2: i16::from_le_bytes([b[7], b[8]]),
            nvm_par_p3: i8::from_le_bytes([b[9]]),
            nvm_par_p4: i8::from_le_bytes([b[10]]),
            nvm_par_p5: u16::from_le_bytes([b[11], b[12]]),
            nvm_par_p6: u16::from_le_bytes([b[13], b[14]]),
            nvm_par_p7: i8::from_le_bytes([b[15]]),
            nvm_par_p8: i8::from_le_bytes([b[16]]),
            nvm_par_p9: i16::from_le_bytes([b[17], b[18]]),
            nvm_par_p10: i8::from_le_bytes([b[19]]),
            nvm_par_p11: i8::from_le_bytes([b[20]]),
        }
    }
}
