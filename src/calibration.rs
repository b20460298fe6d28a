use log::{debug, warn};

use crate::bus::Transport;
use crate::error::{BusError, CalibrationError};
use crate::register::calibration::*;
use crate::register::RegisterAccess;

/// Floating point calibration coefficients derived from the NVM cells.
///
/// Every coefficient is the raw cell divided by a fixed power of two (section 8.4 of the datasheet).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibrationCoefficients {
    pub par_t1: f32,
    pub par_t2: f32,
    pub par_t3: f32,
    pub par_p1: f32,
    pub par_p2: f32,
    pub par_p3: f32,
    pub par_p4: f32,
    pub par_p5: f32,
    pub par_p6: f32,
    pub par_p7: f32,
    pub par_p8: f32,
    pub par_p9: f32,
    pub par_p10: f32,
    pub par_p11: f32,
}

impl CalibrationCoefficients {
    /// Reads all calibration cells from NVM and derives the coefficients.
    pub fn load<T: Transport>(regs: &mut RegisterAccess<T>) -> Result<Self, CalibrationError<T::Error>> {
        let cells = RawCalibrationCells::read(regs)?;
        debug!("calibration cells: {:?}", cells);

        Ok(Self::from_cells(&cells))
    }

    pub fn from_cells(cells: &RawCalibrationCells) -> Self {
        Self {
            par_t1: cells.nvm_par_t1 as f32 / pow2f(-8),
            par_t2: cells.nvm_par_t2 as f32 / pow2f(30),
            par_t3: cells.nvm_par_t3 as f32 / pow2f(48),
            par_p1: (cells.nvm_par_p1 as f32 - pow2f(14)) / pow2f(20),
            par_p2: (cells.nvm_par_p2 as f32 - pow2f(14)) / pow2f(29),
            par_p3: cells.nvm_par_p3 as f32 / pow2f(32),
            par_p4: cells.nvm_par_p4 as f32 / pow2f(37),
            par_p5: cells.nvm_par_p5 as f32 / pow2f(-3),
            par_p6: cells.nvm_par_p6 as f32 / pow2f(6),
            par_p7: cells.nvm_par_p7 as f32 / pow2f(8),
            par_p8: cells.nvm_par_p8 as f32 / pow2f(15),
            par_p9: cells.nvm_par_p9 as f32 / pow2f(48),
            // p10 shares p9's divisor
            par_p10: cells.nvm_par_p10 as f32 / pow2f(48),
            par_p11: cells.nvm_par_p11 as f32 / pow2f(65),
        }
    }
}

impl RawCalibrationCells {
    /// Reads the 14 cells one by one at their own addresses.
    ///
    /// Every cell is attempted even after a failure, and the result is
    /// [`CalibrationError::Incomplete`] unless all of them were read.
    pub fn read<T: Transport>(regs: &mut RegisterAccess<T>) -> Result<Self, CalibrationError<T::Error>> {
        let mut tally = Tally { loaded: 0, last_error: None };

        let cells = RawCalibrationCells {
            nvm_par_t1: tally.take("T1", regs.read_u16(NVM_PAR_T1)),
            nvm_par_t2: tally.take("T2", regs.read_u16(NVM_PAR_T2)),
            nvm_par_t3: tally.take("T3", regs.read_i8(NVM_PAR_T3)),
            nvm_par_p1: tally.take("P1", regs.read_i16(NVM_PAR_P1)),
            nvm_par_p2: tally.take("P2", regs.read_i16(NVM_PAR_P2)),
            nvm_par_p3: tally.take("P3", regs.read_i8(NVM_PAR_P3)),
            nvm_par_p4: tally.take("P4", regs.read_i8(NVM_PAR_P4)),
            nvm_par_p5: tally.take("P5", regs.read_u16(NVM_PAR_P5)),
            nvm_par_p6: tally.take("P6", regs.read_u16(NVM_PAR_P6)),
            nvm_par_p7: tally.take("P7", regs.read_i8(NVM_PAR_P7)),
            nvm_par_p8: tally.take("P8", regs.read_i8(NVM_PAR_P8)),
            nvm_par_p9: tally.take("P9", regs.read_i16(NVM_PAR_P9)),
            nvm_par_p10: tally.take("P10", regs.read_i8(NVM_PAR_P10)),
            nvm_par_p11: tally.take("P11", regs.read_i8(NVM_PAR_P11)),
        };

        match tally.last_error {
            None => Ok(cells),
            Some(last_error) => Err(CalibrationError::Incomplete { loaded: tally.loaded, last_error }),
        }
    }
}

struct Tally<E> {
    loaded: usize,
    last_error: Option<BusError<E>>,
}

impl<E> Tally<E> {
    fn take<V: Default>(&mut self, cell: &str, result: Result<V, BusError<E>>) -> V {
        match result {
            Ok(v) => {
                self.loaded += 1;
                v
            }
            Err(e) => {
                warn!("calibration cell NVM_PAR_{} could not be read", cell);
                self.last_error = Some(e);
                V::default()
            }
        }
    }
}

/// Exact `2^e` built directly from the f32 exponent bits.
///
/// Exponents below the normal range yield subnormals down to 2^-149, then 0. Above 127 the result
/// is infinity.
const fn pow2f(e: i32) -> f32 {
    if e > 127 {
        f32::INFINITY
    } else if e >= -126 {
        f32::from_bits(((e + 127) as u32) << 23)
    } else if e >= -149 {
        f32::from_bits(1 << (e + 149))
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::register::Readable;
    use crate::testing::FakeTransport;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    pub(crate) const NVM_BLOCK: [u8; 21] = [
        0x12, 0x34, 0x56, 0x78, 0x01, 0x0A, 0x01, 0xAB, 0xCD, 0x42, 0xFF, 0xEF, 0xBE, 0xAD, 0x0B, 0x02, 0xE7, 0xFE,
        0xFE, 0x80, 0x40,
    ];

    fn seeded() -> RegisterAccess<FakeTransport> {
        let mut bus = FakeTransport::new();
        bus.seed(NVM_PAR_T1, &NVM_BLOCK);
        RegisterAccess::new(bus, 0x77)
    }

    #[test]
    fn pow2f_exponents() {
        assert_eq!(256.0, pow2f(8));
        assert_eq!(0.00390625, pow2f(-8));
        assert_eq!(0.125, pow2f(-3));
        assert_eq!(36893488147419103232.0, pow2f(65));
        assert_eq!(f32::from_bits(1), pow2f(-149));
        assert_eq!(0.0, pow2f(-150));
        assert_eq!(f32::INFINITY, pow2f(128));
    }

    #[test]
    fn per_cell_reads_match_block_decode() {
        let mut regs = seeded();

        let cells = RawCalibrationCells::read(&mut regs).unwrap();

        assert_eq!(Calibration::decode(&NVM_BLOCK), cells);
    }

    #[test]
    fn test_load_calibration() {
        let mut regs = seeded();

        let cb = CalibrationCoefficients::load(&mut regs).unwrap();

        assert_eq!(3412480.0, cb.par_t1);
        assert_eq!(30806.0 / 1073741824.0, cb.par_t2);
        assert_eq!(1.0 / 281474976710656.0, cb.par_t3);
        assert_eq!((266.0 - 16384.0) / 1048576.0, cb.par_p1);
        assert_eq!((-12885.0 - 16384.0) / 536870912.0, cb.par_p2);
        assert_eq!(66.0 / 4294967296.0, cb.par_p3);
        assert_eq!(-1.0 / 137438953472.0, cb.par_p4);
        assert_eq!(391032.0, cb.par_p5);
        assert_eq!(46.703125, cb.par_p6);
        assert_eq!(0.0078125, cb.par_p7);
        assert_eq!(-25.0 / 32768.0, cb.par_p8);
        assert_eq!(-258.0 / 281474976710656.0, cb.par_p9);
        assert_eq!(-128.0 / 281474976710656.0, cb.par_p10);
        assert_eq!(64.0 / 36893488147419103232.0, cb.par_p11);
    }

    #[test]
    fn derivation_is_deterministic() {
        let cells = Calibration::decode(&NVM_BLOCK);

        let a = CalibrationCoefficients::from_cells(&cells);
        let b = CalibrationCoefficients::from_cells(&cells);

        assert_eq!(a.par_t1.to_bits(), b.par_t1.to_bits());
        assert_eq!(a.par_p11.to_bits(), b.par_p11.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn one_missing_cell_fails_the_whole_load() {
        let mut bus = FakeTransport::new();
        bus.seed(NVM_PAR_T1, &NVM_BLOCK);
        bus.limit_read(NVM_PAR_P5, 1);
        let mut regs = RegisterAccess::new(bus, 0x77);

        assert_eq!(
            Err(CalibrationError::Incomplete {
                loaded: 13,
                last_error: BusError::ShortRead { requested: 2, available: 1 },
            }),
            CalibrationCoefficients::load(&mut regs)
        );
    }

    #[test]
    fn every_cell_is_attempted() {
        let mut bus = FakeTransport::new();
        bus.seed(NVM_PAR_T1, &NVM_BLOCK);
        bus.fail_read(NVM_PAR_T1, ErrorKind::Bus);
        bus.fail_read(NVM_PAR_P11, ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown));
        let mut regs = RegisterAccess::new(bus, 0x77);

        assert_eq!(
            Err(CalibrationError::Incomplete { loaded: 12, last_error: BusError::NoAcknowledge }),
            RawCalibrationCells::read(&mut regs)
        );
    }
}
