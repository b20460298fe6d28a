//! Errors that can occur when using the BMP390 device.
//!
//! Every layer of the driver has its own error type, all of them generic over the error type of the
//! underlying [`Transport`](crate::bus::Transport). [`Bmp390Error`] wraps all of them and is what the
//! constructors return.

use core::fmt::{Display, Formatter};

use crate::register::calibration::CELL_COUNT;
use crate::register::InvalidRegisterField;

/// Transport-level failure of a single register transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError<E> {
    /// The device delivered fewer bytes than were requested.
    ShortRead { requested: usize, available: usize },

    /// The device did not acknowledge its address or a data byte.
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NoAcknowledge,

    /// A fixed-width read was requested with a width other than 1, 2, 3 or 4 bytes.
    InvalidWidth(usize),

    /// A bit position or field shift outside 0..=7 was requested for a one byte register.
    InvalidBit(u8),

    /// Any other error reported by the I2C driver.
    Transport(E),
}

impl<E: embedded_hal::i2c::Error> BusError<E> {
    /// Sorts a driver error into [`BusError::NoAcknowledge`] or [`BusError::Transport`].
    pub(crate) fn classify(error: E) -> Self {
        match error.kind() {
            embedded_hal::i2c::ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            _ => BusError::Transport(error),
        }
    }
}

/// Loading the factory calibration from NVM failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError<E> {
    /// Only `loaded` of the 14 calibration cells could be read. No partial calibration is kept.
    Incomplete { loaded: usize, last_error: BusError<E> },
}

/// Reading a raw temperature or pressure sample failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementError<E> {
    Bus(BusError<E>),
}

/// Reading or writing a configuration field failed.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigurationError<E> {
    /// The register read needed for the read-modify-write failed, or the write itself failed.
    Bus(BusError<E>),

    /// The register holds a bit pattern that does not map to any known setting.
    ///
    /// This should not happen in normal circumstances; it could indicate a faulty chip or interference.
    InvalidField(InvalidRegisterField),
}

/// This represents all possible errors that can occur when using the BMP390 device.
#[derive(Debug, PartialEq, Eq)]
pub enum Bmp390Error<E> {
    Bus(BusError<E>),
    Calibration(CalibrationError<E>),
    Measurement(MeasurementError<E>),
    Configuration(ConfigurationError<E>),
}

impl<E> From<BusError<E>> for MeasurementError<E> {
    fn from(e: BusError<E>) -> Self {
        MeasurementError::Bus(e)
    }
}

impl<E> From<BusError<E>> for ConfigurationError<E> {
    fn from(e: BusError<E>) -> Self {
        ConfigurationError::Bus(e)
    }
}

impl<E> From<InvalidRegisterField> for ConfigurationError<E> {
    fn from(e: InvalidRegisterField) -> Self {
        ConfigurationError::InvalidField(e)
    }
}

impl<E> From<BusError<E>> for Bmp390Error<E> {
    fn from(e: BusError<E>) -> Self {
        Bmp390Error::Bus(e)
    }
}

impl<E> From<CalibrationError<E>> for Bmp390Error<E> {
    fn from(e: CalibrationError<E>) -> Self {
        Bmp390Error::Calibration(e)
    }
}

impl<E> From<MeasurementError<E>> for Bmp390Error<E> {
    fn from(e: MeasurementError<E>) -> Self {
        Bmp390Error::Measurement(e)
    }
}

impl<E> From<ConfigurationError<E>> for Bmp390Error<E> {
    fn from(e: ConfigurationError<E>) -> Self {
        Bmp390Error::Configuration(e)
    }
}

impl<E: core::fmt::Debug> Display for BusError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::ShortRead { requested, available } => {
                write!(f, "short read: requested {} bytes, {} available", requested, available)
            }
            BusError::NoAcknowledge => write!(f, "device did not acknowledge"),
            BusError::InvalidWidth(width) => write!(f, "unsupported register width {}", width),
            BusError::InvalidBit(bit) => write!(f, "bit {} is outside a one byte register", bit),
            BusError::Transport(e) => write!(f, "transport error: {:?}", e),
        }
    }
}

impl<E: core::fmt::Debug> Display for CalibrationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CalibrationError::Incomplete { loaded, last_error } => {
                write!(f, "calibration incomplete, {} of {} cells read (last error: {})", loaded, CELL_COUNT, last_error)
            }
        }
    }
}

impl<E: core::fmt::Debug> Display for MeasurementError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            MeasurementError::Bus(e) => write!(f, "raw sample read failed: {}", e),
        }
    }
}

impl<E: core::fmt::Debug> Display for ConfigurationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigurationError::Bus(e) => write!(f, "configuration register access failed: {}", e),
            ConfigurationError::InvalidField(field) => write!(
                f,
                "register 0x{:02x} holds invalid value 0b{:b} at bit {}",
                field.register, field.value, field.bit_offset
            ),
        }
    }
}

impl<E: core::fmt::Debug> Display for Bmp390Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Bmp390Error::Bus(e) => Display::fmt(e, f),
            Bmp390Error::Calibration(e) => Display::fmt(e, f),
            Bmp390Error::Measurement(e) => Display::fmt(e, f),
            Bmp390Error::Configuration(e) => Display::fmt(e, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    #[test]
    fn classify_nack() {
        let e = BusError::classify(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        assert_eq!(BusError::NoAcknowledge, e);

        let e = BusError::classify(ErrorKind::ArbitrationLoss);
        assert_eq!(BusError::Transport(ErrorKind::ArbitrationLoss), e);
    }

    #[test]
    fn conversions_into_umbrella() {
        let e: Bmp390Error<ErrorKind> = MeasurementError::Bus(BusError::NoAcknowledge).into();
        assert_eq!(Bmp390Error::Measurement(MeasurementError::Bus(BusError::NoAcknowledge)), e);

        let e: ConfigurationError<ErrorKind> = BusError::ShortRead { requested: 1, available: 0 }.into();
        assert_eq!(ConfigurationError::Bus(BusError::ShortRead { requested: 1, available: 0 }), e);
    }
}
