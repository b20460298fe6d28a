use crate::register::{Readable, Reg};

/// Marker struct for the DATA_3 - DATA_5 (0x07 - 0x09) registers holding the raw 24-bit temperature.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
///
/// This is the uncompensated ADC count. [`Bmp390::read_temperature()`](crate::Bmp390::read_temperature)
/// returns the compensated value.
pub struct RawTemperature;
impl Reg for RawTemperature { const ADDR: u8 = 0x07; }

impl Readable for RawTemperature {
    type Out = u32;

    const N: usize = 3;

    fn decode(b: &[u8]) -> Self::Out {
        u32::from_le_bytes([b[0], b[1], b[2], 0])
    }
}

/// Marker struct for the DATA_0 - DATA_2 (0x04 - 0x06) registers holding the raw 24-bit pressure.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct RawPressure;
impl Reg for RawPressure { const ADDR: u8 = 0x04; }

impl Readable for RawPressure {
    type Out = u32;

    const N: usize = 3;

    fn decode(b: &[u8]) -> Self::Out {
        u32::from_le_bytes([b[0], b[1], b[2], 0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_decode() {
        assert_eq!(0xCCBBAA, RawPressure::decode(&[0xAA, 0xBB, 0xCC]));
        assert_eq!(0xFFEEDD, RawTemperature::decode(&[0xDD, 0xEE, 0xFF]));
    }
}
