use crate::register::{Readable, Reg};

/// Marker struct for the PWR_CTRL (0x1B) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
///
/// The bits are individually driven through [`RegisterAccess::set_bit`](crate::register::RegisterAccess::set_bit)
/// using the bit positions below.
pub struct PwrCtrl;
impl Reg for PwrCtrl { const ADDR: u8 = 0x1B; }

/// Pressure measurement enable. Set after every raw pressure read to start the next conversion.
pub const PRESS_EN: u8 = 0;
/// Temperature measurement enable. Set after every raw temperature read to start the next conversion.
pub const TEMP_EN: u8 = 1;
/// Sensor enable bits, both set during initialization.
pub const SENSOR_EN: [u8; 2] = [4, 5];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PwrCtrlFlags {
    pub press_en: bool,
    pub temp_en: bool,
    pub sensor_en: bool,
}

impl Readable for PwrCtrl {
    type Out = PwrCtrlFlags;

    fn decode(b: &[u8]) -> Self::Out {
        let v = b[0];
        PwrCtrlFlags {
            press_en:   v & (1 << PRESS_EN) != 0,
            temp_en:    v & (1 << TEMP_EN) != 0,
            sensor_en:  v & 0b0011_0000 == 0b0011_0000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwr_ctrl_decode() {
        let reg = PwrCtrl::decode(&[0b0000_0001]);
        assert!(reg.press_en);
        assert!(!reg.temp_en);
        assert!(!reg.sensor_en);

        let reg = PwrCtrl::decode(&[0b0001_0010]);
        assert!(reg.temp_en);
        assert!(!reg.sensor_en);

        let reg = PwrCtrl::decode(&[0b0011_0011]);
        assert!(reg.press_en);
        assert!(reg.temp_en);
        assert!(reg.sensor_en);
    }
}
