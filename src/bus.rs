use embedded_hal::i2c::SevenBitAddress;

/// The two-wire transport the driver talks through.
///
/// Implemented for any blocking [`embedded_hal::i2c::I2c`] through the [`I2c`] adapter. Implement it
/// directly when the host's bus driver can report partial reads.
pub trait Transport {
    type Error: embedded_hal::i2c::Error;

    /// Writes `bytes` to the device at `address` in a single transaction.
    fn write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Writes `bytes` to the device, then requests `buffer.len()` bytes back.
    ///
    /// Returns the number of bytes the device actually delivered, which may be less than requested.
    fn write_read(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error>;
}

/// [`Transport`] over a blocking `embedded-hal` I2C bus.
pub struct I2c<I2cType> {
    i2c: I2cType,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2cType) -> Self {
        Self { i2c }
    }

    /// Gives back the wrapped bus.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Transport for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = <I2cType as embedded_hal::i2c::ErrorType>::Error;

    fn write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error> {
        // embedded-hal either fills the whole buffer or fails
        self.i2c.write_read(address, bytes, buffer)?;

        Ok(buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x77;

    #[test]
    fn write_read_reports_full_buffer() {
        let expectations = [I2cTransaction::write_read(ADDR, vec![0x04], vec![0xAA, 0xBB, 0xCC])];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone());
        let mut buffer = [0u8; 3];
        let available = bus.write_read(ADDR, &[0x04], &mut buffer).unwrap();

        assert_eq!(3, available);
        assert_eq!([0xAA, 0xBB, 0xCC], buffer);
        i2c.done();
    }

    #[test]
    fn write_passes_bytes_through() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x1B, 0x33])];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone());
        bus.write(ADDR, &[0x1B, 0x33]).unwrap();

        i2c.done();
    }

    #[test]
    fn driver_errors_are_returned() {
        let expectations = [I2cTransaction::write_read(ADDR, vec![0x07], vec![0, 0, 0])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone());
        let mut buffer = [0u8; 3];
        let result = bus.write_read(ADDR, &[0x07], &mut buffer);

        assert_eq!(Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)), result);
        i2c.done();
    }
}
