//! Register catalog and the read-modify-write primitives built on top of a [`Transport`].
//!
//! Each submodule describes one register (or register block) of the BMP390: its address, its width
//! and, where it holds configurable settings, typed enumerations for its fields.

pub mod calibration;
pub mod config;
pub mod data;
pub mod odr;
pub mod osr;
pub mod pwr_ctrl;

use embedded_hal::i2c::SevenBitAddress;
use log::{debug, trace};

use crate::bus::Transport;
use crate::error::{BusError, ConfigurationError};

/// Longest register block the driver reads in one transaction (the NVM calibration block).
pub const MAX_REG_BYTES: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedValue(pub u8);

pub trait Reg { const ADDR: u8; }

/// A register (or auto-incrementing block of registers) that can be read and decoded in one go.
pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

/// A configurable bit field inside a single register byte.
///
/// `MASK` is the unshifted width mask of the field; the field occupies `MASK << SHIFT`.
pub trait Field: Reg {
    const SHIFT: u8;
    const MASK: u8;
    type Value: TryFrom<u8, Error = UnexpectedValue> + Into<u8>;
}

/// Register-level access to one device on a [`Transport`].
pub struct RegisterAccess<T> {
    transport: T,
    address: SevenBitAddress,
}

type BusResult<T, E> = Result<T, BusError<E>>;

impl<T> RegisterAccess<T>
where
    T: Transport,
{
    pub fn new(transport: T, address: SevenBitAddress) -> Self {
        Self { transport, address }
    }

    /// The 7-bit bus address of the device.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Gives back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Reads `buffer.len()` consecutive bytes starting at `register`.
    ///
    /// Fails with [`BusError::ShortRead`] if the device delivers fewer bytes than requested.
    pub fn read_bytes(&mut self, register: u8, buffer: &mut [u8]) -> BusResult<(), T::Error> {
        let available = self
            .transport
            .write_read(self.address, &[register], buffer)
            .map_err(BusError::classify)?;

        if available < buffer.len() {
            trace!("short read at 0x{:02x}: {} of {} bytes", register, available, buffer.len());
            return Err(BusError::ShortRead { requested: buffer.len(), available });
        }

        trace!("read 0x{:02x}: {:02x?}", register, buffer);
        Ok(())
    }

    /// Reads a 1, 2, 3 or 4 byte wide value at `register`. The first byte received is the least
    /// significant one.
    pub fn read_fixed_width(&mut self, register: u8, width: usize) -> BusResult<u32, T::Error> {
        if !(1..=4).contains(&width) {
            return Err(BusError::InvalidWidth(width));
        }

        let mut buf = [0u8; 4];
        self.read_bytes(register, &mut buf[..width])?;

        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u8(&mut self, register: u8) -> BusResult<u8, T::Error> {
        Ok(self.read_fixed_width(register, 1)? as u8)
    }

    pub fn read_i8(&mut self, register: u8) -> BusResult<i8, T::Error> {
        Ok(self.read_u8(register)? as i8)
    }

    pub fn read_u16(&mut self, register: u8) -> BusResult<u16, T::Error> {
        Ok(self.read_fixed_width(register, 2)? as u16)
    }

    pub fn read_i16(&mut self, register: u8) -> BusResult<i16, T::Error> {
        Ok(self.read_u16(register)? as i16)
    }

    pub fn read_u24(&mut self, register: u8) -> BusResult<u32, T::Error> {
        self.read_fixed_width(register, 3)
    }

    pub fn read_u32(&mut self, register: u8) -> BusResult<u32, T::Error> {
        self.read_fixed_width(register, 4)
    }

    /// Reads and decodes a register using a **typed marker**.
    pub fn read<R: Readable>(&mut self) -> BusResult<R::Out, T::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        self.read_bytes(R::ADDR, &mut buf[..R::N])?;

        Ok(R::decode(&buf[..R::N]))
    }

    /// Writes a single byte to `register`.
    pub fn write_byte(&mut self, register: u8, value: u8) -> BusResult<(), T::Error> {
        trace!("write 0x{:02x} <- 0x{:02x}", register, value);
        self.transport
            .write(self.address, &[register, value])
            .map_err(BusError::classify)
    }

    /// Sets bit `bit` of `register` through a read-modify-write.
    ///
    /// This can only ever set a bit. When `on` is `false` the register is read but nothing is
    /// written back, so the bit keeps whatever state it had. Use [`clear_bit`](Self::clear_bit) to
    /// clear it. No write is performed if the read fails, and nothing is accessed at all when `bit` is
    /// past bit 7.
    pub fn set_bit(&mut self, register: u8, bit: u8, on: bool) -> BusResult<(), T::Error> {
        check_bit(bit)?;
        let current = self.read_u8(register)?;

        if !on {
            debug!("set_bit(0x{:02x}, {}, false) leaves the register untouched", register, bit);
            return Ok(());
        }

        self.write_byte(register, current | (1 << bit))
    }

    /// Clears bit `bit` of `register` through a read-modify-write.
    pub fn clear_bit(&mut self, register: u8, bit: u8) -> BusResult<(), T::Error> {
        check_bit(bit)?;
        let current = self.read_u8(register)?;

        self.write_byte(register, current & !(1 << bit))
    }

    /// Replaces the field `mask << shift` of `register` with `raw`, leaving every other bit as it was.
    pub fn write_field(&mut self, register: u8, shift: u8, mask: u8, raw: u8) -> BusResult<(), T::Error> {
        check_bit(shift)?;
        let current = self.read_u8(register)?;
        let value = (current & !(mask << shift)) | ((raw & mask) << shift);

        self.write_byte(register, value)
    }

    /// Returns the unshifted value of the field `mask << shift` of `register`.
    pub fn read_field(&mut self, register: u8, shift: u8, mask: u8) -> BusResult<u8, T::Error> {
        check_bit(shift)?;
        Ok((self.read_u8(register)? >> shift) & mask)
    }

    /// Writes a typed field value, see [`write_field`](Self::write_field).
    pub fn write_typed<F: Field>(&mut self, value: F::Value) -> BusResult<(), T::Error> {
        self.write_field(F::ADDR, F::SHIFT, F::MASK, value.into())
    }

    /// Reads a typed field value.
    ///
    /// Fails with [`ConfigurationError::InvalidField`] if the register holds a bit pattern outside the
    /// field's enumeration.
    pub fn read_typed<F: Field>(&mut self) -> Result<F::Value, ConfigurationError<T::Error>> {
        let raw = self.read_field(F::ADDR, F::SHIFT, F::MASK)?;

        <F::Value as TryFrom<u8>>::try_from(raw)
            .map_err(|e| ConfigurationError::InvalidField(InvalidRegisterField::new(F::ADDR, e.0, F::SHIFT)))
    }
}

fn check_bit<E>(bit: u8) -> BusResult<(), E> {
    if bit > 7 {
        return Err(BusError::InvalidBit(bit));
    }

    Ok(())
}
