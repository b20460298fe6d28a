use embedded_hal::i2c::{ErrorKind, SevenBitAddress};
use heapless::{LinearMap, Vec};

use crate::bus::Transport;

/// Simulated BMP390 register file.
///
/// Reads auto-increment through `regs` like the real device. Single registers can be made to deliver
/// fewer bytes than requested, or to fail outright, to exercise the error paths.
pub struct FakeTransport {
    regs: [u8; 256],
    writes: Vec<(u8, u8), 64>,
    short_reads: LinearMap<u8, usize, 16>,
    failing_reads: LinearMap<u8, ErrorKind, 16>,
}

impl FakeTransport {
    pub fn new() -> Self {
        FakeTransport {
            regs: [0u8; 256],
            writes: Vec::new(),
            short_reads: LinearMap::new(),
            failing_reads: LinearMap::new(),
        }
    }

    /// Stores `data` starting at register `addr`.
    pub fn seed(&mut self, addr: u8, data: &[u8]) {
        let start = addr as usize;
        self.regs[start..start + data.len()].copy_from_slice(data);
    }

    /// Reads starting at `addr` will deliver at most `available` bytes.
    pub fn limit_read(&mut self, addr: u8, available: usize) {
        self.short_reads.insert(addr, available).unwrap();
    }

    /// Reads starting at `addr` will fail with `error`.
    pub fn fail_read(&mut self, addr: u8, error: ErrorKind) {
        self.failing_reads.insert(addr, error).unwrap();
    }

    /// Makes reads at `addr` behave normally again.
    pub fn heal(&mut self, addr: u8) {
        self.short_reads.remove(&addr);
        self.failing_reads.remove(&addr);
    }

    pub fn register(&self, addr: u8) -> u8 {
        self.regs[addr as usize]
    }

    /// Every `(register, value)` pair written so far, in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl Transport for FakeTransport {
    type Error = ErrorKind;

    fn write(&mut self, _address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = bytes[0] as usize;
        for (offset, value) in bytes[1..].iter().enumerate() {
            self.regs[start + offset] = *value;
            self.writes.push(((start + offset) as u8, *value)).unwrap();
        }

        Ok(())
    }

    fn write_read(
        &mut self,
        _address: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let addr = bytes[0];
        if let Some(error) = self.failing_reads.get(&addr) {
            return Err(*error);
        }

        let available = match self.short_reads.get(&addr) {
            Some(limit) => (*limit).min(buffer.len()),
            None => buffer.len(),
        };

        let start = addr as usize;
        buffer[..available].copy_from_slice(&self.regs[start..start + available]);

        Ok(available)
    }
}
