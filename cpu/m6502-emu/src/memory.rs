//! Flat 64KB address space

use bincode::{Decode, Encode};
use m6502_common::boxedarray::BoxedByteArray;
use std::fmt::{Debug, Formatter};

pub const MEMORY_LEN: usize = 0x10000;

/// The full 16-bit address space. Every `u16` is a valid address, so no access can fail.
#[derive(Clone, PartialEq, Eq, Encode, Decode)]
pub struct Memory {
    bytes: BoxedByteArray<MEMORY_LEN>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: BoxedByteArray::new() }
    }

    #[inline]
    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.bytes[address as usize]
    }

    #[inline]
    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[address as usize] = value;
    }

    /// Read a little-endian word. The high byte comes from `address + 1`, wrapping from $FFFF
    /// to $0000.
    #[inline]
    #[must_use]
    pub fn read16(&self, address: u16) -> u16 {
        let lsb = self.read(address);
        let msb = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lsb, msb])
    }

    #[inline]
    pub fn write16(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write(address, lsb);
        self.write(address.wrapping_add(1), msb);
    }

    /// Copy a raw program image into memory starting at $0000.
    pub fn load_program(&mut self, program: &[u8]) {
        self.load_program_at(program, 0x0000);
    }

    /// Copy a raw program image into memory starting at `base`. Addresses past $FFFF wrap to
    /// $0000; the image is not validated in any way.
    pub fn load_program_at(&mut self, program: &[u8], base: u16) {
        let mut address = base;
        for &byte in program {
            self.write(address, byte);
            address = address.wrapping_add(1);
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let non_zero = self.bytes.iter().filter(|&&byte| byte != 0).count();
        f.debug_struct("Memory")
            .field("len", &MEMORY_LEN)
            .field("non_zero_bytes", &non_zero)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_memory_reads_zero() {
        let memory = Memory::new();
        assert_eq!(memory.read(0x0000), 0);
        assert_eq!(memory.read(0xABCD), 0);
        assert_eq!(memory.read(0xFFFF), 0);
    }

    #[test]
    fn read_returns_last_write() {
        let mut memory = Memory::new();
        memory.write(0x1000, 0x64);
        assert_eq!(memory.read(0x1000), 0x64);

        memory.write(0x1000, 0x12);
        assert_eq!(memory.read(0x1000), 0x12);
        assert_eq!(memory.read(0x0FFF), 0);
        assert_eq!(memory.read(0x1001), 0);
    }

    #[test]
    fn words_are_little_endian() {
        let mut memory = Memory::new();
        memory.write16(0x1000, 0x1234);

        assert_eq!(memory.read(0x1000), 0x34);
        assert_eq!(memory.read(0x1001), 0x12);
        assert_eq!(memory.read16(0x1000), 0x1234);
    }

    #[test]
    fn word_access_wraps_at_end_of_memory() {
        let mut memory = Memory::new();
        memory.write16(0xFFFF, 0xBEEF);

        assert_eq!(memory.read(0xFFFF), 0xEF);
        assert_eq!(memory.read(0x0000), 0xBE);
        assert_eq!(memory.read16(0xFFFF), 0xBEEF);
    }

    #[test]
    fn word_round_trip_at_boundaries() {
        let mut memory = Memory::new();
        for address in [0x0000, 0x00FF, 0x0100, 0x7FFF, 0xFFFE, 0xFFFF] {
            for value in [0x0000, 0x00FF, 0xFF00, 0x8001, 0xFFFF] {
                memory.write16(address, value);
                assert_eq!(memory.read16(address), value, "address={address:04X}");
            }
        }
    }

    #[test]
    fn load_program_copies_bytes_sequentially() {
        let mut memory = Memory::new();
        memory.load_program(&[0xA9, 0x10, 0x69, 0xFF]);
        assert_eq!(&memory.as_slice()[..5], &[0xA9, 0x10, 0x69, 0xFF, 0x00]);

        memory.load_program_at(&[0xEA, 0xEA], 0x8000);
        assert_eq!(memory.read(0x7FFF), 0x00);
        assert_eq!(memory.read(0x8000), 0xEA);
        assert_eq!(memory.read(0x8001), 0xEA);
        assert_eq!(memory.read(0x8002), 0x00);
    }

    #[test]
    fn load_program_wraps_past_end_of_memory() {
        let mut memory = Memory::new();
        memory.load_program_at(&[0x01, 0x02, 0x03], 0xFFFE);
        assert_eq!(memory.read(0xFFFE), 0x01);
        assert_eq!(memory.read(0xFFFF), 0x02);
        assert_eq!(memory.read(0x0000), 0x03);
    }
}
