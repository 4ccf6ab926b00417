use bincode::{Decode, Encode};
use m6502_common::num::{GetBit, SignBit};

/// The eight status flags, stored as named booleans.
///
/// The packed byte layout (`NV1BDIZC`, bit 7 to bit 0) is only a wire format for pushing and
/// pulling the flags on the stack; flags are never stored packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct StatusFlags {
    pub negative: bool,
    pub overflow: bool,
    pub unused: bool,
    pub break_flag: bool,
    pub decimal: bool,
    pub interrupt_disable: bool,
    pub zero: bool,
    pub carry: bool,
}

impl StatusFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_negative(&mut self, negative: bool) -> &mut Self {
        self.negative = negative;
        self
    }

    pub fn set_overflow(&mut self, overflow: bool) -> &mut Self {
        self.overflow = overflow;
        self
    }

    pub fn set_zero(&mut self, zero: bool) -> &mut Self {
        self.zero = zero;
        self
    }

    pub fn set_carry(&mut self, carry: bool) -> &mut Self {
        self.carry = carry;
        self
    }

    /// Set Z and N from an 8-bit result.
    pub fn set_zn(&mut self, result: u8) -> &mut Self {
        self.set_negative(result.sign_bit()).set_zero(result == 0)
    }

    #[must_use]
    pub fn to_byte(self) -> u8 {
        (u8::from(self.negative) << 7)
            | (u8::from(self.overflow) << 6)
            | (u8::from(self.unused) << 5)
            | (u8::from(self.break_flag) << 4)
            | (u8::from(self.decimal) << 3)
            | (u8::from(self.interrupt_disable) << 2)
            | (u8::from(self.zero) << 1)
            | u8::from(self.carry)
    }

    /// The byte that PHP and BRK push: B and the unused bit always read as 1 on the stack.
    #[must_use]
    pub fn to_byte_for_push(self) -> u8 {
        Self { break_flag: true, unused: true, ..self }.to_byte()
    }

    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        Self {
            negative: byte.bit(7),
            overflow: byte.bit(6),
            unused: byte.bit(5),
            break_flag: byte.bit(4),
            decimal: byte.bit(3),
            interrupt_disable: byte.bit(2),
            zero: byte.bit(1),
            carry: byte.bit(0),
        }
    }
}

impl From<StatusFlags> for u8 {
    fn from(value: StatusFlags) -> Self {
        value.to_byte()
    }
}

impl From<u8> for StatusFlags {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct CpuRegisters {
    pub accumulator: u8,
    pub x: u8,
    pub y: u8,
    pub status: StatusFlags,
    pub pc: u16,
    pub sp: u8,
}

impl CpuRegisters {
    pub(crate) fn new(pc: u16, sp: u8) -> Self {
        Self { accumulator: 0, x: 0, y: 0, status: StatusFlags::new(), pc, sp }
    }
}
