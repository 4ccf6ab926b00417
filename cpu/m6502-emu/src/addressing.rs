use crate::Cpu6502;
use bincode::{Decode, Encode};
use m6502_common::num::U16Ext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum AddressingMode {
    /// No operand bytes; the operand is the accumulator
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// Signed 8-bit branch displacement
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP ($nnnn), including the page wrap bug when the pointer ends in $FF
    Indirect,
    /// ($nn,X)
    IndexedIndirect,
    /// ($nn),Y
    IndirectIndexed,
}

impl AddressingMode {
    pub const ALL: [Self; 12] = [
        Self::Implied,
        Self::Immediate,
        Self::ZeroPage,
        Self::ZeroPageX,
        Self::ZeroPageY,
        Self::Relative,
        Self::Absolute,
        Self::AbsoluteX,
        Self::AbsoluteY,
        Self::Indirect,
        Self::IndexedIndirect,
        Self::IndirectIndexed,
    ];

    /// Number of bytes that follow the opcode.
    #[must_use]
    pub fn operand_len(self) -> u16 {
        match self {
            Self::Implied => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// Consume this mode's operand bytes from the program stream and leave the effective address,
    /// operand value, or branch displacement in the CPU's instruction state.
    ///
    /// For modes that produce an address, the operand is the byte at that address. Reads have no
    /// side effects on a flat memory, so reading it eagerly is unobservable.
    pub fn resolve(self, cpu: &mut Cpu6502) {
        cpu.state.mode = self;

        let address = match self {
            Self::Implied => {
                cpu.state.operand = cpu.registers.accumulator;
                return;
            }
            Self::Relative => {
                cpu.state.relative_offset = cpu.fetch() as i8;
                return;
            }
            Self::Immediate => {
                let address = cpu.registers.pc;
                cpu.registers.pc = cpu.registers.pc.wrapping_add(1);
                address
            }
            Self::ZeroPage => cpu.fetch().into(),
            Self::ZeroPageX => cpu.fetch().wrapping_add(cpu.registers.x).into(),
            Self::ZeroPageY => cpu.fetch().wrapping_add(cpu.registers.y).into(),
            Self::Absolute => cpu.fetch_word(),
            Self::AbsoluteX => cpu.fetch_word().wrapping_add(cpu.registers.x.into()),
            Self::AbsoluteY => cpu.fetch_word().wrapping_add(cpu.registers.y.into()),
            Self::Indirect => {
                let pointer = cpu.fetch_word();
                let lsb = cpu.memory.read(pointer);

                // The high byte is read without carrying into the pointer's high byte, so
                // ($30FF) reads its high byte from $3000
                let msb_address =
                    u16::from_le_bytes([pointer.lsb().wrapping_add(1), pointer.msb()]);
                let msb = cpu.memory.read(msb_address);

                u16::from_le_bytes([lsb, msb])
            }
            Self::IndexedIndirect => {
                let pointer = cpu.fetch().wrapping_add(cpu.registers.x);
                read_zero_page_word(cpu, pointer)
            }
            Self::IndirectIndexed => {
                let pointer = cpu.fetch();
                read_zero_page_word(cpu, pointer).wrapping_add(cpu.registers.y.into())
            }
        };

        cpu.state.address = address;
        cpu.state.operand = cpu.memory.read(address);
    }
}

// Pointers in the zero page wrap within the zero page, so a pointer at $FF takes its high byte
// from $00
fn read_zero_page_word(cpu: &Cpu6502, pointer: u8) -> u16 {
    let lsb = cpu.memory.read(pointer.into());
    let msb = cpu.memory.read(pointer.wrapping_add(1).into());
    u16::from_le_bytes([lsb, msb])
}
