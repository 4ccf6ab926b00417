//! The 256-entry opcode table and the operation routines it dispatches to.
//!
//! Every opcode maps to an [`Instruction`]: an addressing mode that is resolved first, then an
//! operation that reads the resolved operand/address out of the CPU's instruction state.
//! Undocumented opcodes map to a one-byte no-op.

mod alu;
mod bits;
mod flow;
mod load;


use crate::{AddressingMode, Cpu6502};
use std::array;
use std::fmt::{Debug, Formatter};
use std::sync::LazyLock;

pub type Operation = fn(&mut Cpu6502);

/// Display name used for every undocumented opcode.
pub const UNDOCUMENTED_NAME: &str = "???";

pub const DOCUMENTED_OPCODE_COUNT: usize = 151;

#[derive(Clone, Copy)]
pub struct Instruction {
    pub name: &'static str,
    pub mode: AddressingMode,
    pub operation: Operation,
}

impl Instruction {
    fn new(name: &'static str, mode: AddressingMode, operation: Operation) -> Self {
        Self { name, mode, operation }
    }

    #[must_use]
    pub fn is_documented(&self) -> bool {
        self.name != UNDOCUMENTED_NAME
    }

    /// Total instruction length in bytes, including the opcode.
    #[must_use]
    pub fn size(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

impl Debug for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instruction").field("name", &self.name).field("mode", &self.mode).finish()
    }
}

static TABLE: LazyLock<[Instruction; 256]> =
    LazyLock::new(|| array::from_fn(|opcode| decode_inner(opcode as u8)));

#[inline]
#[must_use]
pub fn decode(opcode: u8) -> &'static Instruction {
    &TABLE[opcode as usize]
}

#[must_use]
pub fn table() -> &'static [Instruction; 256] {
    &TABLE
}

// Write a read-modify-write result back to where the operand came from: the accumulator for
// implied-mode shifts and rotates, otherwise the effective address
fn write_back(cpu: &mut Cpu6502, value: u8) {
    match cpu.state.mode {
        AddressingMode::Implied => cpu.registers.accumulator = value,
        _ => cpu.memory.write(cpu.state.address, value),
    }
}

#[allow(clippy::match_same_arms)]
fn decode_inner(opcode: u8) -> Instruction {
    use AddressingMode::*;

    let i = Instruction::new;
    match opcode {
        0x00 => i("BRK", Implied, flow::brk),
        0x01 => i("ORA", IndexedIndirect, alu::ora),
        0x05 => i("ORA", ZeroPage, alu::ora),
        0x06 => i("ASL", ZeroPage, bits::asl),
        0x08 => i("PHP", Implied, load::php),
        0x09 => i("ORA", Immediate, alu::ora),
        0x0A => i("ASL", Implied, bits::asl),
        0x0D => i("ORA", Absolute, alu::ora),
        0x0E => i("ASL", Absolute, bits::asl),
        0x10 => i("BPL", Relative, flow::bpl),
        0x11 => i("ORA", IndirectIndexed, alu::ora),
        0x15 => i("ORA", ZeroPageX, alu::ora),
        0x16 => i("ASL", ZeroPageX, bits::asl),
        0x18 => i("CLC", Implied, bits::clc),
        0x19 => i("ORA", AbsoluteY, alu::ora),
        0x1D => i("ORA", AbsoluteX, alu::ora),
        0x1E => i("ASL", AbsoluteX, bits::asl),
        0x20 => i("JSR", Absolute, flow::jsr),
        0x21 => i("AND", IndexedIndirect, alu::and),
        0x24 => i("BIT", ZeroPage, alu::bit),
        0x25 => i("AND", ZeroPage, alu::and),
        0x26 => i("ROL", ZeroPage, bits::rol),
        0x28 => i("PLP", Implied, load::plp),
        0x29 => i("AND", Immediate, alu::and),
        0x2A => i("ROL", Implied, bits::rol),
        0x2C => i("BIT", Absolute, alu::bit),
        0x2D => i("AND", Absolute, alu::and),
        0x2E => i("ROL", Absolute, bits::rol),
        0x30 => i("BMI", Relative, flow::bmi),
        0x31 => i("AND", IndirectIndexed, alu::and),
        0x35 => i("AND", ZeroPageX, alu::and),
        0x36 => i("ROL", ZeroPageX, bits::rol),
        0x38 => i("SEC", Implied, bits::sec),
        0x39 => i("AND", AbsoluteY, alu::and),
        0x3D => i("AND", AbsoluteX, alu::and),
        0x3E => i("ROL", AbsoluteX, bits::rol),
        0x40 => i("RTI", Implied, flow::rti),
        0x41 => i("EOR", IndexedIndirect, alu::eor),
        0x45 => i("EOR", ZeroPage, alu::eor),
        0x46 => i("LSR", ZeroPage, bits::lsr),
        0x48 => i("PHA", Implied, load::pha),
        0x49 => i("EOR", Immediate, alu::eor),
        0x4A => i("LSR", Implied, bits::lsr),
        0x4C => i("JMP", Absolute, flow::jmp),
        0x4D => i("EOR", Absolute, alu::eor),
        0x4E => i("LSR", Absolute, bits::lsr),
        0x50 => i("BVC", Relative, flow::bvc),
        0x51 => i("EOR", IndirectIndexed, alu::eor),
        0x55 => i("EOR", ZeroPageX, alu::eor),
        0x56 => i("LSR", ZeroPageX, bits::lsr),
        0x58 => i("CLI", Implied, bits::cli),
        0x59 => i("EOR", AbsoluteY, alu::eor),
        0x5D => i("EOR", AbsoluteX, alu::eor),
        0x5E => i("LSR", AbsoluteX, bits::lsr),
        0x60 => i("RTS", Implied, flow::rts),
        0x61 => i("ADC", IndexedIndirect, alu::adc),
        0x65 => i("ADC", ZeroPage, alu::adc),
        0x66 => i("ROR", ZeroPage, bits::ror),
        0x68 => i("PLA", Implied, load::pla),
        0x69 => i("ADC", Immediate, alu::adc),
        0x6A => i("ROR", Implied, bits::ror),
        0x6C => i("JMP", Indirect, flow::jmp),
        0x6D => i("ADC", Absolute, alu::adc),
        0x6E => i("ROR", Absolute, bits::ror),
        0x70 => i("BVS", Relative, flow::bvs),
        0x71 => i("ADC", IndirectIndexed, alu::adc),
        0x75 => i("ADC", ZeroPageX, alu::adc),
        0x76 => i("ROR", ZeroPageX, bits::ror),
        0x78 => i("SEI", Implied, bits::sei),
        0x79 => i("ADC", AbsoluteY, alu::adc),
        0x7D => i("ADC", AbsoluteX, alu::adc),
        0x7E => i("ROR", AbsoluteX, bits::ror),
        0x81 => i("STA", IndexedIndirect, load::sta),
        0x84 => i("STY", ZeroPage, load::sty),
        0x85 => i("STA", ZeroPage, load::sta),
        0x86 => i("STX", ZeroPage, load::stx),
        0x88 => i("DEY", Implied, alu::dey),
        0x8A => i("TXA", Implied, load::txa),
        0x8C => i("STY", Absolute, load::sty),
        0x8D => i("STA", Absolute, load::sta),
        0x8E => i("STX", Absolute, load::stx),
        0x90 => i("BCC", Relative, flow::bcc),
        0x91 => i("STA", IndirectIndexed, load::sta),
        0x94 => i("STY", ZeroPageX, load::sty),
        0x95 => i("STA", ZeroPageX, load::sta),
        0x96 => i("STX", ZeroPageY, load::stx),
        0x98 => i("TYA", Implied, load::tya),
        0x99 => i("STA", AbsoluteY, load::sta),
        0x9A => i("TXS", Implied, load::txs),
        0x9D => i("STA", AbsoluteX, load::sta),
        0xA0 => i("LDY", Immediate, load::ldy),
        0xA1 => i("LDA", IndexedIndirect, load::lda),
        0xA2 => i("LDX", Immediate, load::ldx),
        0xA4 => i("LDY", ZeroPage, load::ldy),
        0xA5 => i("LDA", ZeroPage, load::lda),
        0xA6 => i("LDX", ZeroPage, load::ldx),
        0xA8 => i("TAY", Implied, load::tay),
        0xA9 => i("LDA", Immediate, load::lda),
        0xAA => i("TAX", Implied, load::tax),
        0xAC => i("LDY", Absolute, load::ldy),
        0xAD => i("LDA", Absolute, load::lda),
        0xAE => i("LDX", Absolute, load::ldx),
        0xB0 => i("BCS", Relative, flow::bcs),
        0xB1 => i("LDA", IndirectIndexed, load::lda),
        0xB4 => i("LDY", ZeroPageX, load::ldy),
        0xB5 => i("LDA", ZeroPageX, load::lda),
        0xB6 => i("LDX", ZeroPageY, load::ldx),
        0xB8 => i("CLV", Implied, bits::clv),
        0xB9 => i("LDA", AbsoluteY, load::lda),
        0xBA => i("TSX", Implied, load::tsx),
        0xBC => i("LDY", AbsoluteX, load::ldy),
        0xBD => i("LDA", AbsoluteX, load::lda),
        0xBE => i("LDX", AbsoluteY, load::ldx),
        0xC0 => i("CPY", Immediate, alu::cpy),
        0xC1 => i("CMP", IndexedIndirect, alu::cmp),
        0xC4 => i("CPY", ZeroPage, alu::cpy),
        0xC5 => i("CMP", ZeroPage, alu::cmp),
        0xC6 => i("DEC", ZeroPage, alu::dec),
        0xC8 => i("INY", Implied, alu::iny),
        0xC9 => i("CMP", Immediate, alu::cmp),
        0xCA => i("DEX", Implied, alu::dex),
        0xCC => i("CPY", Absolute, alu::cpy),
        0xCD => i("CMP", Absolute, alu::cmp),
        0xCE => i("DEC", Absolute, alu::dec),
        0xD0 => i("BNE", Relative, flow::bne),
        0xD1 => i("CMP", IndirectIndexed, alu::cmp),
        0xD5 => i("CMP", ZeroPageX, alu::cmp),
        0xD6 => i("DEC", ZeroPageX, alu::dec),
        0xD8 => i("CLD", Implied, bits::cld),
        0xD9 => i("CMP", AbsoluteY, alu::cmp),
        0xDD => i("CMP", AbsoluteX, alu::cmp),
        0xDE => i("DEC", AbsoluteX, alu::dec),
        0xE0 => i("CPX", Immediate, alu::cpx),
        0xE1 => i("SBC", IndexedIndirect, alu::sbc),
        0xE4 => i("CPX", ZeroPage, alu::cpx),
        0xE5 => i("SBC", ZeroPage, alu::sbc),
        0xE6 => i("INC", ZeroPage, alu::inc),
        0xE8 => i("INX", Implied, alu::inx),
        0xE9 => i("SBC", Immediate, alu::sbc),
        0xEA => i("NOP", Implied, flow::nop),
        0xEC => i("CPX", Absolute, alu::cpx),
        0xED => i("SBC", Absolute, alu::sbc),
        0xEE => i("INC", Absolute, alu::inc),
        0xF0 => i("BEQ", Relative, flow::beq),
        0xF1 => i("SBC", IndirectIndexed, alu::sbc),
        0xF5 => i("SBC", ZeroPageX, alu::sbc),
        0xF6 => i("INC", ZeroPageX, alu::inc),
        0xF8 => i("SED", Implied, bits::sed),
        0xF9 => i("SBC", AbsoluteY, alu::sbc),
        0xFD => i("SBC", AbsoluteX, alu::sbc),
        0xFE => i("INC", AbsoluteX, alu::inc),
        _ => i(UNDOCUMENTED_NAME, Implied, flow::undocumented),
    }
}
