//! Loads, stores, register transfers, and stack push/pull

use crate::{Cpu6502, StatusFlags};

// LDA, LDX, LDY
macro_rules! impl_load {
    ($name:ident, $register:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let value = cpu.state.operand;
            cpu.registers.$register = value;
            cpu.registers.status.set_zn(value);
        }
    };
}

impl_load!(lda, accumulator);
impl_load!(ldx, x);
impl_load!(ldy, y);

// STA, STX, STY
macro_rules! impl_store {
    ($name:ident, $register:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            cpu.memory.write(cpu.state.address, cpu.registers.$register);
        }
    };
}

impl_store!(sta, accumulator);
impl_store!(stx, x);
impl_store!(sty, y);

// TXS is the only transfer that leaves the flags alone
macro_rules! set_transfer_flags {
    (sp, $registers:expr, $value:expr) => {};
    ($to:ident, $registers:expr, $value:expr) => {
        $registers.status.set_zn($value);
    };
}

// TAX, TAY, TSX, TXA, TXS, TYA
macro_rules! impl_register_transfer {
    ($name:ident, $from:ident -> $to:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let registers = &mut cpu.registers;
            let value = registers.$from;
            registers.$to = value;
            set_transfer_flags!($to, registers, value);
        }
    };
}

impl_register_transfer!(tax, accumulator -> x);
impl_register_transfer!(tay, accumulator -> y);
impl_register_transfer!(tsx, sp -> x);
impl_register_transfer!(txa, x -> accumulator);
impl_register_transfer!(txs, x -> sp);
impl_register_transfer!(tya, y -> accumulator);

pub(super) fn pha(cpu: &mut Cpu6502) {
    cpu.push(cpu.registers.accumulator);
}

// B and U are only set in the pushed byte; the flags themselves keep their values
pub(super) fn php(cpu: &mut Cpu6502) {
    cpu.push(cpu.registers.status.to_byte_for_push());
}

pub(super) fn pla(cpu: &mut Cpu6502) {
    let value = cpu.pull();
    cpu.registers.accumulator = value;
    cpu.registers.status.set_zn(value);
}

pub(super) fn plp(cpu: &mut Cpu6502) {
    let value = cpu.pull();
    cpu.registers.status = StatusFlags { unused: true, ..StatusFlags::from_byte(value) };
}
