//! Arithmetic, logical, compare, and increment/decrement operations

use super::write_back;
use crate::{Cpu6502, StatusFlags};
use m6502_common::num::{GetBit, SignBit};

// ADC in binary mode; the decimal flag is never consulted
fn add_with_carry(accumulator: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    let sum = u16::from(accumulator) + u16::from(value) + u16::from(flags.carry);
    let result = sum as u8;

    // Overflow iff both inputs have the same sign and the result's sign differs
    let overflow = (!(accumulator ^ value) & (accumulator ^ result)).sign_bit();

    flags.set_carry(sum > 0xFF).set_overflow(overflow).set_zn(result);

    result
}

pub(super) fn adc(cpu: &mut Cpu6502) {
    let registers = &mut cpu.registers;
    registers.accumulator =
        add_with_carry(registers.accumulator, cpu.state.operand, &mut registers.status);
}

// SBC is ADC of the one's complement: A - M - !C == A + !M + C
pub(super) fn sbc(cpu: &mut Cpu6502) {
    let registers = &mut cpu.registers;
    registers.accumulator =
        add_with_carry(registers.accumulator, !cpu.state.operand, &mut registers.status);
}

// AND, ORA, EOR
macro_rules! impl_logical {
    ($name:ident, $op:tt) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let registers = &mut cpu.registers;
            let result = registers.accumulator $op cpu.state.operand;
            registers.accumulator = result;
            registers.status.set_zn(result);
        }
    };
}

impl_logical!(and, &);
impl_logical!(ora, |);
impl_logical!(eor, ^);

pub(super) fn bit(cpu: &mut Cpu6502) {
    let operand = cpu.state.operand;
    let registers = &mut cpu.registers;
    registers
        .status
        .set_negative(operand.sign_bit())
        .set_overflow(operand.bit(6))
        .set_zero(registers.accumulator & operand == 0);
}

fn compare(register: u8, value: u8, flags: &mut StatusFlags) {
    flags.set_carry(register >= value).set_zn(register.wrapping_sub(value));
}

// CMP, CPX, CPY
macro_rules! impl_compare {
    ($name:ident, $register:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let registers = &mut cpu.registers;
            compare(registers.$register, cpu.state.operand, &mut registers.status);
        }
    };
}

impl_compare!(cmp, accumulator);
impl_compare!(cpx, x);
impl_compare!(cpy, y);

// INC, DEC
macro_rules! impl_modify_memory {
    ($name:ident, $op:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let value = cpu.state.operand.$op(1);
            cpu.registers.status.set_zn(value);
            write_back(cpu, value);
        }
    };
}

impl_modify_memory!(inc, wrapping_add);
impl_modify_memory!(dec, wrapping_sub);

// INX, INY, DEX, DEY
macro_rules! impl_modify_register {
    ($name:ident, $register:ident, $op:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let registers = &mut cpu.registers;
            let value = registers.$register.$op(1);
            registers.$register = value;
            registers.status.set_zn(value);
        }
    };
}

impl_modify_register!(inx, x, wrapping_add);
impl_modify_register!(iny, y, wrapping_add);
impl_modify_register!(dex, x, wrapping_sub);
impl_modify_register!(dey, y, wrapping_sub);
