//! Shifts, rotates, and status flag set/clear

use super::write_back;
use crate::{Cpu6502, StatusFlags};
use m6502_common::num::{GetBit, SignBit};

fn shift_left(value: u8, flags: &mut StatusFlags) -> u8 {
    let shifted = value << 1;
    flags.set_carry(value.sign_bit()).set_zn(shifted);
    shifted
}

fn logical_shift_right(value: u8, flags: &mut StatusFlags) -> u8 {
    let shifted = value >> 1;
    flags.set_carry(value.bit(0)).set_zn(shifted);
    shifted
}

fn rotate_left(value: u8, flags: &mut StatusFlags) -> u8 {
    let rotated = (value << 1) | u8::from(flags.carry);
    flags.set_carry(value.sign_bit()).set_zn(rotated);
    rotated
}

fn rotate_right(value: u8, flags: &mut StatusFlags) -> u8 {
    let rotated = (value >> 1) | (u8::from(flags.carry) << 7);
    flags.set_carry(value.bit(0)).set_zn(rotated);
    rotated
}

// ASL, LSR, ROL, ROR; accumulator in implied mode, memory otherwise
macro_rules! impl_shift {
    ($name:ident, $shift_fn:ident) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            let value = $shift_fn(cpu.state.operand, &mut cpu.registers.status);
            write_back(cpu, value);
        }
    };
}

impl_shift!(asl, shift_left);
impl_shift!(lsr, logical_shift_right);
impl_shift!(rol, rotate_left);
impl_shift!(ror, rotate_right);

// CLC, CLD, CLI, CLV, SEC, SED, SEI
macro_rules! impl_set_status_flag {
    ($name:ident, $flag:ident = $value:expr) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            cpu.registers.status.$flag = $value;
        }
    };
}

impl_set_status_flag!(clc, carry = false);
impl_set_status_flag!(cld, decimal = false);
impl_set_status_flag!(cli, interrupt_disable = false);
impl_set_status_flag!(clv, overflow = false);
impl_set_status_flag!(sec, carry = true);
impl_set_status_flag!(sed, decimal = true);
impl_set_status_flag!(sei, interrupt_disable = true);
