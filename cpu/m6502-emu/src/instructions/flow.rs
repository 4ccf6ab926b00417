//! Branches, jumps, subroutines, BRK/RTI, and no-ops

use crate::Cpu6502;

// BCC, BCS, BEQ, BMI, BNE, BPL, BVC, BVS
macro_rules! impl_branch {
    ($name:ident, $flag:ident == $flag_value:expr) => {
        pub(super) fn $name(cpu: &mut Cpu6502) {
            if cpu.registers.status.$flag == $flag_value {
                let offset = cpu.state.relative_offset;
                cpu.registers.pc = cpu.registers.pc.wrapping_add_signed(offset.into());
            }
        }
    };
}

impl_branch!(bcc, carry == false);
impl_branch!(bcs, carry == true);
impl_branch!(beq, zero == true);
impl_branch!(bmi, negative == true);
impl_branch!(bne, zero == false);
impl_branch!(bpl, negative == false);
impl_branch!(bvc, overflow == false);
impl_branch!(bvs, overflow == true);

pub(super) fn jmp(cpu: &mut Cpu6502) {
    cpu.registers.pc = cpu.state.address;
}

// JSR pushes the address of its own last byte; RTS adds 1 after pulling it
pub(super) fn jsr(cpu: &mut Cpu6502) {
    let return_address = cpu.registers.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.registers.pc = cpu.state.address;
}

pub(super) fn rts(cpu: &mut Cpu6502) {
    cpu.registers.pc = cpu.pull_word().wrapping_add(1);
}

pub(super) fn brk(cpu: &mut Cpu6502) {
    // Skip the padding byte after the BRK opcode
    cpu.registers.pc = cpu.registers.pc.wrapping_add(1);
    cpu.push_word(cpu.registers.pc);

    cpu.registers.status.interrupt_disable = true;
    cpu.push(cpu.registers.status.to_byte_for_push());
    cpu.registers.status.break_flag = false;

    cpu.registers.pc = cpu.memory.read16(cpu.config.break_vector);
}

pub(super) fn rti(cpu: &mut Cpu6502) {
    let status = cpu.pull();
    let flags = &mut cpu.registers.status;
    *flags = status.into();
    flags.break_flag = false;
    flags.unused = false;

    cpu.registers.pc = cpu.pull_word();
}

pub(super) fn nop(_cpu: &mut Cpu6502) {}

pub(super) fn undocumented(cpu: &mut Cpu6502) {
    log::debug!(
        "Undocumented opcode {:02X} at {:04X} executed as NOP",
        cpu.state.opcode,
        cpu.registers.pc.wrapping_sub(1)
    );
}
