use super::*;
use crate::program::parse_hex_program;
use test_log::test;

fn cpu_with_program(program: &str) -> Cpu6502 {
    let mut cpu = Cpu6502::new();
    cpu.load_program(&parse_hex_program(program).unwrap());
    cpu
}

#[test]
fn power_on_state() {
    let cpu = Cpu6502::new();
    let registers = cpu.registers();

    assert_eq!(registers.accumulator, 0);
    assert_eq!(registers.x, 0);
    assert_eq!(registers.y, 0);
    assert_eq!(registers.sp, 0);
    assert_eq!(registers.pc, 0);
    assert_eq!(cpu.get_flags(), 0);
    assert!(cpu.memory().as_slice().iter().all(|&byte| byte == 0));
    assert_eq!(cpu, Cpu6502::default());
}

#[test]
fn adc_immediate_carry_out() {
    let mut cpu = cpu_with_program("69 FF");
    cpu.registers_mut().accumulator = 0x10;

    cpu.exec();

    assert_eq!(cpu.registers().accumulator, 0x0F);
    let flags = cpu.registers().status;
    assert!(flags.carry);
    assert!(!flags.zero);
    assert!(!flags.negative);
    assert!(!flags.overflow);
    assert_eq!(cpu.pc(), 0x0002);
}

#[test]
fn sbc_immediate_signed_overflow() {
    let mut cpu = cpu_with_program("E9 01");
    cpu.registers_mut().accumulator = 0x80;
    cpu.registers_mut().status.carry = true;

    cpu.exec();

    assert_eq!(cpu.registers().accumulator, 0x7F);
    let flags = cpu.registers().status;
    assert!(flags.carry);
    assert!(flags.overflow);
    assert!(!flags.negative);
    assert!(!flags.zero);
}

#[test]
fn jsr_then_rts_resumes_after_call() {
    // $0000: JSR $1003
    let mut cpu = cpu_with_program("20 03 10");
    // $1003: RTS
    cpu.write(0x1003, 0x60);
    cpu.registers_mut().sp = 0xFF;

    cpu.exec();
    assert_eq!(cpu.pc(), 0x1003);
    assert_eq!(cpu.registers().sp, 0xFD);
    assert_eq!(cpu.read(0x01FF), 0x00);
    assert_eq!(cpu.read(0x01FE), 0x02);

    cpu.exec();
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.registers().sp, 0xFF);
}

#[test]
fn countdown_loop_with_bcc() {
    // CLC; LDA #$00; loop: SBC #$01; BCC loop
    let mut cpu = cpu_with_program("18 A9 00 E9 01 90 FC");

    cpu.exec_n(4);

    assert_eq!(cpu.registers().accumulator, 0xFE);
    assert!(cpu.registers().status.negative);
    assert!(!cpu.registers().status.carry);
    // Branch taken back to SBC
    assert_eq!(cpu.pc(), 0x0003);
}

#[test]
fn exec_n_zero_is_a_no_op() {
    let mut cpu = cpu_with_program("A9 01");
    let before = cpu.clone();

    cpu.exec_n(0);

    assert_eq!(cpu, before);
}

#[test]
fn pc_wraps_at_end_of_memory() {
    let mut cpu = Cpu6502::new();
    // LDA #$42 straddling $FFFF/$0000
    cpu.write(0xFFFF, 0xA9);
    cpu.write(0x0000, 0x42);
    cpu.registers_mut().pc = 0xFFFF;

    cpu.exec();

    assert_eq!(cpu.registers().accumulator, 0x42);
    assert_eq!(cpu.pc(), 0x0001);
}

#[test]
fn stack_pointer_wraps() {
    // PHA; PLA
    let mut cpu = cpu_with_program("48 68");
    cpu.registers_mut().accumulator = 0x99;

    cpu.exec();
    assert_eq!(cpu.read(0x0100), 0x99);
    assert_eq!(cpu.registers().sp, 0xFF);

    cpu.registers_mut().accumulator = 0x00;
    cpu.exec();
    assert_eq!(cpu.registers().accumulator, 0x99);
    assert_eq!(cpu.registers().sp, 0x00);
}

#[test]
fn flags_byte_round_trip() {
    let mut cpu = Cpu6502::new();
    for flags in 0..=u8::MAX {
        cpu.set_flags(flags);
        assert_eq!(cpu.get_flags(), flags);
    }
}

#[test]
fn php_sets_unused_bit_in_pushed_byte_only() {
    let mut cpu = cpu_with_program("08");
    cpu.registers_mut().sp = 0xFF;
    cpu.set_flags(0x81);

    cpu.exec();

    assert_eq!(cpu.read(0x01FF), 0xB1);
    assert_eq!(cpu.get_flags(), 0x81);
}

#[test]
fn brk_jumps_through_configured_vector() {
    let mut cpu =
        Cpu6502::with_config(CpuConfig { break_vector: 0x2000, ..CpuConfig::default() });
    cpu.write16(0x2000, 0x4321);
    cpu.write16(BREAK_VECTOR, 0x1111);
    cpu.load_program(&[0x00]);

    cpu.exec();

    assert_eq!(cpu.pc(), 0x4321);
    assert!(cpu.registers().status.interrupt_disable);
    assert!(!cpu.registers().status.break_flag);
}

#[test]
fn reset_modes() {
    let mut cpu = Cpu6502::with_config(CpuConfig {
        reset_mode: ResetMode::ResetVector,
        initial_stack_pointer: 0xFD,
        ..CpuConfig::default()
    });
    assert_eq!(cpu.pc(), 0x0000);
    assert_eq!(cpu.registers().sp, 0xFD);

    cpu.write16(RESET_VECTOR, 0x8000);
    cpu.registers_mut().accumulator = 0x55;
    cpu.set_flags(0xFF);
    cpu.reset();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.registers().accumulator, 0x00);
    assert_eq!(cpu.get_flags(), 0x00);
    assert_eq!(cpu.read16(RESET_VECTOR), 0x8000);

    let mut cpu = Cpu6502::new();
    cpu.write16(RESET_VECTOR, 0x8000);
    cpu.registers_mut().pc = 0x1234;
    cpu.reset();
    assert_eq!(cpu.pc(), 0x0000);
}

#[test]
fn run_until_stops_on_brk() {
    // LDX #$03; loop: DEX; BNE loop; BRK
    let mut cpu = cpu_with_program("A2 03 CA D0 FD 00");

    let steps = cpu.run_until(100, |cpu| cpu.next_opcode() == 0x00).unwrap();

    assert_eq!(steps, 7);
    assert_eq!(cpu.pc(), 0x0005);
    assert_eq!(cpu.registers().x, 0);
}

#[test]
fn run_until_checks_before_first_step() {
    let mut cpu = cpu_with_program("A9 01");

    assert_eq!(cpu.run_until(0, |_| true), Ok(0));
    assert_eq!(cpu.pc(), 0x0000);
}

#[test]
fn run_until_step_limit() {
    // loop: JMP loop
    let mut cpu = cpu_with_program("4C 00 00");

    let result = cpu.run_until(50, |cpu| cpu.registers().x != 0);

    assert_eq!(result, Err(RunError::StepLimitExceeded { steps: 50, pc: 0x0000 }));
}

#[test]
fn instruction_state_records_last_operand() {
    let mut cpu = cpu_with_program("AD 34 12");
    cpu.write(0x1234, 0x77);

    cpu.exec();

    let state = cpu.instruction_state();
    assert_eq!(state.opcode, 0xAD);
    assert_eq!(state.mode, AddressingMode::Absolute);
    assert_eq!(state.address, 0x1234);
    assert_eq!(state.operand, 0x77);
}

#[test]
fn snapshot_round_trip() {
    // LDA #$12; STA $0200; LDX #$34
    let mut cpu = cpu_with_program("A9 12 8D 00 02 A2 34");
    cpu.exec_n(2);

    let bincode_config = bincode::config::standard();
    let bytes = bincode::encode_to_vec(&cpu, bincode_config).unwrap();
    let (mut restored, _): (Cpu6502, usize) =
        bincode::decode_from_slice(&bytes, bincode_config).unwrap();
    assert_eq!(restored, cpu);

    cpu.exec();
    restored.exec();
    assert_eq!(restored, cpu);
    assert_eq!(restored.registers().x, 0x34);
    assert_eq!(restored.read(0x0200), 0x12);
}

#[test]
fn clones_are_independent() {
    let mut cpu = cpu_with_program("E8");
    let snapshot = cpu.clone();

    cpu.exec();

    assert_eq!(cpu.registers().x, 1);
    assert_eq!(snapshot.registers().x, 0);
    assert_ne!(cpu, snapshot);
}
