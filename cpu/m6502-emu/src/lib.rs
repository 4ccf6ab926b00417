//! Instruction-level emulation of the NMOS 6502 against a flat 64KB memory.
//!
//! Each call to [`Cpu6502::exec`] runs one whole instruction: fetch the opcode, resolve its
//! addressing mode, then perform the operation. There is no cycle timing and no interrupt lines;
//! the only interrupt is the software BRK.

mod addressing;
pub mod disassemble;
pub mod instructions;
pub mod memory;
pub mod program;
mod registers;

#[cfg(test)]
mod tests;

pub use addressing::AddressingMode;
pub use m6502_config::{BREAK_VECTOR, CpuConfig, RESET_VECTOR, ResetMode};
pub use memory::Memory;
pub use registers::{CpuRegisters, StatusFlags};

use bincode::{Decode, Encode};
use thiserror::Error;

/// Per-instruction scratch values shared between the addressing mode and the operation.
///
/// Overwritten by every instruction; not part of the architectural state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct InstructionState {
    pub opcode: u8,
    pub mode: AddressingMode,
    pub address: u16,
    pub operand: u8,
    pub relative_offset: i8,
}

impl Default for InstructionState {
    fn default() -> Self {
        Self {
            opcode: 0,
            mode: AddressingMode::Implied,
            address: 0,
            operand: 0,
            relative_offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("Stop condition not reached after {steps} instructions (PC={pc:04X})")]
    StepLimitExceeded { steps: u64, pc: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Cpu6502 {
    registers: CpuRegisters,
    memory: Memory,
    state: InstructionState,
    config: CpuConfig,
}

impl Cpu6502 {
    /// Create a CPU in the power-on state: registers zeroed, flags clear, memory zero-filled,
    /// PC = $0000.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    #[must_use]
    pub fn with_config(config: CpuConfig) -> Self {
        let mut cpu = Self {
            registers: CpuRegisters::default(),
            memory: Memory::new(),
            state: InstructionState::default(),
            config,
        };
        cpu.reset();
        cpu
    }

    /// Reset registers and flags according to the config. Memory is left intact, so with
    /// [`ResetMode::ResetVector`] the vector can be written before resetting.
    pub fn reset(&mut self) {
        let pc = match self.config.reset_mode {
            ResetMode::ZeroPc => 0x0000,
            ResetMode::ResetVector => self.memory.read16(RESET_VECTOR),
        };

        self.registers = CpuRegisters::new(pc, self.config.initial_stack_pointer);
        self.state = InstructionState::default();
    }

    /// Execute exactly one instruction.
    pub fn exec(&mut self) {
        if log::log_enabled!(log::Level::Trace) {
            self.trace_instruction();
        }

        let opcode = self.fetch();
        self.state.opcode = opcode;

        let instruction = instructions::decode(opcode);
        instruction.mode.resolve(self);
        (instruction.operation)(self);
    }

    /// Execute `count` instructions back to back.
    pub fn exec_n(&mut self, count: u64) {
        for _ in 0..count {
            self.exec();
        }
    }

    /// Execute instructions forever. Stopping is up to the caller; use [`Self::run_until`] for a
    /// bounded run.
    pub fn exec_all(&mut self) -> ! {
        loop {
            self.exec();
        }
    }

    /// Execute instructions until `stop` returns true, checking it before every instruction.
    ///
    /// Returns the number of instructions executed.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::StepLimitExceeded`] if `stop` is still false after `max_steps`
    /// instructions.
    pub fn run_until<F>(&mut self, max_steps: u64, mut stop: F) -> Result<u64, RunError>
    where
        F: FnMut(&Self) -> bool,
    {
        let mut steps = 0;
        loop {
            if stop(self) {
                log::debug!("Stop condition reached after {steps} instructions");
                return Ok(steps);
            }

            if steps == max_steps {
                log::debug!(
                    "Step limit of {max_steps} reached without stop condition, PC={:04X}",
                    self.registers.pc
                );
                return Err(RunError::StepLimitExceeded { steps, pc: self.registers.pc });
            }

            self.exec();
            steps += 1;
        }
    }

    /// Read the byte at PC and advance PC.
    pub fn fetch(&mut self) -> u8 {
        let value = self.memory.read(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lsb = self.fetch();
        let msb = self.fetch();
        u16::from_le_bytes([lsb, msb])
    }

    pub(crate) fn push(&mut self, value: u8) {
        let address = u16::from_be_bytes([0x01, self.registers.sp]);
        self.memory.write(address, value);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.registers.sp = self.registers.sp.wrapping_add(1);
        self.memory.read(u16::from_be_bytes([0x01, self.registers.sp]))
    }

    /// Push a word high byte first, so that it sits little-endian in the stack page.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.push(msb);
        self.push(lsb);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lsb = self.pull();
        let msb = self.pull();
        u16::from_le_bytes([lsb, msb])
    }

    #[inline]
    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.memory.read(address)
    }

    #[inline]
    #[must_use]
    pub fn read16(&self, address: u16) -> u16 {
        self.memory.read16(address)
    }

    #[inline]
    pub fn write(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }

    #[inline]
    pub fn write16(&mut self, address: u16, value: u16) {
        self.memory.write16(address, value);
    }

    /// Copy a raw program image to $0000.
    pub fn load_program(&mut self, program: &[u8]) {
        self.load_program_at(program, 0x0000);
    }

    /// Copy a raw program image to `base`. PC is not modified.
    pub fn load_program_at(&mut self, program: &[u8], base: u16) {
        log::debug!("Loading {} program bytes at {base:04X}", program.len());
        if usize::from(base) + program.len() > memory::MEMORY_LEN {
            log::warn!(
                "Program of {} bytes at {base:04X} wraps past $FFFF to $0000",
                program.len()
            );
        }

        self.memory.load_program_at(program, base);
    }

    #[must_use]
    pub fn get_flags(&self) -> u8 {
        self.registers.status.to_byte()
    }

    pub fn set_flags(&mut self, flags: u8) {
        self.registers.status = StatusFlags::from_byte(flags);
    }

    #[inline]
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// The opcode that the next call to [`Self::exec`] will execute.
    #[must_use]
    pub fn next_opcode(&self) -> u8 {
        self.memory.read(self.registers.pc)
    }

    #[must_use]
    pub fn registers(&self) -> &CpuRegisters {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut CpuRegisters {
        &mut self.registers
    }

    pub fn set_registers(&mut self, registers: CpuRegisters) {
        self.registers = registers;
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Scratch values left behind by the most recently executed instruction.
    #[must_use]
    pub fn instruction_state(&self) -> &InstructionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    fn trace_instruction(&self) {
        let pc = self.registers.pc;
        let disassembly = disassemble::disassemble(&self.memory, pc);
        let registers = &self.registers;
        log::trace!(
            "{pc:04X}  {:02X}  {:<14}A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X}",
            self.memory.read(pc),
            disassembly.text,
            registers.accumulator,
            registers.x,
            registers.y,
            registers.sp,
            registers.status.to_byte()
        );
    }
}

impl Default for Cpu6502 {
    fn default() -> Self {
        Self::new()
    }
}
