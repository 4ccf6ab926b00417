//! Single-instruction disassembler for trace logging and debugging

use crate::instructions;
use crate::{AddressingMode, Memory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    pub text: String,
    /// Instruction length in bytes, including the opcode
    pub length: u16,
}

// Implied-mode forms of these operate on the accumulator and are written with an "A" operand
const ACCUMULATOR_OPS: [&str; 4] = ["ASL", "LSR", "ROL", "ROR"];

/// Disassemble the instruction at `address`. Operand bytes past $FFFF wrap to $0000.
#[must_use]
pub fn disassemble(memory: &Memory, address: u16) -> Disassembly {
    let instruction = instructions::decode(memory.read(address));
    let name = instruction.name;

    let byte = memory.read(address.wrapping_add(1));
    let word = memory.read16(address.wrapping_add(1));

    let text = match instruction.mode {
        AddressingMode::Implied if ACCUMULATOR_OPS.contains(&name) => format!("{name} A"),
        AddressingMode::Implied => name.into(),
        AddressingMode::Immediate => format!("{name} #${byte:02X}"),
        AddressingMode::ZeroPage => format!("{name} ${byte:02X}"),
        AddressingMode::ZeroPageX => format!("{name} ${byte:02X},X"),
        AddressingMode::ZeroPageY => format!("{name} ${byte:02X},Y"),
        AddressingMode::Relative => {
            let target = address.wrapping_add(2).wrapping_add_signed((byte as i8).into());
            format!("{name} ${target:04X}")
        }
        AddressingMode::Absolute => format!("{name} ${word:04X}"),
        AddressingMode::AbsoluteX => format!("{name} ${word:04X},X"),
        AddressingMode::AbsoluteY => format!("{name} ${word:04X},Y"),
        AddressingMode::Indirect => format!("{name} (${word:04X})"),
        AddressingMode::IndexedIndirect => format!("{name} (${byte:02X},X)"),
        AddressingMode::IndirectIndexed => format!("{name} (${byte:02X}),Y"),
    };

    Disassembly { text, length: instruction.size() }
}

/// Disassemble `count` consecutive instructions starting at `address`, returning each
/// instruction's address alongside its disassembly.
#[must_use]
pub fn disassemble_range(memory: &Memory, address: u16, count: usize) -> Vec<(u16, Disassembly)> {
    let mut address = address;
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let disassembly = disassemble(memory, address);
        let next = address.wrapping_add(disassembly.length);
        lines.push((address, disassembly));
        address = next;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(program: &[u8], base: u16) -> Memory {
        let mut memory = Memory::new();
        memory.load_program_at(program, base);
        memory
    }

    #[test]
    fn operand_syntax_per_mode() {
        let cases: [(&[u8], &str, u16); 14] = [
            (&[0xEA], "NOP", 1),
            (&[0x0A], "ASL A", 1),
            (&[0x69, 0xFF], "ADC #$FF", 2),
            (&[0x65, 0xAB], "ADC $AB", 2),
            (&[0x75, 0xAB], "ADC $AB,X", 2),
            (&[0xB6, 0x10], "LDX $10,Y", 2),
            (&[0x6D, 0xCD, 0xAB], "ADC $ABCD", 3),
            (&[0x7D, 0xCD, 0xAB], "ADC $ABCD,X", 3),
            (&[0x79, 0xCD, 0xAB], "ADC $ABCD,Y", 3),
            (&[0x6C, 0xFF, 0x30], "JMP ($30FF)", 3),
            (&[0x61, 0x40], "ADC ($40,X)", 2),
            (&[0x71, 0x40], "ADC ($40),Y", 2),
            (&[0x20, 0x03, 0x10], "JSR $1003", 3),
            (&[0x02], "???", 1),
        ];

        for (program, text, length) in cases {
            let memory = memory_with(program, 0x0400);
            let disassembly = disassemble(&memory, 0x0400);
            assert_eq!(disassembly.text, text);
            assert_eq!(disassembly.length, length, "{text}");
        }
    }

    #[test]
    fn branch_targets_are_absolute() {
        let memory = memory_with(&[0x90, 0x02, 0xD0, 0xFC], 0x1000);

        assert_eq!(disassemble(&memory, 0x1000).text, "BCC $1004");
        assert_eq!(disassemble(&memory, 0x1002).text, "BNE $1000");
    }

    #[test]
    fn range_walks_instruction_lengths() {
        let memory = memory_with(&[0x90, 0x02, 0x69, 0x11, 0x69, 0x05, 0x00], 0x0000);

        let lines = disassemble_range(&memory, 0x0000, 4);
        let rendered: Vec<_> =
            lines.iter().map(|(address, d)| format!("{address:04X} {}", d.text)).collect();

        assert_eq!(rendered, ["0000 BCC $0004", "0002 ADC #$11", "0004 ADC #$05", "0006 BRK"]);
    }
}
