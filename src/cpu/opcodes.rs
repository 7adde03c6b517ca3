//! 反組譯用的操作碼表

use super::instructions::bit;
use super::instructions::common::RegTarget;

/// 每個操作碼的總長度（含操作碼本身），未定義的操作碼視為 1
#[rustfmt::skip]
pub const INSTRUCTION_LENGTHS: [u8; 256] = [
    1, 3, 1, 1, 1, 1, 2, 1, 3, 1, 1, 1, 1, 1, 2, 1, // 0x00
    2, 3, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, // 0x10
    2, 3, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, // 0x20
    2, 3, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, // 0x30
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x40
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x50
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x60
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x70
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x80
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0x90
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0xA0
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0xB0
    1, 1, 3, 3, 3, 1, 2, 1, 1, 1, 3, 2, 3, 3, 2, 1, // 0xC0
    1, 1, 3, 1, 3, 1, 2, 1, 1, 1, 3, 1, 3, 1, 2, 1, // 0xD0
    2, 1, 1, 1, 1, 1, 2, 1, 2, 1, 3, 1, 1, 1, 2, 1, // 0xE0
    2, 1, 1, 1, 1, 1, 2, 1, 2, 1, 3, 1, 1, 1, 2, 1, // 0xF0
];

/// 操作數佔位符：n = 8 位立即值、nn = 16 位、e = 相對位移
fn template(opcode: u8) -> String {
    const ALU: [&str; 8] = ["ADD A,", "ADC A,", "SUB ", "SBC A,", "AND ", "XOR ", "OR ", "CP "];
    const PAIRS: [&str; 4] = ["BC", "DE", "HL", "SP"];
    const STACK: [&str; 4] = ["BC", "DE", "HL", "AF"];
    const CONDS: [&str; 4] = ["NZ", "Z", "NC", "C"];

    let dst = RegTarget::from_bits(opcode >> 3).name();
    let src = RegTarget::from_bits(opcode).name();
    let pair = (opcode >> 4) as usize & 0x03;
    let cond = CONDS[(opcode >> 3) as usize & 0x03];

    let fixed = match opcode {
        0x00 => "NOP",
        0x07 => "RLCA",
        0x08 => "LD (nn),SP",
        0x0F => "RRCA",
        0x10 => "STOP",
        0x17 => "RLA",
        0x18 => "JR e",
        0x1F => "RRA",
        0x27 => "DAA",
        0x2F => "CPL",
        0x37 => "SCF",
        0x3F => "CCF",
        0x02 => "LD (BC),A",
        0x12 => "LD (DE),A",
        0x22 => "LD (HL+),A",
        0x32 => "LD (HL-),A",
        0x0A => "LD A,(BC)",
        0x1A => "LD A,(DE)",
        0x2A => "LD A,(HL+)",
        0x3A => "LD A,(HL-)",
        0x76 => "HALT",
        0xC3 => "JP nn",
        0xC9 => "RET",
        0xCB => "PREFIX CB",
        0xCD => "CALL nn",
        0xD9 => "RETI",
        0xE0 => "LDH (n),A",
        0xE2 => "LD (C),A",
        0xE8 => "ADD SP,e",
        0xE9 => "JP HL",
        0xEA => "LD (nn),A",
        0xF0 => "LDH A,(n)",
        0xF2 => "LD A,(C)",
        0xF3 => "DI",
        0xF8 => "LD HL,SP+e",
        0xF9 => "LD SP,HL",
        0xFA => "LD A,(nn)",
        0xFB => "EI",
        _ => "",
    };
    if !fixed.is_empty() {
        return fixed.to_string();
    }

    match opcode {
        0x20 | 0x28 | 0x30 | 0x38 => format!("JR {},e", cond),
        0x00..=0x3F => match opcode & 0x0F {
            0x01 => format!("LD {},nn", PAIRS[pair]),
            0x03 => format!("INC {}", PAIRS[pair]),
            0x09 => format!("ADD HL,{}", PAIRS[pair]),
            0x0B => format!("DEC {}", PAIRS[pair]),
            _ => match opcode & 0x07 {
                0x04 => format!("INC {}", dst),
                0x05 => format!("DEC {}", dst),
                _ => format!("LD {},n", dst),
            },
        },
        0x40..=0x7F => format!("LD {},{}", dst, src),
        0x80..=0xBF => format!("{}{}", ALU[(opcode >> 3) as usize & 0x07], src),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            format!("{}n", ALU[(opcode >> 3) as usize & 0x07])
        }
        0xC0 | 0xC8 | 0xD0 | 0xD8 => format!("RET {}", cond),
        0xC2 | 0xCA | 0xD2 | 0xDA => format!("JP {},nn", cond),
        0xC4 | 0xCC | 0xD4 | 0xDC => format!("CALL {},nn", cond),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => format!("POP {}", STACK[pair]),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => format!("PUSH {}", STACK[pair]),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            format!("RST {:02X}H", opcode & 0x38)
        }
        _ => "???".to_string(),
    }
}

/// 一條反組譯後的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u16,
    pub opcode: u8,
    pub operands: Vec<u8>,
    pub mnemonic: String,
}

impl Instruction {
    pub fn length(&self) -> u16 {
        1 + self.operands.len() as u16
    }
}

/// 從 `address` 反組譯一條指令；`read` 提供記憶體內容
pub fn disassemble<F: Fn(u16) -> u8>(address: u16, read: F) -> Instruction {
    let opcode = read(address);
    let length = INSTRUCTION_LENGTHS[opcode as usize] as u16;
    let operands: Vec<u8> = (1..length)
        .map(|i| read(address.wrapping_add(i)))
        .collect();

    let mnemonic = if opcode == 0xCB {
        bit::mnemonic(operands.first().copied().unwrap_or(0))
    } else {
        let text = template(opcode);
        match operands.as_slice() {
            [low, high] => text.replace("nn", &format!("${:04X}", u16::from_le_bytes([*low, *high]))),
            [value] if text.ends_with('e') => {
                // 相對跳躍顯示目標位址，SP 位移顯示有號值
                if text.starts_with("JR") {
                    let target = address
                        .wrapping_add(2)
                        .wrapping_add(*value as i8 as i16 as u16);
                    text.replace('e', &format!("${:04X}", target))
                } else {
                    text.replace('e', &format!("{}", *value as i8))
                }
            }
            [value] => text.replace('n', &format!("${:02X}", value)),
            _ => text,
        }
    };

    Instruction {
        address,
        opcode,
        operands,
        mnemonic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disasm(bytes: &[u8]) -> Instruction {
        let mut memory = bytes.to_vec();
        memory.resize(0x10, 0);
        disassemble(0, |addr| memory[addr as usize])
    }

    #[test]
    fn test_operand_lengths() {
        assert_eq!(disasm(&[0x00]).length(), 1);
        assert_eq!(disasm(&[0x3E, 0x12]).length(), 2);
        assert_eq!(disasm(&[0xC3, 0x50, 0x01]).length(), 3);
        assert_eq!(disasm(&[0xCB, 0x7C]).length(), 2);
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(disasm(&[0x3E, 0x12]).mnemonic, "LD A,$12");
        assert_eq!(disasm(&[0xC3, 0x50, 0x01]).mnemonic, "JP $0150");
        assert_eq!(disasm(&[0x21, 0x00, 0xC0]).mnemonic, "LD HL,$C000");
        assert_eq!(disasm(&[0xE0, 0x40]).mnemonic, "LDH ($40),A");
        assert_eq!(disasm(&[0x77]).mnemonic, "LD (HL),A");
        assert_eq!(disasm(&[0xAF]).mnemonic, "XOR A");
        assert_eq!(disasm(&[0xFE, 0x90]).mnemonic, "CP $90");
        assert_eq!(disasm(&[0xF5]).mnemonic, "PUSH AF");
        assert_eq!(disasm(&[0xFF]).mnemonic, "RST 38H");
        assert_eq!(disasm(&[0xCB, 0x7C]).mnemonic, "BIT 7,H");
        assert_eq!(disasm(&[0xD3]).mnemonic, "???");
    }

    #[test]
    fn test_relative_targets() {
        // JR NZ,-2 回到自己
        assert_eq!(disasm(&[0x20, 0xFE]).mnemonic, "JR NZ,$0000");
        assert_eq!(disasm(&[0xE8, 0xFE]).mnemonic, "ADD SP,-2");
        assert_eq!(disasm(&[0xF8, 0x05]).mnemonic, "LD HL,SP+5");
    }
}
