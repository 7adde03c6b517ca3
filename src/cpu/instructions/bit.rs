use super::common::{read_reg, write_reg, RegTarget};
use super::cycles::*;
use crate::cpu::flags::FlagOperations;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 處理 CB 前綴指令；回傳值不含前綴本身的 4 個週期
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, cb_opcode: u8) -> u8 {
    let target = RegTarget::from_bits(cb_opcode);
    let bit = (cb_opcode >> 3) & 0x07;
    let value = read_reg(cpu, mmu, target);

    match cb_opcode {
        0x40..=0x7F => {
            // BIT 不寫回
            cpu.registers.set_z_flag(value & (1 << bit) == 0);
            cpu.registers.set_n_flag(false);
            cpu.registers.set_h_flag(true);
            return if target == RegTarget::HL {
                CB_BIT_HL
            } else {
                CB_R
            };
        }
        0x80..=0xBF => write_reg(cpu, mmu, target, value & !(1 << bit)), // RES
        0xC0..=0xFF => write_reg(cpu, mmu, target, value | (1 << bit)),  // SET
        _ => {
            let result = shift(cpu, cb_opcode >> 3, value);
            write_reg(cpu, mmu, target, result);
        }
    }

    if target == RegTarget::HL {
        CB_HL
    } else {
        CB_R
    }
}

/// 旋轉/移位 (CB 00-3F)，Z 依結果設定
fn shift(cpu: &mut CPU, operation: u8, value: u8) -> u8 {
    let carry_in = cpu.registers.get_c_flag() as u8;
    let (result, carry) = match operation & 0x07 {
        0 => (value.rotate_left(1), value & 0x80 != 0),          // RLC
        1 => (value.rotate_right(1), value & 0x01 != 0),         // RRC
        2 => ((value << 1) | carry_in, value & 0x80 != 0),       // RL
        3 => ((value >> 1) | (carry_in << 7), value & 0x01 != 0), // RR
        4 => (value << 1, value & 0x80 != 0),                    // SLA
        5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0), // SRA
        6 => (value.rotate_left(4), false),                      // SWAP
        _ => (value >> 1, value & 0x01 != 0),                    // SRL
    };
    cpu.registers.update_flags(result == 0, false, false, carry);
    result
}

/// CB 指令助記符，例如 "BIT 7,H"
pub fn mnemonic(cb_opcode: u8) -> String {
    const SHIFTS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];
    let target = RegTarget::from_bits(cb_opcode).name();
    let bit = (cb_opcode >> 3) & 0x07;
    match cb_opcode {
        0x00..=0x3F => format!("{} {}", SHIFTS[bit as usize], target),
        0x40..=0x7F => format!("BIT {},{}", bit, target),
        0x80..=0xBF => format!("RES {},{}", bit, target),
        _ => format!("SET {},{}", bit, target),
    }
}
