use super::common::{read_reg, write_reg, RegPair, RegTarget};
use super::cycles::*;
use super::load::sp_plus_offset;
use crate::cpu::flags::FlagOperations;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 處理所有算術指令的分派
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        // 8-bit 遞增/遞減
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            inc_r(cpu, mmu, RegTarget::from_bits(opcode >> 3))
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            dec_r(cpu, mmu, RegTarget::from_bits(opcode >> 3))
        }

        // 加法操作
        0x80..=0x87 => alu_r(cpu, mmu, opcode, add), // ADD A,r
        0x88..=0x8F => alu_r(cpu, mmu, opcode, adc), // ADC A,r
        0xC6 => alu_n(cpu, mmu, add),                // ADD A,n
        0xCE => alu_n(cpu, mmu, adc),                // ADC A,n

        // 減法操作
        0x90..=0x97 => alu_r(cpu, mmu, opcode, sub), // SUB A,r
        0x98..=0x9F => alu_r(cpu, mmu, opcode, sbc), // SBC A,r
        0xD6 => alu_n(cpu, mmu, sub),                // SUB A,n
        0xDE => alu_n(cpu, mmu, sbc),                // SBC A,n

        // 比較操作
        0xB8..=0xBF => alu_r(cpu, mmu, opcode, cp), // CP A,r
        0xFE => alu_n(cpu, mmu, cp),                // CP n

        // 16-bit 操作
        0x03 | 0x13 | 0x23 | 0x33 => step_rr(cpu, RegPair::from_bits(opcode), 1), // INC rr
        0x0B | 0x1B | 0x2B | 0x3B => step_rr(cpu, RegPair::from_bits(opcode), -1), // DEC rr
        0x09 | 0x19 | 0x29 | 0x39 => add_hl_rr(cpu, RegPair::from_bits(opcode)), // ADD HL,rr
        0xE8 => add_sp_n(cpu, mmu),                                               // ADD SP,n

        0x27 => daa(cpu), // DAA

        _ => super::control::undefined(cpu, opcode),
    }
}

type AluOp = fn(&mut CPU, u8);

fn alu_r(cpu: &mut CPU, mmu: &mut MMU, opcode: u8, op: AluOp) -> u8 {
    let target = RegTarget::from_bits(opcode);
    let value = read_reg(cpu, mmu, target);
    op(cpu, value);
    if target == RegTarget::HL {
        ALU_HL
    } else {
        ALU_R
    }
}

fn alu_n(cpu: &mut CPU, mmu: &mut MMU, op: AluOp) -> u8 {
    let value = cpu.fetch_byte(mmu);
    op(cpu, value);
    ALU_N
}

fn add_with_carry(cpu: &mut CPU, value: u8, carry_in: u8) {
    let a = cpu.registers.a;
    let result = a as u16 + value as u16 + carry_in as u16;
    let half = (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
    cpu.registers.a = result as u8;
    cpu.registers
        .update_flags(result as u8 == 0, false, half, result > 0xFF);
}

/// 回傳差值，並依減法規則設定標誌
fn sub_with_carry(cpu: &mut CPU, value: u8, carry_in: u8) -> u8 {
    let a = cpu.registers.a;
    let result = a.wrapping_sub(value).wrapping_sub(carry_in);
    let half = (a & 0x0F) < (value & 0x0F) + carry_in;
    let carry = (a as u16) < value as u16 + carry_in as u16;
    cpu.registers.update_flags(result == 0, true, half, carry);
    result
}

fn add(cpu: &mut CPU, value: u8) {
    add_with_carry(cpu, value, 0);
}

fn adc(cpu: &mut CPU, value: u8) {
    let carry = cpu.registers.get_c_flag() as u8;
    add_with_carry(cpu, value, carry);
}

fn sub(cpu: &mut CPU, value: u8) {
    cpu.registers.a = sub_with_carry(cpu, value, 0);
}

fn sbc(cpu: &mut CPU, value: u8) {
    let carry = cpu.registers.get_c_flag() as u8;
    cpu.registers.a = sub_with_carry(cpu, value, carry);
}

// CP 只設定標誌，A 不變
fn cp(cpu: &mut CPU, value: u8) {
    sub_with_carry(cpu, value, 0);
}

fn inc_r(cpu: &mut CPU, mmu: &mut MMU, target: RegTarget) -> u8 {
    let value = read_reg(cpu, mmu, target);
    let result = value.wrapping_add(1);
    write_reg(cpu, mmu, target, result);
    cpu.registers.set_z_flag(result == 0);
    cpu.registers.set_n_flag(false);
    cpu.registers.set_h_flag((value & 0x0F) == 0x0F);
    if target == RegTarget::HL {
        INC_HL_MEM
    } else {
        ALU_R
    }
}

fn dec_r(cpu: &mut CPU, mmu: &mut MMU, target: RegTarget) -> u8 {
    let value = read_reg(cpu, mmu, target);
    let result = value.wrapping_sub(1);
    write_reg(cpu, mmu, target, result);
    cpu.registers.set_z_flag(result == 0);
    cpu.registers.set_n_flag(true);
    cpu.registers.set_h_flag((value & 0x0F) == 0x00);
    if target == RegTarget::HL {
        INC_HL_MEM
    } else {
        ALU_R
    }
}

// INC rr / DEC rr 不影響標誌
fn step_rr(cpu: &mut CPU, pair: RegPair, step: i16) -> u8 {
    let value = pair.read(cpu).wrapping_add(step as u16);
    pair.write(cpu, value);
    INC_RR
}

fn add_hl_rr(cpu: &mut CPU, pair: RegPair) -> u8 {
    let hl = cpu.registers.get_hl();
    let value = pair.read(cpu);
    let (result, carry) = hl.overflowing_add(value);
    cpu.registers.set_n_flag(false);
    cpu.registers
        .set_h_flag((hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    cpu.registers.set_c_flag(carry);
    cpu.registers.set_hl(result);
    ADD_HL_RR
}

fn add_sp_n(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let offset = cpu.fetch_byte(mmu);
    cpu.registers.sp = sp_plus_offset(cpu, offset);
    ADD_SP_N
}

/// 十進位調整：依上一個運算的 N/H/C 修正 A
fn daa(cpu: &mut CPU) -> u8 {
    let mut a = cpu.registers.a;
    let mut correction = 0u8;
    let mut carry = cpu.registers.get_c_flag();

    if cpu.registers.get_n_flag() {
        if cpu.registers.get_h_flag() {
            correction |= 0x06;
        }
        if carry {
            correction |= 0x60;
        }
        a = a.wrapping_sub(correction);
    } else {
        if cpu.registers.get_h_flag() || (a & 0x0F) > 0x09 {
            correction |= 0x06;
        }
        if carry || a > 0x99 {
            correction |= 0x60;
            carry = true;
        }
        a = a.wrapping_add(correction);
    }

    cpu.registers.a = a;
    cpu.registers.set_z_flag(a == 0);
    cpu.registers.set_h_flag(false);
    cpu.registers.set_c_flag(carry);
    ALU_R
}
