use super::common::{read_reg, write_reg, RegPair, RegTarget};
use super::cycles::*;
use crate::cpu::flags::FlagOperations;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 處理所有載入指令的分派
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        // 寄存器間載入指令（0x76 HALT 在控制指令處理）
        0x40..=0x7F => ld_r_r(
            cpu,
            mmu,
            RegTarget::from_bits(opcode >> 3),
            RegTarget::from_bits(opcode),
        ),

        // LD r,n / LD (HL),n
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            ld_r_n(cpu, mmu, RegTarget::from_bits(opcode >> 3))
        }

        // 16-bit 載入指令
        0x01 | 0x11 | 0x21 | 0x31 => ld_rr_nn(cpu, mmu, RegPair::from_bits(opcode)),
        0xF9 => ld_sp_hl(cpu),
        0xF8 => ld_hl_sp_n(cpu, mmu),
        0x08 => ld_nn_addr_sp(cpu, mmu),

        // 8-bit 記憶體載入指令
        0x02 => ld_addr_a(cpu, mmu, RegPair::BC), // LD (BC),A
        0x12 => ld_addr_a(cpu, mmu, RegPair::DE), // LD (DE),A
        0x0A => ld_a_addr(cpu, mmu, RegPair::BC), // LD A,(BC)
        0x1A => ld_a_addr(cpu, mmu, RegPair::DE), // LD A,(DE)

        // HL 增減載入指令
        0x22 => ld_hl_a_step(cpu, mmu, 1),      // LD (HL+),A
        0x32 => ld_hl_a_step(cpu, mmu, -1),     // LD (HL-),A
        0x2A => ld_a_hl_step(cpu, mmu, 1),      // LD A,(HL+)
        0x3A => ld_a_hl_step(cpu, mmu, -1),     // LD A,(HL-)

        // 16-bit 位址載入指令
        0xEA => ld_nn_addr_a(cpu, mmu), // LD (nn),A
        0xFA => ld_a_nn_addr(cpu, mmu), // LD A,(nn)

        // 高記憶體區域載入指令
        0xE0 => ldh_n_a(cpu, mmu), // LDH (n),A
        0xF0 => ldh_a_n(cpu, mmu), // LDH A,(n)
        0xE2 => ldh_c_a(cpu, mmu), // LD (C),A
        0xF2 => ldh_a_c(cpu, mmu), // LD A,(C)

        // 堆疊操作指令
        0xC1 | 0xD1 | 0xE1 | 0xF1 => pop_rr(cpu, mmu, RegPair::stack_from_bits(opcode)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => push_rr(cpu, mmu, RegPair::stack_from_bits(opcode)),

        _ => super::control::undefined(cpu, opcode),
    }
}

fn ld_r_r(cpu: &mut CPU, mmu: &mut MMU, dst: RegTarget, src: RegTarget) -> u8 {
    let value = read_reg(cpu, mmu, src);
    write_reg(cpu, mmu, dst, value);
    if dst == RegTarget::HL || src == RegTarget::HL {
        LD_R_HL
    } else {
        LD_R_R
    }
}

fn ld_r_n(cpu: &mut CPU, mmu: &mut MMU, dst: RegTarget) -> u8 {
    let value = cpu.fetch_byte(mmu);
    write_reg(cpu, mmu, dst, value);
    if dst == RegTarget::HL {
        LD_HL_N
    } else {
        LD_R_N
    }
}

fn ld_rr_nn(cpu: &mut CPU, mmu: &mut MMU, pair: RegPair) -> u8 {
    let value = cpu.fetch_word(mmu);
    pair.write(cpu, value);
    LD_RR_NN
}

fn ld_sp_hl(cpu: &mut CPU) -> u8 {
    cpu.registers.sp = cpu.registers.get_hl();
    LD_SP_HL
}

fn ld_hl_sp_n(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let offset = cpu.fetch_byte(mmu);
    let result = sp_plus_offset(cpu, offset);
    cpu.registers.set_hl(result);
    LD_HL_SP_N
}

/// SP + 有符號位移；H/C 來自低位元組的無號加法，Z/N 清除
pub fn sp_plus_offset(cpu: &mut CPU, offset: u8) -> u16 {
    let sp = cpu.registers.sp;
    let half = (sp & 0x000F) + (offset as u16 & 0x000F) > 0x000F;
    let carry = (sp & 0x00FF) + offset as u16 > 0x00FF;
    cpu.registers.update_flags(false, false, half, carry);
    sp.wrapping_add(offset as i8 as i16 as u16)
}

fn ld_nn_addr_sp(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let addr = cpu.fetch_word(mmu);
    mmu.write_word(addr, cpu.registers.sp);
    LD_NN_SP
}

fn ld_addr_a(cpu: &mut CPU, mmu: &mut MMU, pair: RegPair) -> u8 {
    mmu.write_byte(pair.read(cpu), cpu.registers.a);
    LD_RR_A
}

fn ld_a_addr(cpu: &mut CPU, mmu: &mut MMU, pair: RegPair) -> u8 {
    cpu.registers.a = mmu.read_byte(pair.read(cpu));
    LD_RR_A
}

fn ld_hl_a_step(cpu: &mut CPU, mmu: &mut MMU, step: i16) -> u8 {
    let hl = cpu.registers.get_hl();
    mmu.write_byte(hl, cpu.registers.a);
    cpu.registers.set_hl(hl.wrapping_add(step as u16));
    LD_RR_A
}

fn ld_a_hl_step(cpu: &mut CPU, mmu: &mut MMU, step: i16) -> u8 {
    let hl = cpu.registers.get_hl();
    cpu.registers.a = mmu.read_byte(hl);
    cpu.registers.set_hl(hl.wrapping_add(step as u16));
    LD_RR_A
}

fn ld_nn_addr_a(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let addr = cpu.fetch_word(mmu);
    mmu.write_byte(addr, cpu.registers.a);
    LD_A_NN
}

fn ld_a_nn_addr(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let addr = cpu.fetch_word(mmu);
    cpu.registers.a = mmu.read_byte(addr);
    LD_A_NN
}

fn ldh_n_a(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let offset = cpu.fetch_byte(mmu);
    mmu.write_byte(0xFF00 | offset as u16, cpu.registers.a);
    LDH_N
}

fn ldh_a_n(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    let offset = cpu.fetch_byte(mmu);
    cpu.registers.a = mmu.read_byte(0xFF00 | offset as u16);
    LDH_N
}

fn ldh_c_a(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    mmu.write_byte(0xFF00 | cpu.registers.c as u16, cpu.registers.a);
    LDH_C
}

fn ldh_a_c(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    cpu.registers.a = mmu.read_byte(0xFF00 | cpu.registers.c as u16);
    LDH_C
}

fn push_rr(cpu: &mut CPU, mmu: &mut MMU, pair: RegPair) -> u8 {
    let value = pair.read(cpu);
    cpu.push_word(mmu, value);
    PUSH
}

fn pop_rr(cpu: &mut CPU, mmu: &mut MMU, pair: RegPair) -> u8 {
    let value = cpu.pop_word(mmu);
    pair.write(cpu, value);
    POP
}
