use super::common::{read_reg, RegTarget};
use super::cycles::*;
use crate::cpu::flags::FlagOperations;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 處理邏輯運算與累加器旋轉指令
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        0xA0..=0xA7 => logic_r(cpu, mmu, opcode, and), // AND r
        0xA8..=0xAF => logic_r(cpu, mmu, opcode, xor), // XOR r
        0xB0..=0xB7 => logic_r(cpu, mmu, opcode, or),  // OR r
        0xE6 => logic_n(cpu, mmu, and),                // AND n
        0xEE => logic_n(cpu, mmu, xor),                // XOR n
        0xF6 => logic_n(cpu, mmu, or),                 // OR n

        // 累加器旋轉，Z 一律清除
        0x07 => rlca(cpu),
        0x0F => rrca(cpu),
        0x17 => rla(cpu),
        0x1F => rra(cpu),

        0x2F => cpl(cpu),
        0x37 => scf(cpu),
        0x3F => ccf(cpu),

        _ => super::control::undefined(cpu, opcode),
    }
}

fn logic_r(cpu: &mut CPU, mmu: &mut MMU, opcode: u8, op: fn(&mut CPU, u8)) -> u8 {
    let target = RegTarget::from_bits(opcode);
    let value = read_reg(cpu, mmu, target);
    op(cpu, value);
    if target == RegTarget::HL {
        ALU_HL
    } else {
        ALU_R
    }
}

fn logic_n(cpu: &mut CPU, mmu: &mut MMU, op: fn(&mut CPU, u8)) -> u8 {
    let value = cpu.fetch_byte(mmu);
    op(cpu, value);
    ALU_N
}

fn and(cpu: &mut CPU, value: u8) {
    cpu.registers.a &= value;
    let zero = cpu.registers.a == 0;
    cpu.registers.update_flags(zero, false, true, false);
}

fn xor(cpu: &mut CPU, value: u8) {
    cpu.registers.a ^= value;
    let zero = cpu.registers.a == 0;
    cpu.registers.update_flags(zero, false, false, false);
}

fn or(cpu: &mut CPU, value: u8) {
    cpu.registers.a |= value;
    let zero = cpu.registers.a == 0;
    cpu.registers.update_flags(zero, false, false, false);
}

fn rlca(cpu: &mut CPU) -> u8 {
    let a = cpu.registers.a;
    cpu.registers.a = a.rotate_left(1);
    cpu.registers.update_flags(false, false, false, a & 0x80 != 0);
    ALU_R
}

fn rrca(cpu: &mut CPU) -> u8 {
    let a = cpu.registers.a;
    cpu.registers.a = a.rotate_right(1);
    cpu.registers.update_flags(false, false, false, a & 0x01 != 0);
    ALU_R
}

fn rla(cpu: &mut CPU) -> u8 {
    let a = cpu.registers.a;
    let carry_in = cpu.registers.get_c_flag() as u8;
    cpu.registers.a = (a << 1) | carry_in;
    cpu.registers.update_flags(false, false, false, a & 0x80 != 0);
    ALU_R
}

fn rra(cpu: &mut CPU) -> u8 {
    let a = cpu.registers.a;
    let carry_in = (cpu.registers.get_c_flag() as u8) << 7;
    cpu.registers.a = (a >> 1) | carry_in;
    cpu.registers.update_flags(false, false, false, a & 0x01 != 0);
    ALU_R
}

fn cpl(cpu: &mut CPU) -> u8 {
    cpu.registers.a = !cpu.registers.a;
    cpu.registers.set_n_flag(true);
    cpu.registers.set_h_flag(true);
    ALU_R
}

fn scf(cpu: &mut CPU) -> u8 {
    cpu.registers.set_n_flag(false);
    cpu.registers.set_h_flag(false);
    cpu.registers.set_c_flag(true);
    ALU_R
}

fn ccf(cpu: &mut CPU) -> u8 {
    let carry = cpu.registers.get_c_flag();
    cpu.registers.set_n_flag(false);
    cpu.registers.set_h_flag(false);
    cpu.registers.set_c_flag(!carry);
    ALU_R
}

#[cfg(test)]
mod tests {
    use crate::cpu::flags::FlagOperations;
    use crate::cpu::tests::setup;

    #[test]
    fn test_and_sets_half_carry() {
        let (mut cpu, mut mmu) = setup(&[0xE6, 0x0F]);
        cpu.registers.a = 0xF0;
        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.a, 0);
        assert!(cpu.registers.get_z_flag());
        assert!(cpu.registers.get_h_flag());
        assert!(!cpu.registers.get_c_flag());
    }

    #[test]
    fn test_xor_a_clears_a() {
        let (mut cpu, mut mmu) = setup(&[0xAF]);
        cpu.registers.a = 0x5A;
        cpu.registers.set_c_flag(true);
        assert_eq!(cpu.step(&mut mmu), 4);
        assert_eq!(cpu.registers.a, 0);
        assert_eq!(cpu.registers.f(), 0x80);
    }

    #[test]
    fn test_or_hl_memory() {
        let (mut cpu, mut mmu) = setup(&[0xB6]);
        cpu.registers.set_hl(0xC100);
        mmu.write_byte(0xC100, 0x0F);
        cpu.registers.a = 0x30;
        assert_eq!(cpu.step(&mut mmu), 8);
        assert_eq!(cpu.registers.a, 0x3F);
        assert!(!cpu.registers.get_z_flag());
    }

    #[test]
    fn test_accumulator_rotates_clear_zero() {
        let (mut cpu, mut mmu) = setup(&[0x07, 0x17, 0x0F, 0x1F]);
        cpu.registers.a = 0x80;
        cpu.step(&mut mmu); // RLCA
        assert_eq!(cpu.registers.a, 0x01);
        assert!(cpu.registers.get_c_flag());

        cpu.registers.a = 0x80;
        cpu.step(&mut mmu); // RLA 帶入 C=1
        assert_eq!(cpu.registers.a, 0x01);
        assert!(cpu.registers.get_c_flag());

        cpu.registers.a = 0x01;
        cpu.step(&mut mmu); // RRCA
        assert_eq!(cpu.registers.a, 0x80);
        assert!(cpu.registers.get_c_flag());

        cpu.registers.a = 0x00;
        cpu.registers.set_c_flag(false);
        cpu.step(&mut mmu); // RRA
        assert_eq!(cpu.registers.a, 0x00);
        assert!(!cpu.registers.get_z_flag());
    }

    #[test]
    fn test_cpl_scf_ccf() {
        let (mut cpu, mut mmu) = setup(&[0x2F, 0x37, 0x3F]);
        cpu.registers.a = 0x35;
        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.a, 0xCA);
        assert!(cpu.registers.get_n_flag() && cpu.registers.get_h_flag());

        cpu.step(&mut mmu);
        assert!(cpu.registers.get_c_flag());
        assert!(!cpu.registers.get_n_flag() && !cpu.registers.get_h_flag());

        cpu.step(&mut mmu);
        assert!(!cpu.registers.get_c_flag());
    }
}
