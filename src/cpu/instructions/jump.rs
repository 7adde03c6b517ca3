use super::common::Condition;
use super::cycles::*;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 處理跳躍、呼叫、返回與 RST 指令
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        0x18 => jr(cpu, mmu, true),                                     // JR e
        0x20 | 0x28 | 0x30 | 0x38 => {
            let taken = Condition::from_bits(opcode).check(cpu);
            jr(cpu, mmu, taken) // JR cc,e
        }
        0xC3 => jp(cpu, mmu, true), // JP nn
        0xC2 | 0xCA | 0xD2 | 0xDA => {
            let taken = Condition::from_bits(opcode).check(cpu);
            jp(cpu, mmu, taken) // JP cc,nn
        }
        0xE9 => {
            cpu.registers.pc = cpu.registers.get_hl(); // JP HL
            JP_HL
        }
        0xCD => call(cpu, mmu, true), // CALL nn
        0xC4 | 0xCC | 0xD4 | 0xDC => {
            let taken = Condition::from_bits(opcode).check(cpu);
            call(cpu, mmu, taken) // CALL cc,nn
        }
        0xC9 => ret(cpu, mmu), // RET
        0xD9 => {
            // RETI 立即啟用 IME
            cpu.ime = true;
            cpu.ime_scheduled = false;
            ret(cpu, mmu)
        }
        0xC0 | 0xC8 | 0xD0 | 0xD8 => {
            if Condition::from_bits(opcode).check(cpu) {
                ret(cpu, mmu);
                RET_CC_TAKEN
            } else {
                RET_CC_NOT_TAKEN
            }
        }
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => rst(cpu, mmu, opcode & 0x38),
        _ => super::control::undefined(cpu, opcode),
    }
}

fn jr(cpu: &mut CPU, mmu: &mut MMU, taken: bool) -> u8 {
    let offset = cpu.fetch_byte(mmu) as i8;
    if taken {
        cpu.registers.pc = cpu.registers.pc.wrapping_add(offset as i16 as u16);
        JR
    } else {
        JR_NOT_TAKEN
    }
}

fn jp(cpu: &mut CPU, mmu: &mut MMU, taken: bool) -> u8 {
    let addr = cpu.fetch_word(mmu);
    if taken {
        cpu.registers.pc = addr;
        JP
    } else {
        JP_NOT_TAKEN
    }
}

fn call(cpu: &mut CPU, mmu: &mut MMU, taken: bool) -> u8 {
    let addr = cpu.fetch_word(mmu);
    if !taken {
        return CALL_NOT_TAKEN;
    }
    let return_addr = cpu.registers.pc;
    cpu.push_word(mmu, return_addr);
    cpu.registers.pc = addr;
    CALL
}

fn ret(cpu: &mut CPU, mmu: &mut MMU) -> u8 {
    cpu.registers.pc = cpu.pop_word(mmu);
    RET
}

fn rst(cpu: &mut CPU, mmu: &mut MMU, vector: u8) -> u8 {
    let return_addr = cpu.registers.pc;
    cpu.push_word(mmu, return_addr);
    cpu.registers.pc = vector as u16;
    RST
}

#[cfg(test)]
mod tests {
    use crate::cpu::flags::FlagOperations;
    use crate::cpu::tests::setup;

    #[test]
    fn test_jr_backwards() {
        let (mut cpu, mut mmu) = setup(&[0x00, 0x18, 0xFD]); // NOP ; JR -3
        cpu.step(&mut mmu);
        assert_eq!(cpu.step(&mut mmu), 12);
        assert_eq!(cpu.registers.pc, 0xC000);
    }

    #[test]
    fn test_conditional_jump_cycles() {
        let (mut cpu, mut mmu) = setup(&[0xC2, 0x00, 0xD0, 0xCA, 0x00, 0xD0]);
        cpu.registers.set_z_flag(true);
        // JP NZ 不跳
        assert_eq!(cpu.step(&mut mmu), 12);
        assert_eq!(cpu.registers.pc, 0xC003);
        // JP Z 跳
        assert_eq!(cpu.step(&mut mmu), 16);
        assert_eq!(cpu.registers.pc, 0xD000);
    }

    #[test]
    fn test_call_and_ret() {
        let (mut cpu, mut mmu) = setup(&[0xCD, 0x00, 0xC1]);
        mmu.write_byte(0xC100, 0xC9); // RET
        cpu.registers.sp = 0xD000;
        assert_eq!(cpu.step(&mut mmu), 24);
        assert_eq!(cpu.registers.pc, 0xC100);
        assert_eq!(cpu.registers.sp, 0xCFFE);
        assert_eq!(mmu.read_word(0xCFFE), 0xC003);

        assert_eq!(cpu.step(&mut mmu), 16);
        assert_eq!(cpu.registers.pc, 0xC003);
        assert_eq!(cpu.registers.sp, 0xD000);
    }

    #[test]
    fn test_ret_conditional_cycles() {
        let (mut cpu, mut mmu) = setup(&[0xC0, 0xC8]); // RET NZ ; RET Z
        cpu.registers.sp = 0xD000;
        mmu.write_word(0xD000, 0xC123);
        cpu.registers.set_z_flag(true);
        assert_eq!(cpu.step(&mut mmu), 8);
        assert_eq!(cpu.step(&mut mmu), 20);
        assert_eq!(cpu.registers.pc, 0xC123);
    }

    #[test]
    fn test_rst_pushes_return_address() {
        let (mut cpu, mut mmu) = setup(&[0xEF]); // RST 28
        cpu.registers.sp = 0xD000;
        assert_eq!(cpu.step(&mut mmu), 16);
        assert_eq!(cpu.registers.pc, 0x0028);
        assert_eq!(mmu.read_word(0xCFFE), 0xC001);
    }

    #[test]
    fn test_reti_enables_interrupts_immediately() {
        let (mut cpu, mut mmu) = setup(&[0xD9]);
        cpu.registers.sp = 0xD000;
        mmu.write_word(0xD000, 0xC050);
        cpu.step(&mut mmu);
        assert!(cpu.ime);
        assert_eq!(cpu.registers.pc, 0xC050);
    }
}
