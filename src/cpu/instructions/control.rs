use super::cycles::*;
use crate::cpu::CPU;
use crate::mmu::MMU;
use log::warn;

/// 處理 NOP、STOP、HALT、DI、EI
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        0x00 => NOP,
        0x10 => {
            // STOP 後面帶一個填充位元組
            cpu.fetch_byte(mmu);
            cpu.stopped = true;
            NOP
        }
        0x76 => {
            cpu.halted = true;
            NOP
        }
        0xF3 => {
            cpu.ime = false;
            cpu.ime_scheduled = false;
            NOP
        }
        0xFB => {
            // 下一條指令結束後才生效
            cpu.ime_scheduled = true;
            NOP
        }
        _ => undefined(cpu, opcode),
    }
}

/// 未定義的操作碼讓 CPU 鎖死，之後每一步只消耗時間
pub fn undefined(cpu: &mut CPU, opcode: u8) -> u8 {
    warn!(
        "未定義的操作碼 0x{:02X} 位於 0x{:04X}，CPU 鎖死",
        opcode,
        cpu.registers.pc.wrapping_sub(1)
    );
    cpu.lock();
    NOP
}
