use crate::cpu::CPU;
use crate::mmu::MMU;

mod arithmetic;
pub mod bit;
pub mod common;
pub(crate) mod control;
pub mod cycles;
mod jump;
mod load;
mod logic;

/// 依操作碼分派到各指令群組，回傳消耗的 T-cycles
pub fn dispatch(cpu: &mut CPU, mmu: &mut MMU, opcode: u8) -> u8 {
    match opcode {
        // 控制指令
        0x00 | 0x10 | 0x76 | 0xF3 | 0xFB => control::dispatch(cpu, mmu, opcode),

        // 相對跳躍
        0x18 | 0x20 | 0x28 | 0x30 | 0x38 => jump::dispatch(cpu, mmu, opcode),
        // 絕對跳躍、呼叫與返回
        0xC0 | 0xC2 | 0xC3 | 0xC4 | 0xC8 | 0xC9 | 0xCA | 0xCC | 0xCD => {
            jump::dispatch(cpu, mmu, opcode)
        }
        0xD0 | 0xD2 | 0xD4 | 0xD8 | 0xD9 | 0xDA | 0xDC => jump::dispatch(cpu, mmu, opcode),
        0xE9 => jump::dispatch(cpu, mmu, opcode), // JP HL
        // RST
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => jump::dispatch(cpu, mmu, opcode),

        // CB 前綴
        0xCB => {
            let cb_opcode = cpu.fetch_byte(mmu);
            cycles::CB_PREFIX + bit::dispatch(cpu, mmu, cb_opcode)
        }

        // 8-bit 載入
        0x40..=0x75 | 0x77..=0x7F => load::dispatch(cpu, mmu, opcode),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => load::dispatch(cpu, mmu, opcode),
        0x02 | 0x12 | 0x22 | 0x32 | 0x0A | 0x1A | 0x2A | 0x3A => load::dispatch(cpu, mmu, opcode),
        0xE0 | 0xF0 | 0xE2 | 0xF2 | 0xEA | 0xFA => load::dispatch(cpu, mmu, opcode),
        // 16-bit 載入與堆疊
        0x01 | 0x11 | 0x21 | 0x31 | 0x08 | 0xF8 | 0xF9 => load::dispatch(cpu, mmu, opcode),
        0xC1 | 0xD1 | 0xE1 | 0xF1 | 0xC5 | 0xD5 | 0xE5 | 0xF5 => load::dispatch(cpu, mmu, opcode),

        // 8-bit 遞增/遞減
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            arithmetic::dispatch(cpu, mmu, opcode)
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            arithmetic::dispatch(cpu, mmu, opcode)
        }
        // 16-bit 算術
        0x03 | 0x13 | 0x23 | 0x33 | 0x0B | 0x1B | 0x2B | 0x3B => {
            arithmetic::dispatch(cpu, mmu, opcode)
        }
        0x09 | 0x19 | 0x29 | 0x39 | 0xE8 => arithmetic::dispatch(cpu, mmu, opcode),
        // ADD/ADC/SUB/SBC/CP 與 DAA
        0x80..=0x9F | 0xB8..=0xBF | 0xC6 | 0xCE | 0xD6 | 0xDE | 0xFE | 0x27 => {
            arithmetic::dispatch(cpu, mmu, opcode)
        }

        // 邏輯運算與累加器旋轉
        0xA0..=0xB7 | 0xE6 | 0xEE | 0xF6 => logic::dispatch(cpu, mmu, opcode),
        0x07 | 0x0F | 0x17 | 0x1F | 0x2F | 0x37 | 0x3F => logic::dispatch(cpu, mmu, opcode),

        // 未定義操作碼：D3 DB DD E3 E4 EB EC ED F4 FC FD
        _ => control::undefined(cpu, opcode),
    }
}
