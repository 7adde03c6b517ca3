pub mod flags;
pub mod instructions;
pub mod opcodes;
pub mod registers;

use self::instructions::cycles::{CYCLES_1, INTERRUPT_DISPATCH};
use self::registers::Registers;
use crate::interrupts::InterruptType;
use crate::mmu::MMU;
use log::trace;

pub const CPU_CLOCK_SPEED: u32 = 4_194_304; // 4.194304 MHz

#[derive(Debug, Clone)]
pub struct CPU {
    pub registers: Registers,
    pub ime: bool,           // 中斷主使能標誌
    pub ime_scheduled: bool, // EI 之後等待一條指令
    pub halted: bool,        // HALT 狀態
    pub stopped: bool,       // STOP 狀態
    locked: bool,            // 執行到未定義操作碼
    total_cycles: u64,
    instruction_count: u64,
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

impl CPU {
    /// 以跳過啟動 ROM 後的狀態建立
    pub fn new() -> CPU {
        CPU {
            registers: Registers::new(),
            ime: false,
            ime_scheduled: false,
            halted: false,
            stopped: false,
            locked: false,
            total_cycles: 0,
            instruction_count: 0,
        }
    }

    /// 有啟動 ROM 時從 0x0000 全零開始，否則直接套用啟動後的值
    pub fn reset(&mut self, boot_rom: bool) {
        *self = CPU::new();
        if boot_rom {
            self.registers = Registers::default();
        }
    }

    /// 執行一條指令（或一次等待）並返回消耗的時脈週期數
    pub fn step(&mut self, mmu: &mut MMU) -> u8 {
        let cycles = self.execute(mmu);
        self.total_cycles += cycles as u64;
        cycles
    }

    fn execute(&mut self, mmu: &mut MMU) -> u8 {
        if self.locked {
            return CYCLES_1;
        }

        if self.stopped {
            if !mmu.interrupts.is_requested(InterruptType::Joypad) {
                return CYCLES_1;
            }
            self.stopped = false;
        }

        if self.halted {
            if mmu.interrupts.pending() == 0 {
                return CYCLES_1;
            }
            // 有中斷待處理即喚醒，與 IME 無關
            self.halted = false;
            return CYCLES_1 + self.handle_interrupts(mmu);
        }

        let pending_enable = self.ime_scheduled;
        let pc = self.registers.pc;
        let opcode = self.fetch_byte(mmu);
        trace!(
            "PC={:04X} OP={:02X} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
            pc,
            opcode,
            self.registers.get_af(),
            self.registers.get_bc(),
            self.registers.get_de(),
            self.registers.get_hl(),
            self.registers.sp
        );

        let mut cycles = instructions::dispatch(self, mmu, opcode);
        self.instruction_count += 1;

        if pending_enable && self.ime_scheduled {
            self.ime = true;
            self.ime_scheduled = false;
        }

        cycles += self.handle_interrupts(mmu);
        cycles
    }

    /// 服務最高優先權的中斷，回傳額外消耗的週期
    fn handle_interrupts(&mut self, mmu: &mut MMU) -> u8 {
        if !self.ime {
            return 0;
        }
        let Some(interrupt) = mmu.interrupts.get_highest_priority_interrupt() else {
            return 0;
        };

        mmu.interrupts.acknowledge_interrupt(interrupt);
        self.ime = false;
        // HALT/STOP 與中斷同一步進入時，跳到向量前先離開低功耗狀態
        self.halted = false;
        if interrupt == InterruptType::Joypad {
            self.stopped = false;
        }
        let pc = self.registers.pc;
        self.push_word(mmu, pc);
        self.registers.pc = interrupt.vector();
        trace!("服務中斷 {:?} -> {:04X}", interrupt, interrupt.vector());
        INTERRUPT_DISPATCH
    }

    pub fn fetch_byte(&mut self, mmu: &MMU) -> u8 {
        let value = mmu.read_byte(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        value
    }

    pub fn fetch_word(&mut self, mmu: &MMU) -> u16 {
        let low = self.fetch_byte(mmu) as u16;
        let high = self.fetch_byte(mmu) as u16;
        (high << 8) | low
    }

    /// 低位元組寫在 SP，高位元組在 SP+1
    pub fn push_word(&mut self, mmu: &mut MMU, value: u16) {
        self.registers.sp = self.registers.sp.wrapping_sub(2);
        mmu.write_word(self.registers.sp, value);
    }

    pub fn pop_word(&mut self, mmu: &MMU) -> u16 {
        let value = mmu.read_word(self.registers.sp);
        self.registers.sp = self.registers.sp.wrapping_add(2);
        value
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cpu::flags::FlagOperations;
    use crate::interrupts::registers::{IE_REGISTER, IF_REGISTER};

    pub const PROGRAM_START: u16 = 0xC000;

    /// 把程式放進 WRAM 並將 PC 指向它
    pub fn setup(program: &[u8]) -> (CPU, MMU) {
        let mut mmu = MMU::new();
        for (i, byte) in program.iter().enumerate() {
            mmu.write_byte(PROGRAM_START + i as u16, *byte);
        }
        let mut cpu = CPU::new();
        cpu.registers.pc = PROGRAM_START;
        (cpu, mmu)
    }

    pub fn run_program(program: &[u8], steps: usize) -> (CPU, MMU, Vec<u8>) {
        let (mut cpu, mut mmu) = setup(program);
        let cycles = (0..steps).map(|_| cpu.step(&mut mmu)).collect();
        (cpu, mmu, cycles)
    }

    #[test]
    fn test_nop_changes_only_pc() {
        let (mut cpu, mut mmu) = setup(&[0x00]);
        let before = cpu.registers.clone();
        assert_eq!(cpu.step(&mut mmu), 4);
        let mut expected = before;
        expected.pc = PROGRAM_START + 1;
        assert_eq!(cpu.registers, expected);
    }

    #[test]
    fn test_lower_interrupt_serviced_first() {
        let (mut cpu, mut mmu) = setup(&[0x00]);
        cpu.ime = true;
        cpu.registers.sp = 0xD000;
        mmu.write_byte(IE_REGISTER, 0x05);
        mmu.write_byte(IF_REGISTER, 0x05);

        assert_eq!(cpu.step(&mut mmu), 24);
        assert_eq!(cpu.registers.pc, 0x0040);
        assert!(!cpu.ime);
        assert_eq!(mmu.read_byte(IF_REGISTER) & 0x1F, 0x04);
        assert_eq!(mmu.read_word(0xCFFE), PROGRAM_START + 1);
    }

    #[test]
    fn test_no_service_without_ime() {
        let (mut cpu, mut mmu) = setup(&[0x00]);
        mmu.write_byte(IE_REGISTER, 0x01);
        mmu.write_byte(IF_REGISTER, 0x01);
        assert_eq!(cpu.step(&mut mmu), 4);
        assert_eq!(cpu.registers.pc, PROGRAM_START + 1);
    }

    #[test]
    fn test_ei_takes_effect_after_next_instruction() {
        let (mut cpu, mut mmu) = setup(&[0xFB, 0x00, 0x00]);
        mmu.write_byte(IE_REGISTER, 0x01);
        mmu.write_byte(IF_REGISTER, 0x01);

        assert_eq!(cpu.step(&mut mmu), 4);
        assert!(!cpu.ime);
        assert_eq!(cpu.registers.pc, PROGRAM_START + 1);

        assert_eq!(cpu.step(&mut mmu), 24);
        assert_eq!(cpu.registers.pc, 0x0040);
    }

    #[test]
    fn test_di_cancels_scheduled_ei() {
        let (mut cpu, mut mmu) = setup(&[0xFB, 0xF3, 0x00]);
        cpu.step(&mut mmu);
        cpu.step(&mut mmu);
        cpu.step(&mut mmu);
        assert!(!cpu.ime);
    }

    #[test]
    fn test_halt_wakes_without_ime() {
        let (mut cpu, mut mmu) = setup(&[0x76, 0x3C]); // HALT ; INC A
        mmu.write_byte(IE_REGISTER, 0x04);
        mmu.write_byte(IF_REGISTER, 0x00);
        cpu.registers.a = 0;

        cpu.step(&mut mmu);
        assert!(cpu.halted);
        assert_eq!(cpu.step(&mut mmu), 4);
        assert!(cpu.halted);

        mmu.request_interrupt(InterruptType::Timer);
        assert_eq!(cpu.step(&mut mmu), 4);
        assert!(!cpu.halted);
        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.a, 1);
    }

    #[test]
    fn test_halt_services_interrupt_with_ime() {
        let (mut cpu, mut mmu) = setup(&[0x76]);
        cpu.ime = true;
        mmu.write_byte(IE_REGISTER, 0x04);
        mmu.write_byte(IF_REGISTER, 0x00);
        cpu.step(&mut mmu);

        mmu.request_interrupt(InterruptType::Timer);
        assert_eq!(cpu.step(&mut mmu), 24);
        assert_eq!(cpu.registers.pc, 0x0050);
    }

    #[test]
    fn test_halt_with_interrupt_already_pending_runs_handler() {
        // EI ; HALT 等待中斷的寫法：進入 HALT 時中斷已在排隊
        let (mut cpu, mut mmu) = setup(&[0x76]);
        cpu.ime = true;
        cpu.registers.sp = 0xD000;
        mmu.write_byte(IE_REGISTER, 0x04);
        mmu.write_byte(IF_REGISTER, 0x04);

        assert_eq!(cpu.step(&mut mmu), 24);
        assert_eq!(cpu.registers.pc, 0x0050);
        assert!(!cpu.halted);
        assert_eq!(mmu.read_word(0xCFFE), PROGRAM_START + 1);

        // 沒有卡匣時 0x0050 讀到 0xFF (RST 38)，處理程式確實在執行
        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.pc, 0x0038);
    }

    #[test]
    fn test_stop_with_joypad_pending_runs_handler() {
        let (mut cpu, mut mmu) = setup(&[0x10, 0x00]);
        cpu.ime = true;
        cpu.registers.sp = 0xD000;
        mmu.write_byte(IE_REGISTER, 0x10);
        mmu.write_byte(IF_REGISTER, 0x10);

        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.pc, 0x0060);
        assert!(!cpu.stopped);

        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.pc, 0x0038);
    }

    #[test]
    fn test_stop_keeps_waiting_after_other_interrupt() {
        let (mut cpu, mut mmu) = setup(&[0x10, 0x00]);
        cpu.ime = true;
        cpu.registers.sp = 0xD000;
        mmu.write_byte(IE_REGISTER, 0x04);
        mmu.write_byte(IF_REGISTER, 0x04);

        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.pc, 0x0050);
        assert!(cpu.stopped);
        assert_eq!(cpu.step(&mut mmu), 4);
        assert_eq!(cpu.registers.pc, 0x0050);
    }

    #[test]
    fn test_stop_waits_for_joypad() {
        let (mut cpu, mut mmu) = setup(&[0x10, 0x00, 0x3C]);
        mmu.write_byte(IF_REGISTER, 0x00);
        cpu.registers.a = 0;
        cpu.step(&mut mmu);
        assert!(cpu.stopped);
        assert_eq!(cpu.registers.pc, PROGRAM_START + 2);

        cpu.step(&mut mmu);
        assert_eq!(cpu.registers.a, 0);

        mmu.request_interrupt(InterruptType::Joypad);
        cpu.step(&mut mmu);
        assert!(!cpu.stopped);
        assert_eq!(cpu.registers.a, 1);
    }

    #[test]
    fn test_undefined_opcodes_lock_cpu() {
        for opcode in [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
            let (mut cpu, mut mmu) = setup(&[opcode, 0x3C]);
            cpu.registers.a = 0;
            cpu.step(&mut mmu);
            assert!(cpu.locked());
            assert_eq!(cpu.step(&mut mmu), 4);
            assert_eq!(cpu.registers.a, 0);
            assert_eq!(cpu.registers.pc, PROGRAM_START + 1);
        }
    }

    #[test]
    fn test_reset_clears_lock_and_counters() {
        let (mut cpu, mut mmu) = setup(&[0xD3]);
        cpu.step(&mut mmu);
        assert!(cpu.total_cycles() > 0);
        cpu.reset(false);
        assert!(!cpu.locked());
        assert_eq!(cpu.total_cycles(), 0);
        assert_eq!(cpu.registers.pc, 0x0100);

        cpu.reset(true);
        assert_eq!(cpu.registers.pc, 0x0000);
        assert_eq!(cpu.registers.get_af(), 0x0000);
    }

    #[test]
    fn test_post_boot_registers() {
        let cpu = CPU::new();
        assert_eq!(cpu.registers.get_af(), 0x01B0);
        assert_eq!(cpu.registers.sp, 0xFFFE);
        assert!(cpu.registers.get_z_flag());
    }
}
