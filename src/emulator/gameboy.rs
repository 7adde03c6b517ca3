use crate::cartridge::Cartridge;
use crate::config::{SystemConfig, VideoConfig};
use crate::cpu::opcodes::{disassemble, Instruction};
use crate::cpu::registers::Registers;
use crate::cpu::CPU;
use crate::debugger::{Breakpoint, BreakpointArgs, TraceLogger};
use crate::error::{LoadError, Result};
use crate::joypad::GameBoyKey;
use crate::mmu::MMU;
use crate::ppu::registers::CYCLES_PER_FRAME;
use crate::ppu::{SharedFrame, DEFAULT_SHADES, PPU};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 執行緒間共享的機器狀態快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: Registers,
    pub ime: bool,
    pub halted: bool,
    pub locked: bool,
    pub ly: u8,
    pub ppu_mode: u8,
    pub rom_bank: usize,
    pub total_cycles: u64,
    pub frame_count: u64,
}

/// Game Boy 主機：CPU、匯流排與 PPU 以值持有
#[derive(Debug)]
pub struct GameBoy {
    pub cpu: CPU,
    pub mmu: MMU,
    pub ppu: PPU,
    skip_boot: bool,
    breakpoints: Vec<Breakpoint>,
    tracer: TraceLogger,
    /// 帶電池卡匣的存檔位置
    save_path: Option<PathBuf>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// 無卡匣、跳過啟動 ROM 的機器
    pub fn new() -> Self {
        let mut gameboy = Self {
            cpu: CPU::new(),
            mmu: MMU::new(),
            ppu: PPU::new(DEFAULT_SHADES),
            skip_boot: true,
            breakpoints: Vec::new(),
            tracer: TraceLogger::new(Vec::new()),
            save_path: None,
        };
        gameboy.reset();
        gameboy
    }

    /// 依設定建立；有指定啟動 ROM 時先讀入
    pub fn with_config(system: &SystemConfig, video: &VideoConfig) -> Result<Self> {
        let mut gameboy = Self::new();
        gameboy.ppu.set_shades(video.palette);
        gameboy.tracer.set_fields(system.trace_fields.clone());
        gameboy.skip_boot = system.skip_boot;

        if let Some(path) = &system.boot_rom_path {
            let data = fs::read(path)?;
            gameboy.set_boot_rom(data)?;
            info!("載入啟動 ROM: {}", path.display());
        }
        if let Some(path) = &system.trace_path {
            gameboy.start_trace(path)?;
        }
        gameboy.reset();
        Ok(gameboy)
    }

    pub fn set_boot_rom(&mut self, data: Vec<u8>) -> std::result::Result<(), LoadError> {
        self.mmu.set_boot_rom(data)
    }

    pub fn set_skip_boot(&mut self, skip_boot: bool) {
        self.skip_boot = skip_boot;
    }

    /// 沒有啟動 ROM 時一律跳過
    fn boots_from_rom(&self) -> bool {
        !self.skip_boot && self.mmu.has_boot_rom()
    }

    /// 回到開機狀態；卡匣、中斷點與追蹤設定保留
    pub fn reset(&mut self) {
        let boot = self.boots_from_rom();
        self.cpu.reset(boot);
        self.mmu.reset(!boot);
        self.ppu.reset(&mut self.mmu);
        info!("重置 (啟動 ROM: {})", if boot { "是" } else { "否" });
    }

    /// 換上已解析的卡匣並重置
    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.mmu.load_cartridge(cartridge);
        self.reset();
    }

    /// 先完整解析，失敗時機器維持原狀
    pub fn load_from_bytes(&mut self, data: &[u8]) -> std::result::Result<(), LoadError> {
        let cartridge = Cartridge::from_bytes(data)?;
        self.load_cartridge(cartridge);
        self.save_path = None;
        Ok(())
    }

    /// 帶電池的卡匣會讀入同名的 .sav 存檔，並在之後寫回同一個位置
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let cartridge = Cartridge::load(path.as_ref())?;
        self.load_cartridge(cartridge);
        self.save_path = None;

        if self.has_battery() {
            let save_path = path.as_ref().with_extension("sav");
            if save_path.exists() {
                match self.load_battery(&save_path) {
                    Ok(()) => info!("讀入存檔: {}", save_path.display()),
                    Err(e) => warn!("存檔 {} 無法使用: {}", save_path.display(), e),
                }
            }
            self.save_path = Some(save_path);
        }
        Ok(())
    }

    pub fn has_battery(&self) -> bool {
        self.mmu.has_battery()
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn set_save_path(&mut self, path: Option<PathBuf>) {
        self.save_path = path;
    }

    /// 把外部 RAM 寫成存檔
    pub fn save_battery<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.mmu.external_ram())?;
        info!("寫入存檔: {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_battery<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let data = fs::read(path)?;
        self.mmu.load_external_ram(&data)?;
        Ok(())
    }

    /// 有電池且有存檔位置時寫回
    pub fn flush_battery(&self) -> Result<()> {
        match &self.save_path {
            Some(path) if self.has_battery() => self.save_battery(path),
            _ => Ok(()),
        }
    }

    /// 執行一條指令並推進計時器與 PPU
    pub fn step(&mut self) -> u8 {
        if self.tracer.is_active() && !self.cpu.halted && !self.cpu.locked() {
            if let Err(e) = self.tracer.log(&self.cpu, &self.mmu) {
                warn!("追蹤寫入失敗，停止追蹤: {}", e);
                if let Err(e) = self.tracer.stop() {
                    warn!("關閉追蹤檔失敗: {}", e);
                }
            }
        }

        let cycles = self.cpu.step(&mut self.mmu);
        self.mmu.update_timer(cycles);
        self.ppu.update(cycles, &mut self.mmu);
        cycles
    }

    /// 執行到下一個 V-Blank；LCD 關閉時以一幀的週期數為上限
    pub fn run_frame(&mut self) -> u32 {
        let mut cycles = 0u32;
        self.ppu.take_frame_ready();
        while cycles < CYCLES_PER_FRAME {
            cycles += self.step() as u32;
            if self.ppu.take_frame_ready() {
                break;
            }
        }
        cycles
    }

    pub fn press(&mut self, key: GameBoyKey) {
        self.mmu.press_key(key);
    }

    pub fn release(&mut self, key: GameBoyKey) {
        self.mmu.release_key(key);
    }

    pub fn frame_buffer(&self) -> SharedFrame {
        self.ppu.frame_buffer()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.cpu.registers.clone(),
            ime: self.cpu.ime,
            halted: self.cpu.halted,
            locked: self.cpu.locked(),
            ly: self.mmu.ly(),
            ppu_mode: self.ppu.mode() as u8,
            rom_bank: self.mmu.rom_bank(),
            total_cycles: self.cpu.total_cycles(),
            frame_count: self.ppu.frame_count(),
        }
    }

    /// 反組譯 `addr` 處的指令
    pub fn instruction_at(&self, addr: u16) -> Instruction {
        disassemble(addr, |a| self.mmu.read_byte(a))
    }

    pub fn add_breakpoint(&mut self, args: BreakpointArgs) -> usize {
        let breakpoint = Breakpoint::new(args);
        info!("新增中斷點: {}", breakpoint.name());
        self.breakpoints.push(breakpoint);
        self.breakpoints.len() - 1
    }

    pub fn remove_breakpoint(&mut self, index: usize) -> Option<Breakpoint> {
        if index < self.breakpoints.len() {
            Some(self.breakpoints.remove(index))
        } else {
            None
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// 回傳第一個成立的中斷點
    pub fn check_breakpoints(&self) -> Option<usize> {
        self.breakpoints
            .iter()
            .position(|bp| bp.check(&self.cpu, &self.mmu))
    }

    pub fn start_trace<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.tracer.start(path)
    }

    pub fn stop_trace(&mut self) -> Result<()> {
        self.tracer.stop()
    }

    pub fn tracer_mut(&mut self) -> &mut TraceLogger {
        &mut self.tracer
    }

    pub fn set_palette(&mut self, palette: [[u8; 3]; 4]) {
        self.ppu.set_shades(palette);
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.mmu.take_serial_output()
    }
}
