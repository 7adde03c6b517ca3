use super::gameboy::{GameBoy, Snapshot};
use crate::config::{SystemConfig, VideoConfig};
use crate::cpu::opcodes::Instruction;
use crate::debugger::{Breakpoint, BreakpointArgs};
use crate::error::{LoadError, Result};
use crate::joypad::GameBoyKey;
use crate::ppu::SharedFrame;
use std::path::Path;

/// 支援的主機種類，依映像副檔名選擇
#[derive(Debug)]
pub enum Console {
    GameBoy(GameBoy),
}

impl Console {
    /// 依副檔名建立主機並載入映像
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        system: &SystemConfig,
        video: &VideoConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("gb") | Some("gbc") => {
                let mut gameboy = GameBoy::with_config(system, video)?;
                gameboy.load_from_file(path)?;
                Ok(Console::GameBoy(gameboy))
            }
            _ => Err(LoadError::UnsupportedConsole(path.to_path_buf()).into()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Console::GameBoy(_) => "Game Boy",
        }
    }

    pub fn step(&mut self) -> u8 {
        match self {
            Console::GameBoy(gb) => gb.step(),
        }
    }

    pub fn run_frame(&mut self) -> u32 {
        match self {
            Console::GameBoy(gb) => gb.run_frame(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Console::GameBoy(gb) => gb.reset(),
        }
    }

    pub fn press(&mut self, key: GameBoyKey) {
        match self {
            Console::GameBoy(gb) => gb.press(key),
        }
    }

    pub fn release(&mut self, key: GameBoyKey) {
        match self {
            Console::GameBoy(gb) => gb.release(key),
        }
    }

    pub fn frame_buffer(&self) -> SharedFrame {
        match self {
            Console::GameBoy(gb) => gb.frame_buffer(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Console::GameBoy(gb) => gb.snapshot(),
        }
    }

    pub fn instruction_at(&self, addr: u16) -> Instruction {
        match self {
            Console::GameBoy(gb) => gb.instruction_at(addr),
        }
    }

    pub fn add_breakpoint(&mut self, args: BreakpointArgs) -> usize {
        match self {
            Console::GameBoy(gb) => gb.add_breakpoint(args),
        }
    }

    pub fn remove_breakpoint(&mut self, index: usize) -> Option<Breakpoint> {
        match self {
            Console::GameBoy(gb) => gb.remove_breakpoint(index),
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        match self {
            Console::GameBoy(gb) => gb.breakpoints(),
        }
    }

    pub fn check_breakpoints(&self) -> Option<usize> {
        match self {
            Console::GameBoy(gb) => gb.check_breakpoints(),
        }
    }

    pub fn start_trace<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        match self {
            Console::GameBoy(gb) => gb.start_trace(path),
        }
    }

    pub fn stop_trace(&mut self) -> Result<()> {
        match self {
            Console::GameBoy(gb) => gb.stop_trace(),
        }
    }

    /// 把電池 RAM 寫回載入時決定的存檔
    pub fn flush_battery(&self) -> Result<()> {
        match self {
            Console::GameBoy(gb) => gb.flush_battery(),
        }
    }
}

impl From<GameBoy> for Console {
    fn from(gameboy: GameBoy) -> Self {
        Console::GameBoy(gameboy)
    }
}
