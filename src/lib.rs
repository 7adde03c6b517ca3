// Game Boy 模擬器庫
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod debugger;
pub mod emulator;
pub mod error;
pub mod interrupts;
pub mod joypad;
pub mod mmu;
pub mod ppu;
pub mod timer;
pub mod utils;

pub use crate::cartridge::Cartridge;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::cpu::CPU;
pub use crate::debugger::{Breakpoint, BreakpointArgs, TraceField, TraceLogger};
pub use crate::emulator::{Command, Console, EmulatorThread, Event, GameBoy, Snapshot};
pub use crate::error::{Error, LoadError, Result};
pub use crate::joypad::GameBoyKey;
pub use crate::mmu::MMU;
pub use crate::ppu::PPU;
pub use crate::timer::Timer;
