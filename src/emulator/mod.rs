pub mod console;
pub mod gameboy;
pub mod runner;

pub use console::Console;
pub use gameboy::{GameBoy, Snapshot};
pub use runner::{Command, EmulatorThread, Event};
