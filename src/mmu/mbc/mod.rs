mod mbc1;
mod mbc3;
mod mbc5;
mod rom_only;
mod types;

pub use mbc1::MBC1;
pub use mbc3::MBC3;
pub use mbc5::MBC5;
pub use rom_only::{NoCartridge, RomOnly};
pub use types::*;

use crate::cartridge::{Cartridge, MBCType};
use crate::error::LoadError;

/// MBC 控制器特徵
///
/// `read`/`write` 涵蓋 0x0000-0x7FFF 與 0xA000-0xBFFF；
/// 寫入 ROM 區域改變的是 bank 選擇寄存器而非記憶體本身。
pub trait MBCController: Send {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
    /// 目前映射到 0x4000-0x7FFF 的實體 bank
    fn rom_bank(&self) -> usize;
    fn ram_bank(&self) -> usize {
        0
    }
    /// 未插入卡帶時為 None
    fn mbc_type(&self) -> Option<MBCType>;
    /// 外部 RAM 內容，用於電池存檔
    fn ram(&self) -> &[u8];
    fn load_ram(&mut self, data: &[u8]) -> Result<(), LoadError>;
}

/// 創建合適的 MBC 控制器
pub fn create_mbc_controller(cartridge: Cartridge) -> Box<dyn MBCController> {
    let header = cartridge.header.clone();
    let rom = cartridge.into_rom();
    match header.mbc_type {
        MBCType::None => Box::new(RomOnly::new(rom, header.ram_banks)),
        MBCType::MBC1 => Box::new(MBC1::new(rom, header.rom_banks, header.ram_banks)),
        MBCType::MBC3 => Box::new(MBC3::new(rom, header.rom_banks, header.ram_banks)),
        MBCType::MBC5 => Box::new(MBC5::new(rom, header.rom_banks, header.ram_banks)),
    }
}
