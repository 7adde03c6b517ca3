pub mod header;

pub use header::*;

use crate::error::Result;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// 已解析的卡帶映像
///
/// ROM 依標頭宣告的 bank 數補齊或截斷，建立完成前不會影響匯流排。
#[derive(Debug, Clone)]
pub struct Cartridge {
    pub header: CartridgeHeader,
    rom: Vec<u8>,
}

impl Cartridge {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, crate::error::LoadError> {
        let header = CartridgeHeader::from_rom(data)?;
        let expected = header.rom_size_bytes();

        if data.len() < expected {
            warn!(
                "ROM 長度 {} 小於標頭宣告的 {}，剩餘部分補 0",
                data.len(),
                expected
            );
        } else if data.len() > expected {
            warn!("ROM 長度 {} 大於標頭宣告的 {}，多餘部分忽略", data.len(), expected);
        }

        let mut rom = vec![0u8; expected];
        let copied = data.len().min(expected);
        rom[..copied].copy_from_slice(&data[..copied]);

        info!(
            "卡帶: \"{}\" 類型 {} ({:#04X}), ROM {} banks, RAM {} banks",
            header.title,
            header.mbc_type.description(),
            header.cartridge_type,
            header.rom_banks,
            header.ram_banks
        );

        Ok(Self { header, rom })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        info!("讀取 ROM: {} ({} bytes)", path.as_ref().display(), data.len());
        Ok(Self::from_bytes(&data)?)
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn into_rom(self) -> Vec<u8> {
        self.rom
    }
}
