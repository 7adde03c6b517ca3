use super::types::*;
use super::MBCController;
use crate::cartridge::MBCType;
use crate::error::LoadError;

/// 32KB 無控制器卡帶
pub struct RomOnly {
    rom_data: Vec<u8>,
    ram: ExternalRam,
}

impl RomOnly {
    pub fn new(rom_data: Vec<u8>, ram_banks: usize) -> Self {
        Self {
            rom_data,
            ram: ExternalRam::new(ram_banks),
        }
    }
}

impl MBCController for RomOnly {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => read_rom_bank(&self.rom_data, 0, addr),
            0x4000..=0x7FFF => read_rom_bank(&self.rom_data, 1, addr),
            0xA000..=0xBFFF => self.ram.read(0, addr),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let 0xA000..=0xBFFF = addr {
            self.ram.write(0, addr, value);
        }
    }

    fn rom_bank(&self) -> usize {
        1
    }

    fn mbc_type(&self) -> Option<MBCType> {
        Some(MBCType::None)
    }

    fn ram(&self) -> &[u8] {
        self.ram.contents()
    }

    fn load_ram(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.ram.restore(data)
    }
}

/// 未插入卡帶：ROM 讀到 0xFF，RAM 由預設陣列承接
pub struct NoCartridge {
    ram: ExternalRam,
}

impl NoCartridge {
    pub fn new() -> Self {
        Self {
            ram: ExternalRam::new(0),
        }
    }
}

impl Default for NoCartridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MBCController for NoCartridge {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0xA000..=0xBFFF => self.ram.read(0, addr),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let 0xA000..=0xBFFF = addr {
            self.ram.write(0, addr, value);
        }
    }

    fn rom_bank(&self) -> usize {
        1
    }

    fn mbc_type(&self) -> Option<MBCType> {
        None
    }

    fn ram(&self) -> &[u8] {
        self.ram.contents()
    }

    fn load_ram(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.ram.restore(data)
    }
}
