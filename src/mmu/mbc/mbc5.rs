use super::types::*;
use super::MBCController;
use crate::cartridge::MBCType;
use crate::error::LoadError;

/// 9 位 ROM bank、最多 16 個 RAM bank；bank 0 也能映射到切換區
pub struct MBC5 {
    rom_data: Vec<u8>,
    ram: ExternalRam,
    rom_bank_count: usize,
    ram_enabled: bool,
    rom_bank: u16, // 0x2000-0x2FFF 低 8 位，0x3000-0x3FFF 第 9 位
    ram_bank: u8,
}

impl MBC5 {
    pub fn new(rom_data: Vec<u8>, rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_data,
            ram: ExternalRam::new(ram_banks),
            rom_bank_count: rom_banks,
            ram_enabled: false,
            rom_bank: 1,
            ram_bank: 0,
        }
    }

    fn current_rom_bank(&self) -> usize {
        self.rom_bank as usize % self.rom_bank_count.max(1)
    }

    fn ram_accessible(&self) -> bool {
        self.ram_enabled || !self.ram.is_present()
    }
}

impl MBCController for MBC5 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => read_rom_bank(&self.rom_data, 0, addr),
            0x4000..=0x7FFF => read_rom_bank(&self.rom_data, self.current_rom_bank(), addr),
            0xA000..=0xBFFF if self.ram_accessible() => {
                self.ram.read(self.ram_bank as usize, addr)
            }
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x2FFF => self.rom_bank = (self.rom_bank & 0x100) | value as u16,
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0xFF) | ((value as u16 & 0x01) << 8);
            }
            // 超過 0x0F 的值（震動卡帶的馬達位以外）不改變 bank
            0x4000..=0x5FFF if value <= 0x0F => self.ram_bank = value,
            0xA000..=0xBFFF if self.ram_accessible() => {
                let bank = self.ram_bank as usize;
                self.ram.write(bank, addr, value);
            }
            _ => {}
        }
    }

    fn rom_bank(&self) -> usize {
        self.current_rom_bank()
    }

    fn ram_bank(&self) -> usize {
        self.ram_bank as usize
    }

    fn mbc_type(&self) -> Option<MBCType> {
        Some(MBCType::MBC5)
    }

    fn ram(&self) -> &[u8] {
        self.ram.contents()
    }

    fn load_ram(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.ram.restore(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{RAM_BANK_SIZE, ROM_BANK_SIZE};

    fn banked_rom(banks: usize) -> Vec<u8> {
        let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
        for bank in 0..banks {
            rom[bank * ROM_BANK_SIZE] = bank as u8;
            rom[bank * ROM_BANK_SIZE + 1] = (bank >> 8) as u8;
        }
        rom
    }

    #[test]
    fn test_nine_bit_rom_bank() {
        let mut mbc = MBC5::new(banked_rom(512), 512, 0);
        assert_eq!(mbc.rom_bank(), 1);

        mbc.write(0x2000, 0x05);
        mbc.write(0x3000, 0x01);
        assert_eq!(mbc.rom_bank(), 0x105);
        assert_eq!(mbc.read(0x4000), 0x05);
        assert_eq!(mbc.read(0x4001), 0x01);

        mbc.write(0x3000, 0x00);
        assert_eq!(mbc.rom_bank(), 0x05);
    }

    #[test]
    fn test_bank_zero_maps_bank_zero() {
        let mut mbc = MBC5::new(banked_rom(8), 8, 0);
        mbc.write(0x2000, 0x00);
        assert_eq!(mbc.rom_bank(), 0);
        assert_eq!(mbc.read(0x4000), 0x00);

        // 超出實體 bank 數時取模
        mbc.write(0x2000, 0x0B);
        assert_eq!(mbc.rom_bank(), 3);
        assert_eq!(mbc.read(0x4000), 0x03);
    }

    #[test]
    fn test_ram_enable_and_banks() {
        let mut mbc = MBC5::new(banked_rom(2), 2, 4);
        mbc.write(0xA000, 0x12);
        assert_eq!(mbc.read(0xA000), 0xFF);

        mbc.write(0x0000, 0x0A);
        mbc.write(0x4000, 0x02);
        mbc.write(0xA000, 0x12);
        mbc.write(0x4000, 0x00);
        mbc.write(0xA000, 0x34);

        mbc.write(0x4000, 0x02);
        assert_eq!(mbc.read(0xA000), 0x12);
        mbc.write(0x4000, 0x10);
        assert_eq!(mbc.ram_bank(), 2);

        assert_eq!(mbc.ram().len(), 4 * RAM_BANK_SIZE);
        assert_eq!(mbc.ram()[2 * RAM_BANK_SIZE], 0x12);
        assert_eq!(mbc.ram()[0], 0x34);
    }
}
