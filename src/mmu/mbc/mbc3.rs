use super::types::*;
use super::MBCController;
use crate::cartridge::MBCType;
use crate::error::LoadError;

/// 只處理 ROM/RAM bank；RTC 寄存器選擇時讀回 0xFF
pub struct MBC3 {
    rom_data: Vec<u8>,
    ram: ExternalRam,
    rom_bank_count: usize,
    ram_enabled: bool,
    rom_bank: u8,   // 7 位
    ram_select: u8, // 0x00-0x03 RAM bank, 0x08-0x0C RTC
}

impl MBC3 {
    pub fn new(rom_data: Vec<u8>, rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_data,
            ram: ExternalRam::new(ram_banks),
            rom_bank_count: rom_banks,
            ram_enabled: false,
            rom_bank: 1,
            ram_select: 0,
        }
    }

    fn current_rom_bank(&self) -> usize {
        switchable_bank(self.rom_bank as usize, self.rom_bank_count)
    }

    fn ram_mapped(&self) -> bool {
        self.ram_select <= 0x03 && (self.ram_enabled || !self.ram.is_present())
    }
}

impl MBCController for MBC3 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => read_rom_bank(&self.rom_data, 0, addr),
            0x4000..=0x7FFF => read_rom_bank(&self.rom_data, self.current_rom_bank(), addr),
            0xA000..=0xBFFF if self.ram_mapped() => self.ram.read(self.ram_select as usize, addr),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = match value & 0x7F {
                    0 => 1,
                    bank => bank,
                };
            }
            0x4000..=0x5FFF => self.ram_select = value & 0x0F,
            0x6000..=0x7FFF => {} // RTC latch
            0xA000..=0xBFFF if self.ram_mapped() => {
                let bank = self.ram_select as usize;
                self.ram.write(bank, addr, value);
            }
            _ => {}
        }
    }

    fn rom_bank(&self) -> usize {
        self.current_rom_bank()
    }

    fn ram_bank(&self) -> usize {
        self.ram_select as usize
    }

    fn mbc_type(&self) -> Option<MBCType> {
        Some(MBCType::MBC3)
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
    use crate::cartridge::ROM_BANK_SIZE;

    #[test]
    fn test_seven_bit_bank_select() {
        let mut rom = vec![0u8; 128 * ROM_BANK_SIZE];
        rom[0x7F * ROM_BANK_SIZE] = 0x7F;
        rom[ROM_BANK_SIZE] = 0x01;
        let mut mbc = MBC3::new(rom, 128, 0);
        mbc.write(0x2000, 0xFF);
        assert_eq!(mbc.read(0x4000), 0x7F);
        mbc.write(0x2000, 0x00);
        assert_eq!(mbc.read(0x4000), 0x01);
    }

    #[test]
    fn test_ram_banks_and_rtc_select() {
        let mut mbc = MBC3::new(vec![0u8; 2 * ROM_BANK_SIZE], 2, 4);
        mbc.write(0x0000, 0x0A);
        mbc.write(0x4000, 0x03);
        mbc.write(0xA123, 0x5A);
        assert_eq!(mbc.read(0xA123), 0x5A);

        mbc.write(0x4000, 0x00);
        assert_eq!(mbc.read(0xA123), 0x00);

        mbc.write(0x4000, 0x08);
        assert_eq!(mbc.read(0xA123), 0xFF);
    }
}
