use super::types::*;
use super::MBCController;
use crate::cartridge::MBCType;
use crate::error::LoadError;

pub struct MBC1 {
    rom_data: Vec<u8>,
    ram: ExternalRam,
    rom_bank_count: usize,
    ram_enabled: bool,
    bank_low: u8,  // 0x2000-0x3FFF 寫入的低 5 位
    bank_high: u8, // 0x4000-0x5FFF 寫入的 2 位
    mode: bool,    // false: ROM banking, true: RAM banking
}

impl MBC1 {
    pub fn new(rom_data: Vec<u8>, rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_data,
            ram: ExternalRam::new(ram_banks),
            rom_bank_count: rom_banks,
            ram_enabled: false,
            bank_low: 1,
            bank_high: 0,
            mode: false,
        }
    }

    fn current_rom_bank(&self) -> usize {
        let bank = ((self.bank_high as usize) << 5) | self.bank_low as usize;
        switchable_bank(bank, self.rom_bank_count)
    }

    fn fixed_rom_bank(&self) -> usize {
        if self.mode {
            ((self.bank_high as usize) << 5) % self.rom_bank_count.max(1)
        } else {
            0
        }
    }

    fn current_ram_bank(&self) -> usize {
        if self.mode {
            self.bank_high as usize
        } else {
            0
        }
    }

    fn ram_accessible(&self) -> bool {
        self.ram_enabled || !self.ram.is_present()
    }
}

impl MBCController for MBC1 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => read_rom_bank(&self.rom_data, self.fixed_rom_bank(), addr),
            0x4000..=0x7FFF => read_rom_bank(&self.rom_data, self.current_rom_bank(), addr),
            0xA000..=0xBFFF if self.ram_accessible() => {
                self.ram.read(self.current_ram_bank(), addr)
            }
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                // RAM 啟用/禁用
                self.ram_enabled = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                // ROM Bank Number，0 會被當成 1
                self.bank_low = match value & 0x1F {
                    0 => 1,
                    bank => bank,
                };
            }
            0x4000..=0x5FFF => {
                // RAM Bank Number / ROM Bank 高位
                self.bank_high = value & 0x03;
            }
            0x6000..=0x7FFF => {
                // Banking Mode Select
                self.mode = (value & 0x01) != 0;
            }
            0xA000..=0xBFFF if self.ram_accessible() => {
                let bank = self.current_ram_bank();
                self.ram.write(bank, addr, value);
            }
            _ => {}
        }
    }

    fn rom_bank(&self) -> usize {
        self.current_rom_bank()
    }

    fn ram_bank(&self) -> usize {
        self.current_ram_bank()
    }

    fn mbc_type(&self) -> Option<MBCType> {
        Some(MBCType::MBC1)
    }

    fn ram(&self) -> &[u8] {
        self.ram.contents()
    }

    fn load_ram(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.ram.restore(data)
    }
}
