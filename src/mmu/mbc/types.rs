use crate::cartridge::{RAM_BANK_SIZE, ROM_BANK_SIZE};
use crate::error::LoadError;

/// 外部 RAM；卡帶沒有 RAM 時仍保留一個 8KB 的預設 bank
#[derive(Debug, Clone)]
pub struct ExternalRam {
    data: Vec<u8>,
    bank_count: usize,
}

impl ExternalRam {
    pub fn new(bank_count: usize) -> Self {
        Self {
            data: vec![0; bank_count.max(1) * RAM_BANK_SIZE],
            bank_count,
        }
    }

    /// 卡帶是否真的有 RAM
    pub fn is_present(&self) -> bool {
        self.bank_count > 0
    }

    fn offset(&self, bank: usize, addr: u16) -> usize {
        let banks = self.bank_count.max(1);
        (bank % banks) * RAM_BANK_SIZE + (addr as usize - 0xA000)
    }

    pub fn read(&self, bank: usize, addr: u16) -> u8 {
        self.data[self.offset(bank, addr)]
    }

    pub fn write(&mut self, bank: usize, addr: u16, value: u8) {
        let offset = self.offset(bank, addr);
        self.data[offset] = value;
    }

    /// 卡帶實際的 RAM 內容；沒有 RAM 時為空
    pub fn contents(&self) -> &[u8] {
        &self.data[..self.bank_count * RAM_BANK_SIZE]
    }

    /// 還原存檔；大小必須與卡帶 RAM 完全相同
    pub fn restore(&mut self, data: &[u8]) -> Result<(), LoadError> {
        let expected = self.bank_count * RAM_BANK_SIZE;
        if data.len() != expected {
            return Err(LoadError::SaveSize {
                expected,
                found: data.len(),
            });
        }
        self.data[..expected].copy_from_slice(data);
        Ok(())
    }
}

/// 以 bank 為單位讀取 ROM
pub fn read_rom_bank(rom: &[u8], bank: usize, addr: u16) -> u8 {
    let offset = bank * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
    rom.get(offset).copied().unwrap_or(0xFF)
}

/// 可切換區域的 bank：取模後 0 號解析為 1 號
pub fn switchable_bank(bank: usize, bank_count: usize) -> usize {
    match bank % bank_count.max(1) {
        0 => 1,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_and_restore() {
        let mut ram = ExternalRam::new(2);
        ram.write(1, 0xA010, 0x42);
        assert_eq!(ram.contents().len(), 2 * RAM_BANK_SIZE);
        assert_eq!(ram.contents()[RAM_BANK_SIZE + 0x10], 0x42);

        let mut save = vec![0u8; 2 * RAM_BANK_SIZE];
        save[5] = 0x99;
        ram.restore(&save).unwrap();
        assert_eq!(ram.read(0, 0xA005), 0x99);
        assert_eq!(ram.read(1, 0xA010), 0x00);
    }

    #[test]
    fn test_restore_rejects_wrong_size() {
        let mut ram = ExternalRam::new(1);
        ram.write(0, 0xA000, 0x11);
        assert_eq!(
            ram.restore(&[0u8; 16]),
            Err(LoadError::SaveSize {
                expected: RAM_BANK_SIZE,
                found: 16
            })
        );
        assert_eq!(ram.read(0, 0xA000), 0x11);
    }

    #[test]
    fn test_default_bank_is_not_reported_as_contents() {
        let ram = ExternalRam::new(0);
        assert!(ram.contents().is_empty());
    }
}
