use crate::error::LoadError;

// 卡帶標頭位置
pub const TITLE_START: usize = 0x134;
pub const TITLE_END: usize = 0x142; // 14 bytes
pub const CGB_FLAG: usize = 0x143;
pub const CARTRIDGE_TYPE: usize = 0x147;
pub const ROM_SIZE: usize = 0x148;
pub const RAM_SIZE: usize = 0x149;
pub const HEADER_END: usize = 0x150;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

/// RAM 大小代碼對應的 8KB bank 數量
const RAM_BANKS: [usize; 6] = [0, 0, 1, 4, 16, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MBCType {
    None, // ROM Only
    MBC1, // MBC1 (+RAM, +Battery)
    MBC3, // MBC3 (+Timer, +RAM, +Battery)
    MBC5, // MBC5 (+Rumble, +RAM, +Battery)
}

impl MBCType {
    /// 只接受已實作的控制器，其餘代碼視為載入錯誤
    pub fn from_cartridge_type(cartridge_type: u8) -> Result<Self, LoadError> {
        match cartridge_type {
            0x00 => Ok(MBCType::None),
            0x01..=0x03 => Ok(MBCType::MBC1),
            0x0F..=0x13 => Ok(MBCType::MBC3),
            0x19..=0x1E => Ok(MBCType::MBC5),
            other => Err(LoadError::UnsupportedMapper(other)),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MBCType::None => "ROM Only",
            MBCType::MBC1 => "MBC1",
            MBCType::MBC3 => "MBC3",
            MBCType::MBC5 => "MBC5",
        }
    }
}

/// 帶電池的卡帶類型，外部 RAM 需要存檔
pub fn has_battery(cartridge_type: u8) -> bool {
    matches!(cartridge_type, 0x03 | 0x0F | 0x10 | 0x13 | 0x1B | 0x1E)
}

/// ROM 大小代碼 -> 16KB bank 數量
pub fn rom_bank_count(rom_size_code: u8) -> Result<usize, LoadError> {
    match rom_size_code {
        0x00..=0x08 => Ok(2usize << rom_size_code),
        0x52 => Ok(72),
        0x53 => Ok(80),
        0x54 => Ok(96),
        other => Err(LoadError::InvalidRomSize(other)),
    }
}

/// RAM 大小代碼 -> 8KB bank 數量
pub fn ram_bank_count(ram_size_code: u8) -> Result<usize, LoadError> {
    RAM_BANKS
        .get(ram_size_code as usize)
        .copied()
        .ok_or(LoadError::InvalidRamSize(ram_size_code))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,         // 0x134-0x141
    pub cgb_flag: u8,          // 0x143
    pub cartridge_type: u8,    // 0x147
    pub rom_size_code: u8,     // 0x148
    pub ram_size_code: u8,     // 0x149
    pub mbc_type: MBCType,
    pub battery: bool,
    pub rom_banks: usize,
    pub ram_banks: usize,
}

impl CartridgeHeader {
    pub fn from_rom(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() < HEADER_END {
            return Err(LoadError::TooSmall(rom.len()));
        }

        let title = String::from_utf8_lossy(&rom[TITLE_START..TITLE_END])
            .trim_end_matches('\0')
            .to_string();

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let rom_size_code = rom[ROM_SIZE];
        let ram_size_code = rom[RAM_SIZE];

        Ok(Self {
            title,
            cgb_flag: rom[CGB_FLAG],
            cartridge_type,
            rom_size_code,
            ram_size_code,
            mbc_type: MBCType::from_cartridge_type(cartridge_type)?,
            battery: has_battery(cartridge_type),
            rom_banks: rom_bank_count(rom_size_code)?,
            ram_banks: ram_bank_count(ram_size_code)?,
        })
    }

    pub fn rom_size_bytes(&self) -> usize {
        self.rom_banks * ROM_BANK_SIZE
    }

    pub fn ram_size_bytes(&self) -> usize {
        self.ram_banks * RAM_BANK_SIZE
    }
}
