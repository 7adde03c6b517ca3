// 序列埠
pub const SB_REGISTER: u16 = 0xFF01;
pub const SC_REGISTER: u16 = 0xFF02;
pub const SC_UNUSED_BITS: u8 = 0x7E;
pub const SC_START_INTERNAL: u8 = 0x81;

/// 寫入非零值後卸除啟動 ROM
pub const BOOT_ROM_DISABLE: u16 = 0xFF50;

// 聲音寄存器範圍（只儲存，不產生聲音）
pub const SOUND_START: u16 = 0xFF10;
pub const SOUND_END: u16 = 0xFF26;

/// 聲音寄存器讀取時強制為 1 的位元，索引為 addr - 0xFF10
pub const SOUND_READ_MASKS: [u8; 0x17] = [
    0x80, 0x3F, 0x00, 0xFF, 0xBF, // NR10-NR14
    0xFF, 0x3F, 0x00, 0xFF, 0xBF, // 0xFF15, NR21-NR24
    0x7F, 0xFF, 0x9F, 0xFF, 0xBF, // NR30-NR34
    0xFF, 0xFF, 0x00, 0x00, 0xBF, // 0xFF1F, NR41-NR44
    0x00, 0x00, 0x70, // NR50-NR52
];

/// 沒有對應硬體的 I/O 位址，讀取固定回傳 0xFF
pub fn is_unused_io(addr: u16) -> bool {
    matches!(
        addr,
        0xFF03 | 0xFF08..=0xFF0E | 0xFF27..=0xFF2F | 0xFF4C..=0xFF4F | 0xFF51..=0xFF7F
    )
}

/// 跳過啟動 ROM 時的 I/O 初始值
pub const POST_BOOT_IO: [(u16, u8); 31] = [
    (0xFF00, 0xCF),
    (0xFF02, 0x7E),
    (0xFF05, 0x00),
    (0xFF06, 0x00),
    (0xFF07, 0xF8),
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    (0xFF40, 0x91),
    (0xFF42, 0x00),
    (0xFF43, 0x00),
    (0xFF45, 0x00),
    (0xFF47, 0xFC),
    (0xFF48, 0xFF),
    (0xFF49, 0xFF),
    (0xFF4A, 0x00),
];

/// 跳過啟動 ROM 時 DIV 內部計數器的值
pub const POST_BOOT_DIV: u16 = 0xABCC;
