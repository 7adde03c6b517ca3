// 計時器的常量定義
pub const DIV_REGISTER: u16 = 0xFF04;
pub const TIMA_REGISTER: u16 = 0xFF05;
pub const TMA_REGISTER: u16 = 0xFF06;
pub const TAC_REGISTER: u16 = 0xFF07;

// TAC 寄存器的位元定義
pub const TAC_ENABLE: u8 = 1 << 2;
pub const TAC_CLOCK_SELECT: u8 = 0b11;
/// TAC 讀取時未使用的位元固定為 1
pub const TAC_UNUSED_BITS: u8 = 0xF8;

// 每次 TIMA 遞增所需的週期數
pub const CLOCK_PERIODS: [u16; 4] = [
    1024, // 00: 4096 Hz
    16,   // 01: 262144 Hz
    64,   // 10: 65536 Hz
    256,  // 11: 16384 Hz
];

/// 對應頻率在內部震盪器上觀察的位元（週期的一半）
pub const CLOCK_TAP_BITS: [u8; 4] = [9, 3, 5, 7];
