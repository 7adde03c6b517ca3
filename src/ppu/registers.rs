// LCD 控制器地址
pub const LCD_CONTROL: u16 = 0xFF40; // LCD 控制寄存器
pub const LCD_STATUS: u16 = 0xFF41; // LCD 狀態寄存器
pub const SCY: u16 = 0xFF42; // 背景捲動 Y
pub const SCX: u16 = 0xFF43; // 背景捲動 X
pub const LY: u16 = 0xFF44; // LCD Y 座標
pub const LYC: u16 = 0xFF45; // LCD Y 比較
pub const DMA: u16 = 0xFF46; // DMA 傳輸
pub const BGP: u16 = 0xFF47; // 背景調色板
pub const OBP0: u16 = 0xFF48; // 精靈調色板 0
pub const OBP1: u16 = 0xFF49; // 精靈調色板 1
pub const WINDOW_Y: u16 = 0xFF4A; // 視窗 Y 位置
pub const WINDOW_X: u16 = 0xFF4B; // 視窗 X 位置 + 7

// LCD 控制寄存器 (LCDC) 位元
pub const LCDC_ENABLE: u8 = 1 << 7; // LCD 顯示開啟/關閉
pub const LCDC_WIN_MAP: u8 = 1 << 6; // 視窗圖塊映射選擇
pub const LCDC_WIN_ENABLE: u8 = 1 << 5; // 視窗顯示開啟/關閉
pub const LCDC_TILE_DATA: u8 = 1 << 4; // 背景與視窗圖塊數據選擇
pub const LCDC_BG_MAP: u8 = 1 << 3; // 背景圖塊映射選擇
pub const LCDC_OBJ_SIZE: u8 = 1 << 2; // 精靈大小 (8x8 或 8x16)
pub const LCDC_OBJ_ENABLE: u8 = 1 << 1; // 精靈顯示開啟/關閉
pub const LCDC_BG_ENABLE: u8 = 1 << 0; // 背景顯示開啟/關閉

// 顯示相關常量
pub const SCREEN_WIDTH: usize = 160; // 螢幕寬度
pub const SCREEN_HEIGHT: usize = 144; // 螢幕高度
pub const SCANLINES_TOTAL: u8 = 154; // 總掃描線數
pub const VBLANK_START: u8 = 144; // V-Blank 開始的掃描線

// PPU 時序常量
pub const CYCLES_OAM: u32 = 80; // OAM 掃描時間 (Mode 2)
pub const CYCLES_TRANSFER: u32 = 170; // 像素傳輸時間 (Mode 3)
pub const CYCLES_HBLANK: u32 = 206; // H-Blank 時間 (Mode 0)
pub const CYCLES_PER_LINE: u32 = 456; // 每掃描線週期
pub const CYCLES_PER_FRAME: u32 = CYCLES_PER_LINE * SCANLINES_TOTAL as u32; // 70224

// VRAM 地址範圍
pub const VRAM_TILE_DATA_0: u16 = 0x8000; // 圖塊數據區域 0 (使用無符號偏移)
pub const VRAM_TILE_DATA_1: u16 = 0x8800; // 圖塊數據區域 1 (使用有符號偏移)
pub const VRAM_MAP_0: u16 = 0x9800; // 圖塊地圖 0
pub const VRAM_MAP_1: u16 = 0x9C00; // 圖塊地圖 1

// LCD 狀態寄存器 (STAT) 位元
pub const STAT_LYC_INT: u8 = 1 << 6; // LYC=LY 中斷使能
pub const STAT_OAM_INT: u8 = 1 << 5; // Mode 2 OAM 中斷使能
pub const STAT_VBLANK_INT: u8 = 1 << 4; // Mode 1 V-Blank 中斷使能
pub const STAT_HBLANK_INT: u8 = 1 << 3; // Mode 0 H-Blank 中斷使能
pub const STAT_LYC_FLAG: u8 = 1 << 2; // LYC=LY 標誌
pub const STAT_MODE_MASK: u8 = 0x03; // 模式標誌遮罩
pub const STAT_WRITABLE: u8 = 0x78; // 只有 3-6 位可寫
pub const STAT_UNUSED_BIT: u8 = 0x80;

// 精靈屬性
pub const OAM_START: u16 = 0xFE00;
pub const OAM_SIZE: usize = 0xA0;
pub const MAX_SPRITES_PER_LINE: usize = 10;
pub const SPRITE_PRIORITY: u8 = 1 << 7; // 1: 在背景顏色 1-3 之後
pub const SPRITE_Y_FLIP: u8 = 1 << 6;
pub const SPRITE_X_FLIP: u8 = 1 << 5;
pub const SPRITE_PALETTE: u8 = 1 << 4;

// PPU 模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

impl PpuMode {
    /// 進入此模式時檢查的 STAT 中斷位元
    pub fn stat_interrupt_bit(self) -> Option<u8> {
        match self {
            PpuMode::HBlank => Some(STAT_HBLANK_INT),
            PpuMode::VBlank => Some(STAT_VBLANK_INT),
            PpuMode::OamSearch => Some(STAT_OAM_INT),
            PpuMode::PixelTransfer => None,
        }
    }
}

/// 將調色板寄存器展開為四個 2 位元顏色索引
pub fn expand_palette(value: u8) -> [u8; 4] {
    [
        value & 0x03,
        (value >> 2) & 0x03,
        (value >> 4) & 0x03,
        (value >> 6) & 0x03,
    ]
}
