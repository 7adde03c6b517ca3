pub mod registers;

pub use registers::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    VBlank,
    LCDStat,
    Timer,
    Serial,
    Joypad,
}

impl InterruptType {
    /// 依優先順序排列（低位優先）
    pub const ALL: [InterruptType; 5] = [
        InterruptType::VBlank,
        InterruptType::LCDStat,
        InterruptType::Timer,
        InterruptType::Serial,
        InterruptType::Joypad,
    ];

    pub fn vector(&self) -> u16 {
        match self {
            InterruptType::VBlank => VBLANK_VECTOR,
            InterruptType::LCDStat => LCD_STAT_VECTOR,
            InterruptType::Timer => TIMER_VECTOR,
            InterruptType::Serial => SERIAL_VECTOR,
            InterruptType::Joypad => JOYPAD_VECTOR,
        }
    }

    pub fn bit(&self) -> u8 {
        match self {
            InterruptType::VBlank => VBLANK_BIT,
            InterruptType::LCDStat => LCD_STAT_BIT,
            InterruptType::Timer => TIMER_BIT,
            InterruptType::Serial => SERIAL_BIT,
            InterruptType::Joypad => JOYPAD_BIT,
        }
    }
}

/// IF/IE 寄存器；IME 屬於 CPU
#[derive(Debug, Clone, Default)]
pub struct InterruptController {
    /// 中斷啟用寄存器 (IE)
    ie: u8,
    /// 中斷標誌寄存器 (IF)
    if_: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self { ie: 0, if_: 0 }
    }

    pub fn reset(&mut self) {
        self.ie = 0;
        self.if_ = 0;
    }

    /// 已請求且已啟用的中斷位元
    pub fn pending(&self) -> u8 {
        self.ie & self.if_ & INTERRUPT_MASK
    }

    /// 獲取最高優先級的待處理中斷
    pub fn get_highest_priority_interrupt(&self) -> Option<InterruptType> {
        let pending = self.pending();
        InterruptType::ALL
            .into_iter()
            .find(|interrupt| pending & interrupt.bit() != 0)
    }

    /// 請求中斷（重複請求不會累積）
    pub fn request_interrupt(&mut self, interrupt: InterruptType) {
        self.if_ |= interrupt.bit();
    }

    /// 確認中斷已處理，只清除該位元
    pub fn acknowledge_interrupt(&mut self, interrupt: InterruptType) {
        self.if_ &= !interrupt.bit();
    }

    pub fn is_requested(&self, interrupt: InterruptType) -> bool {
        self.if_ & interrupt.bit() != 0
    }

    pub fn read_if(&self) -> u8 {
        self.if_ | IF_UNUSED_BITS
    }

    pub fn write_if(&mut self, value: u8) {
        self.if_ = value & INTERRUPT_MASK;
    }

    pub fn read_ie(&self) -> u8 {
        self.ie
    }

    pub fn write_ie(&mut self, value: u8) {
        self.ie = value;
    }
}
