use super::flags::FLAG_MASK;

/// 暫存器組；F 的低 4 位永遠為 0，只能經由 `set_f`/`set_af` 寫入
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,   // 累加器
    f: u8,       // 標誌寄存器
    pub b: u8,   // B 寄存器
    pub c: u8,   // C 寄存器
    pub d: u8,   // D 寄存器
    pub e: u8,   // E 寄存器
    pub h: u8,   // H 寄存器
    pub l: u8,   // L 寄存器
    pub sp: u16, // 堆疊指針
    pub pc: u16, // 程序計數器
}

impl Registers {
    /// 跳過啟動 ROM 後的暫存器值
    pub fn new() -> Self {
        Self {
            a: 0x01,
            f: 0xB0, // Z, H, C
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    pub fn f(&self) -> u8 {
        self.f
    }

    pub fn set_f(&mut self, value: u8) {
        self.f = value & FLAG_MASK;
    }

    // 16位寄存器對訪問方法
    pub fn get_af(&self) -> u16 {
        ((self.a as u16) << 8) | (self.f as u16)
    }

    pub fn get_bc(&self) -> u16 {
        ((self.b as u16) << 8) | (self.c as u16)
    }

    pub fn get_de(&self) -> u16 {
        ((self.d as u16) << 8) | (self.e as u16)
    }

    pub fn get_hl(&self) -> u16 {
        ((self.h as u16) << 8) | (self.l as u16)
    }

    pub fn set_af(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.set_f((value & 0xFF) as u8);
    }

    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = (value & 0xFF) as u8;
    }

    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = (value & 0xFF) as u8;
    }

    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = (value & 0xFF) as u8;
    }
}
