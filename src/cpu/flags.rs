// 標誌位常量
pub const FLAG_Z: u8 = 0b1000_0000; // Zero Flag (Bit 7)
pub const FLAG_N: u8 = 0b0100_0000; // Subtract Flag (Bit 6)
pub const FLAG_H: u8 = 0b0010_0000; // Half Carry Flag (Bit 5)
pub const FLAG_C: u8 = 0b0001_0000; // Carry Flag (Bit 4)
pub const FLAG_MASK: u8 = 0b1111_0000; // 低4位未使用，總是為0

use super::registers::Registers;

pub trait FlagOperations {
    fn get_z_flag(&self) -> bool;
    fn get_n_flag(&self) -> bool;
    fn get_h_flag(&self) -> bool;
    fn get_c_flag(&self) -> bool;
    fn set_z_flag(&mut self, value: bool);
    fn set_n_flag(&mut self, value: bool);
    fn set_h_flag(&mut self, value: bool);
    fn set_c_flag(&mut self, value: bool);
    fn update_flags(&mut self, z: bool, n: bool, h: bool, c: bool);
}

fn with_flag(f: u8, flag: u8, value: bool) -> u8 {
    if value {
        f | flag
    } else {
        f & !flag
    }
}

impl FlagOperations for Registers {
    fn get_z_flag(&self) -> bool {
        (self.f() & FLAG_Z) != 0
    }

    fn get_n_flag(&self) -> bool {
        (self.f() & FLAG_N) != 0
    }

    fn get_h_flag(&self) -> bool {
        (self.f() & FLAG_H) != 0
    }

    fn get_c_flag(&self) -> bool {
        (self.f() & FLAG_C) != 0
    }

    fn set_z_flag(&mut self, value: bool) {
        self.set_f(with_flag(self.f(), FLAG_Z, value));
    }

    fn set_n_flag(&mut self, value: bool) {
        self.set_f(with_flag(self.f(), FLAG_N, value));
    }

    fn set_h_flag(&mut self, value: bool) {
        self.set_f(with_flag(self.f(), FLAG_H, value));
    }

    fn set_c_flag(&mut self, value: bool) {
        self.set_f(with_flag(self.f(), FLAG_C, value));
    }

    fn update_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        let mut f = 0;
        f = with_flag(f, FLAG_Z, z);
        f = with_flag(f, FLAG_N, n);
        f = with_flag(f, FLAG_H, h);
        f = with_flag(f, FLAG_C, c);
        self.set_f(f);
    }
}
