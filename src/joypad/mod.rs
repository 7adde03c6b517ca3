/*
================================================================================
手柄輸入模組
================================================================================
P1 (0xFF00) 寄存器：第 4 位選擇方向鍵，第 5 位選擇動作鍵（低電位有效）
================================================================================
*/

use serde::{Deserialize, Serialize};

pub const JOYP_REGISTER: u16 = 0xFF00;

const SELECT_DIRECTION: u8 = 1 << 4;
const SELECT_ACTION: u8 = 1 << 5;
const SELECT_MASK: u8 = SELECT_DIRECTION | SELECT_ACTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameBoyKey {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl GameBoyKey {
    pub const ALL: [GameBoyKey; 8] = [
        GameBoyKey::Right,
        GameBoyKey::Left,
        GameBoyKey::Up,
        GameBoyKey::Down,
        GameBoyKey::A,
        GameBoyKey::B,
        GameBoyKey::Select,
        GameBoyKey::Start,
    ];

    fn is_direction(self) -> bool {
        matches!(
            self,
            GameBoyKey::Right | GameBoyKey::Left | GameBoyKey::Up | GameBoyKey::Down
        )
    }

    /// 在所屬按鍵組內的位元
    fn mask(self) -> u8 {
        1 << (self as u8 & 0x3)
    }
}

#[derive(Debug, Clone)]
pub struct Joypad {
    direction_keys: u8,
    action_keys: u8,
    select: u8,
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Joypad {
    pub fn new() -> Self {
        Joypad {
            direction_keys: 0x0F,
            action_keys: 0x0F,
            select: SELECT_MASK,
        }
    }

    pub fn reset(&mut self) {
        *self = Joypad::new();
    }

    /// 按下按鍵；回傳 true 表示由放開轉為按下，需請求 Joypad 中斷
    pub fn press(&mut self, key: GameBoyKey) -> bool {
        let keys = self.group_mut(key);
        let was_released = *keys & key.mask() != 0;
        *keys &= !key.mask();
        was_released
    }

    pub fn release(&mut self, key: GameBoyKey) {
        let keys = self.group_mut(key);
        *keys |= key.mask();
    }

    pub fn is_pressed(&self, key: GameBoyKey) -> bool {
        let keys = if key.is_direction() {
            self.direction_keys
        } else {
            self.action_keys
        };
        keys & key.mask() == 0
    }

    fn group_mut(&mut self, key: GameBoyKey) -> &mut u8 {
        if key.is_direction() {
            &mut self.direction_keys
        } else {
            &mut self.action_keys
        }
    }

    pub fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & SELECT_DIRECTION == 0 {
            low &= self.direction_keys;
        }
        if self.select & SELECT_ACTION == 0 {
            low &= self.action_keys;
        }
        0xC0 | self.select | low
    }

    pub fn write(&mut self, value: u8) {
        self.select = value & SELECT_MASK;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_selected_reads_high() {
        let mut joypad = Joypad::new();
        joypad.press(GameBoyKey::A);
        assert_eq!(joypad.read(), 0xFF);
    }

    #[test]
    fn test_direction_group() {
        let mut joypad = Joypad::new();
        joypad.press(GameBoyKey::Down);
        joypad.write(0x20); // 選擇方向鍵
        assert_eq!(joypad.read(), 0xE0 | 0x07);

        joypad.write(0x10); // 選擇動作鍵
        assert_eq!(joypad.read(), 0xD0 | 0x0F);
    }

    #[test]
    fn test_action_group() {
        let mut joypad = Joypad::new();
        joypad.press(GameBoyKey::Start);
        joypad.press(GameBoyKey::A);
        joypad.write(0x10);
        assert_eq!(joypad.read() & 0x0F, 0x06);
    }

    #[test]
    fn test_press_reports_new_press_only() {
        let mut joypad = Joypad::new();
        assert!(joypad.press(GameBoyKey::B));
        assert!(!joypad.press(GameBoyKey::B));
        joypad.release(GameBoyKey::B);
        assert!(!joypad.is_pressed(GameBoyKey::B));
        assert!(joypad.press(GameBoyKey::B));
    }
}
