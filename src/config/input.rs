use crate::joypad::GameBoyKey;
use serde::{Deserialize, Serialize};

/// 鍵盤按鍵名稱，由前端轉換成實際按鍵
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub a: String,
    pub b: String,
    pub start: String,
    pub select: String,
    pub pause: String,
    pub step: String,
    pub fast: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            up: "Up".to_string(),
            down: "Down".to_string(),
            left: "Left".to_string(),
            right: "Right".to_string(),
            a: "X".to_string(),
            b: "Z".to_string(),
            start: "Enter".to_string(),
            select: "RightShift".to_string(),
            pause: "P".to_string(),
            step: "N".to_string(),
            fast: "Tab".to_string(),
        }
    }
}

impl InputConfig {
    pub fn key_name(&self, key: GameBoyKey) -> &str {
        match key {
            GameBoyKey::Up => &self.up,
            GameBoyKey::Down => &self.down,
            GameBoyKey::Left => &self.left,
            GameBoyKey::Right => &self.right,
            GameBoyKey::A => &self.a,
            GameBoyKey::B => &self.b,
            GameBoyKey::Start => &self.start,
            GameBoyKey::Select => &self.select,
        }
    }

    /// 依名稱找 Game Boy 按鍵，名稱不分大小寫
    pub fn key_for(&self, name: &str) -> Option<GameBoyKey> {
        GameBoyKey::ALL
            .into_iter()
            .find(|key| self.key_name(*key).eq_ignore_ascii_case(name))
    }
}
