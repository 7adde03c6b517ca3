use crate::ppu::DEFAULT_SHADES;
use serde::{Deserialize, Serialize};

/// 顯示相關配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub scale: u32,
    /// 顏色編號 0-3 對應的 RGB
    pub palette: [[u8; 3]; 4],
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            scale: 4,
            palette: DEFAULT_SHADES,
        }
    }
}
