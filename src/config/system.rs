use crate::debugger::TraceField;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 模擬核心與日誌相關配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub boot_rom_path: Option<PathBuf>,
    /// 沒有啟動 ROM 時一律跳過
    pub skip_boot: bool,
    /// 取消每幀的等待
    pub fast_mode: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub trace_path: Option<PathBuf>,
    pub trace_fields: Vec<TraceField>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            boot_rom_path: None,
            skip_boot: true,
            fast_mode: false,
            log_level: "info".to_string(),
            log_file: None,
            trace_path: None,
            trace_fields: TraceField::DEFAULT.to_vec(),
        }
    }
}

impl SystemConfig {
    /// 無法辨識的等級退回 info
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
