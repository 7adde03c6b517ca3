use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 卡帶載入錯誤；發生時不會改動匯流排上現有的卡帶
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// 檔案太短，連卡帶標頭都讀不到
    #[error("ROM 太小: {0} bytes")]
    TooSmall(usize),

    /// 不支援的 MBC 類型代碼 (0x147)
    #[error("不支援的卡帶類型: {0:#04X}")]
    UnsupportedMapper(u8),

    /// ROM 大小代碼 (0x148) 無效
    #[error("無效的 ROM 大小代碼: {0:#04X}")]
    InvalidRomSize(u8),

    /// RAM 大小代碼 (0x149) 無效
    #[error("無效的 RAM 大小代碼: {0:#04X}")]
    InvalidRamSize(u8),

    /// 啟動 ROM 長度錯誤
    #[error("啟動 ROM 長度錯誤: {0} bytes (應為 256)")]
    BadBootRom(usize),

    /// 存檔大小與卡帶外部 RAM 不符
    #[error("存檔大小錯誤: {found} bytes (應為 {expected})")]
    SaveSize { expected: usize, found: usize },

    /// 副檔名對應的主機尚未實作
    #[error("不支援的主機映像: {0}")]
    UnsupportedConsole(PathBuf),
}

/// 模擬器的錯誤類型
#[derive(Error, Debug)]
pub enum Error {
    /// IO 錯誤
    #[error("IO 錯誤: {0}")]
    IO(#[from] io::Error),

    /// 卡帶或啟動 ROM 載入失敗
    #[error("載入錯誤: {0}")]
    Load(#[from] LoadError),

    /// 設定檔格式錯誤
    #[error("設定檔錯誤: {0}")]
    Config(#[from] serde_json::Error),

    /// 模擬執行緒已結束
    #[error("模擬執行緒已停止")]
    ThreadStopped,

    /// 日誌系統初始化失敗
    #[error("日誌初始化失敗: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// 模擬器結果類型
pub type Result<T> = std::result::Result<T, Error>;
