use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// `log` 後端：寫到 stderr，並可同時附加到檔案
pub struct Logger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Logger { level, file: None }
    }

    /// 以附加模式開啟日誌檔
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        self.file = Some(Mutex::new(file));
        Ok(self)
    }

    /// `[時間] [等級] [模組] 訊息`
    pub fn format_record(record: &Record) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    /// 安裝為全域 logger，只能呼叫一次
    pub fn install(self) -> crate::Result<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        let _ = writeln!(io::stderr(), "{}", line);
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// 依系統設定初始化日誌
pub fn init(config: &crate::config::SystemConfig) -> crate::Result<()> {
    let mut logger = Logger::new(config.level_filter());
    if let Some(path) = &config.log_file {
        logger = logger.with_file(path)?;
    }
    logger.install()
}
