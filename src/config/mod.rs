pub mod input;
pub mod system;
pub mod video;

pub use input::InputConfig;
pub use system::SystemConfig;
pub use video::VideoConfig;

use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 全局配置結構，以 JSON 儲存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub video: VideoConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        info!("載入設定檔: {}", path.as_ref().display());
        Ok(config)
    }

    /// 檔案不存在時使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }
}

/// 配置構建器
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::new(),
        }
    }

    pub fn video_config(mut self, config: VideoConfig) -> Self {
        self.config.video = config;
        self
    }

    pub fn system_config(mut self, config: SystemConfig) -> Self {
        self.config.system = config;
        self
    }

    pub fn input_config(mut self, config: InputConfig) -> Self {
        self.config.input = config;
        self
    }

    pub fn boot_rom<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.system.boot_rom_path = Some(path.as_ref().to_path_buf());
        self.config.system.skip_boot = false;
        self
    }

    pub fn fast_mode(mut self, enabled: bool) -> Self {
        self.config.system.fast_mode = enabled;
        self
    }

    pub fn palette(mut self, palette: [[u8; 3]; 4]) -> Self {
        self.config.video.palette = palette;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugger::TraceField;
    use crate::joypad::GameBoyKey;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"system": {"fast_mode": true}, "video": {"scale": 2}}"#)
                .unwrap();
        assert!(config.system.fast_mode);
        assert!(config.system.skip_boot);
        assert_eq!(config.video.scale, 2);
        assert_eq!(config.video.palette, crate::ppu::DEFAULT_SHADES);
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("config_{}.json", std::process::id()));
        let config = ConfigBuilder::new()
            .fast_mode(true)
            .palette([[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]])
            .system_config(SystemConfig {
                trace_fields: vec![TraceField::PC, TraceField::LY],
                log_level: "debug".to_string(),
                ..SystemConfig::default()
            })
            .build();
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        // system_config 在 fast_mode 之後套用，覆蓋掉 fast_mode
        assert!(!loaded.system.fast_mode);
        assert_eq!(loaded.video.palette[3], [10, 11, 12]);
        assert_eq!(loaded.system.trace_fields, vec![TraceField::PC, TraceField::LY]);
        assert_eq!(loaded.system.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let path = std::env::temp_dir().join(format!("config_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Config::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_key_lookup() {
        let input = InputConfig::default();
        assert_eq!(input.key_for("x"), Some(GameBoyKey::A));
        assert_eq!(input.key_for("Enter"), Some(GameBoyKey::Start));
        assert_eq!(input.key_for("Q"), None);
        assert_eq!(input.key_name(GameBoyKey::Select), "RightShift");
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let system = SystemConfig {
            log_level: "loud".to_string(),
            ..SystemConfig::default()
        };
        assert_eq!(system.level_filter(), log::LevelFilter::Info);
    }
}
