// Game Boy 模擬器 - 主程式
// minifb 視窗前端，模擬在背景執行緒執行

use anyhow::{Context, Result};
use log::{info, warn};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use retro_emulator::config::{Config, InputConfig};
use retro_emulator::ppu::{lock_frame, SCREEN_HEIGHT, SCREEN_WIDTH};
use retro_emulator::{Command, Console, EmulatorThread, Event, GameBoyKey};
use std::collections::HashSet;
use std::time::Duration;

const DEFAULT_CONFIG: &str = "config.json";

/// 設定檔中的按鍵名稱轉成 minifb 按鍵
fn key_from_name(name: &str) -> Option<Key> {
    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "enter" | "return" => Key::Enter,
        "space" => Key::Space,
        "tab" => Key::Tab,
        "backspace" => Key::Backspace,
        "leftshift" | "lshift" => Key::LeftShift,
        "rightshift" | "rshift" => Key::RightShift,
        "leftctrl" => Key::LeftCtrl,
        "rightctrl" => Key::RightCtrl,
        "a" => Key::A,
        "b" => Key::B,
        "c" => Key::C,
        "d" => Key::D,
        "e" => Key::E,
        "f" => Key::F,
        "g" => Key::G,
        "h" => Key::H,
        "i" => Key::I,
        "j" => Key::J,
        "k" => Key::K,
        "l" => Key::L,
        "m" => Key::M,
        "n" => Key::N,
        "o" => Key::O,
        "p" => Key::P,
        "q" => Key::Q,
        "r" => Key::R,
        "s" => Key::S,
        "t" => Key::T,
        "u" => Key::U,
        "v" => Key::V,
        "w" => Key::W,
        "x" => Key::X,
        "y" => Key::Y,
        "z" => Key::Z,
        _ => return None,
    };
    Some(key)
}

fn scale_from(value: u32) -> Scale {
    match value {
        0 | 1 => Scale::X1,
        2 | 3 => Scale::X2,
        4..=7 => Scale::X4,
        _ => Scale::X8,
    }
}

/// 解析每個 Game Boy 按鍵對應的實體按鍵
fn key_bindings(input: &InputConfig) -> Vec<(Key, GameBoyKey)> {
    GameBoyKey::ALL
        .into_iter()
        .filter_map(|key| match key_from_name(input.key_name(key)) {
            Some(physical) => Some((physical, key)),
            None => {
                warn!("無法辨識的按鍵名稱 \"{}\"", input.key_name(key));
                None
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let rom_file = args.get(1).map(String::as_str).unwrap_or("rom.gb");
    let config_file = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CONFIG);

    let config = Config::load_or_default(config_file)
        .with_context(|| format!("無法讀取設定檔 {}", config_file))?;
    retro_emulator::utils::logger::init(&config.system).context("無法初始化日誌")?;

    let console = Console::from_file(rom_file, &config.system, &config.video)
        .with_context(|| format!("無法載入 ROM {}", rom_file))?;
    info!("{} 啟動: {}", console.name(), rom_file);

    let mut fast_mode = config.system.fast_mode;
    let emulator = EmulatorThread::spawn(console, fast_mode)?;
    let frame = emulator.frame_buffer();

    let mut window = Window::new(
        "Game Boy 模擬器",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        WindowOptions {
            scale: scale_from(config.video.scale),
            ..WindowOptions::default()
        },
    )
    .context("窗口創建失敗")?;
    window.limit_update_rate(Some(Duration::from_micros(16_600)));

    let bindings = key_bindings(&config.input);
    let pause_key = key_from_name(&config.input.pause);
    let step_key = key_from_name(&config.input.step);
    let fast_key = key_from_name(&config.input.fast);

    let mut held: HashSet<GameBoyKey> = HashSet::new();
    let mut paused = false;
    let mut pixels = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // 按鍵狀態只在改變時送出
        for (physical, key) in &bindings {
            let down = window.is_key_down(*physical);
            if down && held.insert(*key) {
                emulator.press(*key)?;
            } else if !down && held.remove(key) {
                emulator.release(*key)?;
            }
        }

        if pause_key.is_some_and(|k| window.is_key_pressed(k, KeyRepeat::No)) {
            paused = !paused;
            emulator.send(if paused { Command::Pause } else { Command::Resume })?;
        }
        if paused && step_key.is_some_and(|k| window.is_key_pressed(k, KeyRepeat::Yes)) {
            emulator.step()?;
        }
        if fast_key.is_some_and(|k| window.is_key_pressed(k, KeyRepeat::No)) {
            fast_mode = !fast_mode;
            emulator.send(Command::SetFastMode(fast_mode))?;
        }

        while let Some(event) = emulator.try_event() {
            match event {
                Event::BreakpointHit { name, pc, .. } => {
                    paused = true;
                    info!("中斷點 {} @ {:04X}，按 {} 繼續", name, pc, config.input.pause);
                }
                Event::Stopped => {
                    warn!("模擬執行緒已停止");
                }
            }
        }

        // RGBA -> 0RGB
        {
            let rgba = lock_frame(&frame);
            for (pixel, chunk) in pixels.iter_mut().zip(rgba.chunks_exact(4)) {
                *pixel = u32::from_be_bytes([0, chunk[0], chunk[1], chunk[2]]);
            }
        }
        window
            .update_with_buffer(&pixels, SCREEN_WIDTH, SCREEN_HEIGHT)
            .context("畫面更新失敗")?;
    }

    let snapshot = emulator.snapshot();
    emulator.stop()?;
    info!(
        "模擬器結束，共 {} 幀、{} 週期",
        snapshot.frame_count, snapshot.total_cycles
    );
    Ok(())
}
