use crate::ppu::registers::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::sync::{Arc, Mutex, MutexGuard};

/// RGBA8888 緩衝區大小
pub const FRAME_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// 前台緩衝區，由繪圖端讀取
pub type SharedFrame = Arc<Mutex<Vec<u8>>>;

/// Game Boy 原始四階灰色
pub const DEFAULT_SHADES: [[u8; 3]; 4] = [
    [0xFF, 0xFF, 0xFF], // 白色
    [0xC0, 0xC0, 0xC0], // 淺灰
    [0x60, 0x60, 0x60], // 深灰
    [0x00, 0x00, 0x00], // 黑色
];

/// 雙緩衝顯示：PPU 寫入後台，V-Blank 時與前台交換
#[derive(Debug)]
pub struct Display {
    back: Vec<u8>,
    front: SharedFrame,
    shades: [[u8; 4]; 4],
}

impl Display {
    pub fn new(shades: [[u8; 3]; 4]) -> Self {
        let mut display = Self {
            back: vec![0xFF; FRAME_BUFFER_SIZE],
            front: Arc::new(Mutex::new(vec![0xFF; FRAME_BUFFER_SIZE])),
            shades: [[0; 4]; 4],
        };
        display.set_shades(shades);
        display
    }

    pub fn set_shades(&mut self, shades: [[u8; 3]; 4]) {
        for (rgba, rgb) in self.shades.iter_mut().zip(shades) {
            *rgba = [rgb[0], rgb[1], rgb[2], 0xFF];
        }
    }

    /// 將顏色 ID 轉換為 RGBA 值
    pub fn shade_to_rgba(&self, shade: u8) -> [u8; 4] {
        self.shades[(shade & 0x03) as usize]
    }

    /// 寫入一條已套用調色板的掃描線
    pub fn write_line(&mut self, line: usize, shades: &[u8; SCREEN_WIDTH]) {
        if line >= SCREEN_HEIGHT {
            return;
        }
        let start = line * SCREEN_WIDTH * 4;
        for (x, &shade) in shades.iter().enumerate() {
            let base = start + x * 4;
            let color = self.shade_to_rgba(shade);
            self.back[base..base + 4].copy_from_slice(&color);
        }
    }

    /// 交換前後台緩衝區，只在這裡鎖住前台
    pub fn present(&mut self) {
        let mut front = lock_frame(&self.front);
        std::mem::swap(&mut *front, &mut self.back);
    }

    pub fn clear(&mut self) {
        let white = self.shade_to_rgba(0);
        for pixel in self.back.chunks_exact_mut(4) {
            pixel.copy_from_slice(&white);
        }
        self.present();
    }

    pub fn front_buffer(&self) -> SharedFrame {
        Arc::clone(&self.front)
    }
}

/// 鎖中毒時仍取回資料，畫面資料沒有不變量需要保護
pub fn lock_frame(frame: &SharedFrame) -> MutexGuard<'_, Vec<u8>> {
    match frame.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
