//! 背景與視窗渲染，產生一條掃描線的顏色

use super::registers::*;
use crate::mmu::MMU;

/// 一條掃描線的中間結果
#[derive(Debug)]
pub struct LineBuffer {
    /// 套用調色板後的顏色 (0-3)
    pub shades: [u8; SCREEN_WIDTH],
    /// 背景/視窗的原始顏色 ID，用於精靈優先權
    pub bg_color_ids: [u8; SCREEN_WIDTH],
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            shades: [0; SCREEN_WIDTH],
            bg_color_ids: [0; SCREEN_WIDTH],
        }
    }

    pub fn clear(&mut self) {
        self.shades = [0; SCREEN_WIDTH];
        self.bg_color_ids = [0; SCREEN_WIDTH];
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// 圖塊在 VRAM 內的偏移：0x8000 無符號或 0x8800 有符號定址
pub fn tile_data_offset(lcdc: u8, tile_index: u8) -> usize {
    if lcdc & LCDC_TILE_DATA != 0 {
        (VRAM_TILE_DATA_0 - 0x8000) as usize + tile_index as usize * 16
    } else {
        (VRAM_TILE_DATA_1 - 0x8000) as usize + (tile_index as i8 as i16 + 128) as usize * 16
    }
}

/// 圖塊中 (px, py) 的顏色 ID
pub fn tile_pixel(vram: &[u8], tile_offset: usize, px: u8, py: u8) -> u8 {
    let low = vram[tile_offset + py as usize * 2];
    let high = vram[tile_offset + py as usize * 2 + 1];
    let bit = 7 - px;
    (((high >> bit) & 1) << 1) | ((low >> bit) & 1)
}

fn map_offset(lcdc: u8, select_bit: u8) -> usize {
    let base = if lcdc & select_bit != 0 {
        VRAM_MAP_1
    } else {
        VRAM_MAP_0
    };
    (base - 0x8000) as usize
}

/// 渲染背景；BG 關閉時整條線為顏色 0
pub fn render_background(mmu: &MMU, ly: u8, line: &mut LineBuffer) {
    let lcdc = mmu.lcdc();
    if lcdc & LCDC_BG_ENABLE == 0 {
        line.clear();
        return;
    }

    let vram = mmu.vram();
    let palette = mmu.bg_palette();
    let scx = mmu.io_register(SCX);
    let scy = mmu.io_register(SCY);
    let map = map_offset(lcdc, LCDC_BG_MAP);
    let y = ly.wrapping_add(scy);

    for screen_x in 0..SCREEN_WIDTH {
        let x = (screen_x as u8).wrapping_add(scx);
        let tile_index = vram[map + (y as usize / 8) * 32 + x as usize / 8];
        let color_id = tile_pixel(vram, tile_data_offset(lcdc, tile_index), x % 8, y % 8);
        line.bg_color_ids[screen_x] = color_id;
        line.shades[screen_x] = palette[color_id as usize];
    }
}

/// 渲染視窗；回傳此線是否有畫到視窗（用來推進視窗內部行計數）
pub fn render_window(mmu: &MMU, ly: u8, window_line: u8, line: &mut LineBuffer) -> bool {
    let lcdc = mmu.lcdc();
    let wy = mmu.io_register(WINDOW_Y);
    let wx = mmu.io_register(WINDOW_X);

    if lcdc & LCDC_WIN_ENABLE == 0 || lcdc & LCDC_BG_ENABLE == 0 || ly < wy || wx > 166 {
        return false;
    }

    let vram = mmu.vram();
    let palette = mmu.bg_palette();
    let map = map_offset(lcdc, LCDC_WIN_MAP);
    let start_x = wx as i16 - 7;

    for screen_x in start_x.max(0) as usize..SCREEN_WIDTH {
        let x = (screen_x as i16 - start_x) as u8;
        let tile_index = vram[map + (window_line as usize / 8) * 32 + x as usize / 8];
        let color_id = tile_pixel(
            vram,
            tile_data_offset(lcdc, tile_index),
            x % 8,
            window_line % 8,
        );
        line.bg_color_ids[screen_x] = color_id;
        line.shades[screen_x] = palette[color_id as usize];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_data_addressing() {
        assert_eq!(tile_data_offset(LCDC_TILE_DATA, 0), 0x0000);
        assert_eq!(tile_data_offset(LCDC_TILE_DATA, 0xFF), 0x0FF0);
        // 有符號定址：0 號在 0x9000，-128 號在 0x8800
        assert_eq!(tile_data_offset(0, 0), 0x1000);
        assert_eq!(tile_data_offset(0, 0x80), 0x0800);
        assert_eq!(tile_data_offset(0, 0x7F), 0x17F0);
    }

    #[test]
    fn test_tile_pixel_combines_bit_planes() {
        let mut vram = vec![0u8; 16];
        vram[0] = 0b1000_0001;
        vram[1] = 0b1000_0010;
        assert_eq!(tile_pixel(&vram, 0, 0, 0), 3);
        assert_eq!(tile_pixel(&vram, 0, 6, 0), 2);
        assert_eq!(tile_pixel(&vram, 0, 7, 0), 1);
        assert_eq!(tile_pixel(&vram, 0, 3, 0), 0);
    }
}
