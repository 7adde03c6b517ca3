use super::background::{tile_pixel, LineBuffer};
use super::registers::*;
use crate::mmu::MMU;

/// 表示一個 Game Boy 精靈（OBJ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub y: i16,      // 螢幕 Y 座標 (OAM 值 - 16)
    pub x: i16,      // 螢幕 X 座標 (OAM 值 - 8)
    pub tile_id: u8, // 圖塊編號
    pub flags: u8,   // 精靈屬性標誌
    pub oam_index: usize,
}

impl Sprite {
    /// 從 4 bytes 的 OAM 數據創建精靈
    pub fn new(oam_index: usize, oam_data: &[u8]) -> Self {
        Sprite {
            y: oam_data[0] as i16 - 16,
            x: oam_data[1] as i16 - 8,
            tile_id: oam_data[2],
            flags: oam_data[3],
            oam_index,
        }
    }

    pub fn uses_obp1(&self) -> bool {
        self.flags & SPRITE_PALETTE != 0
    }

    /// 背景顏色 1-3 會蓋住精靈
    pub fn behind_background(&self) -> bool {
        self.flags & SPRITE_PRIORITY != 0
    }

    pub fn flip_x(&self) -> bool {
        self.flags & SPRITE_X_FLIP != 0
    }

    pub fn flip_y(&self) -> bool {
        self.flags & SPRITE_Y_FLIP != 0
    }

    fn covers_line(&self, ly: u8, height: u8) -> bool {
        let ly = ly as i16;
        ly >= self.y && ly < self.y + height as i16
    }
}

/// 依 OAM 順序找出與掃描線相交的精靈，最多 10 個
pub fn select_sprites(oam: &[u8], ly: u8, height: u8) -> Vec<Sprite> {
    oam.chunks_exact(4)
        .enumerate()
        .map(|(index, data)| Sprite::new(index, data))
        .filter(|sprite| sprite.covers_line(ly, height))
        .take(MAX_SPRITES_PER_LINE)
        .collect()
}

/// 在已畫好背景的掃描線上疊加精靈
pub fn render_sprites(mmu: &MMU, ly: u8, line: &mut LineBuffer) {
    let lcdc = mmu.lcdc();
    if lcdc & LCDC_OBJ_ENABLE == 0 {
        return;
    }

    let height: u8 = if lcdc & LCDC_OBJ_SIZE != 0 { 16 } else { 8 };
    let mut sprites = select_sprites(mmu.oam(), ly, height);
    // X 較小者優先，相同時 OAM 順序較前者優先
    sprites.sort_by_key(|sprite| (sprite.x, sprite.oam_index));

    let vram = mmu.vram();
    let mut claimed = [false; SCREEN_WIDTH];

    for sprite in &sprites {
        let palette = mmu.obj_palette(sprite.uses_obp1() as usize);
        let mut row = (ly as i16 - sprite.y) as u8;
        if sprite.flip_y() {
            row = height - 1 - row;
        }
        let tile = if height == 16 {
            sprite.tile_id & 0xFE
        } else {
            sprite.tile_id
        };
        // 8x16 的下半部就是下一個圖塊，連續存放
        let tile_offset = tile as usize * 16;

        for px in 0..8u8 {
            let screen_x = sprite.x + px as i16;
            if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                continue;
            }
            let screen_x = screen_x as usize;
            if claimed[screen_x] {
                continue;
            }

            let tile_x = if sprite.flip_x() { 7 - px } else { px };
            let color_id = tile_pixel(vram, tile_offset, tile_x, row);
            if color_id == 0 {
                continue; // 透明
            }

            claimed[screen_x] = true;
            if sprite.behind_background() && line.bg_color_ids[screen_x] != 0 {
                continue;
            }
            line.shades[screen_x] = palette[color_id as usize];
        }
    }
}
