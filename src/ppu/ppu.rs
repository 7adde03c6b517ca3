use super::background::{render_background, render_window, LineBuffer};
use super::display::{Display, SharedFrame};
use super::registers::*;
use super::sprite::render_sprites;
use crate::interrupts::InterruptType;
use crate::mmu::MMU;
use log::{debug, trace};

/// Picture Processing Unit (PPU)
///
/// 以累積週期與下一個邊界比較來切換模式：
/// OAM(80) -> 傳輸(170) -> H-Blank(206)，V-Blank 每行 456，一幀共 70224 週期。
#[derive(Debug)]
pub struct PPU {
    mode: PpuMode,
    clock: u32,
    clock_target: u32,
    window_line: u8,
    /// LCD 關閉時仍推進的幀內計數
    frame_clock: u32,
    lcd_enabled: bool,
    frame_count: u64,
    frame_ready: bool,
    line: LineBuffer,
    display: Display,
}

impl PPU {
    pub fn new(shades: [[u8; 3]; 4]) -> Self {
        Self {
            mode: PpuMode::OamSearch,
            clock: 0,
            clock_target: CYCLES_OAM,
            window_line: 0,
            frame_clock: 0,
            lcd_enabled: true,
            frame_count: 0,
            frame_ready: false,
            line: LineBuffer::new(),
            display: Display::new(shades),
        }
    }

    /// 回到第 0 行的 OAM 掃描
    pub fn reset(&mut self, mmu: &mut MMU) {
        self.clock = 0;
        self.clock_target = CYCLES_OAM;
        self.window_line = 0;
        self.frame_clock = 0;
        self.frame_count = 0;
        self.frame_ready = false;
        self.lcd_enabled = mmu.lcdc() & LCDC_ENABLE != 0;
        self.mode = if self.lcd_enabled {
            PpuMode::OamSearch
        } else {
            PpuMode::HBlank
        };
        mmu.set_ly(0);
        mmu.set_stat_mode(self.mode);
        mmu.set_stat_coincidence(mmu.io_register(LYC) == 0);
        self.display.clear();
    }

    pub fn update(&mut self, cycles: u8, mmu: &mut MMU) {
        let enabled = mmu.lcdc() & LCDC_ENABLE != 0;

        if !enabled {
            if self.lcd_enabled {
                debug!("PPU 停止，LY={}", mmu.ly());
                self.lcd_enabled = false;
                self.mode = PpuMode::HBlank;
                self.frame_clock = 0;
                mmu.set_ly(0);
                mmu.set_stat_mode(PpuMode::HBlank);
            }
            self.frame_clock = (self.frame_clock + cycles as u32) % CYCLES_PER_FRAME;
            return;
        }

        if !self.lcd_enabled {
            debug!("PPU 重新啟動");
            self.lcd_enabled = true;
            self.clock = 0;
            self.clock_target = CYCLES_OAM;
            self.window_line = 0;
            mmu.set_ly(0);
            self.check_coincidence(mmu);
            self.set_mode(PpuMode::OamSearch, mmu);
        }

        self.clock += cycles as u32;
        while self.clock >= self.clock_target {
            self.advance(mmu);
        }
    }

    fn advance(&mut self, mmu: &mut MMU) {
        match self.mode {
            PpuMode::OamSearch => {
                self.set_mode(PpuMode::PixelTransfer, mmu);
                self.clock_target += CYCLES_TRANSFER;
            }
            PpuMode::PixelTransfer => {
                self.render_scanline(mmu);
                self.set_mode(PpuMode::HBlank, mmu);
                self.clock_target += CYCLES_HBLANK;
            }
            PpuMode::HBlank => {
                let ly = mmu.ly() + 1;
                mmu.set_ly(ly);
                self.check_coincidence(mmu);

                if ly == VBLANK_START {
                    self.set_mode(PpuMode::VBlank, mmu);
                    mmu.request_interrupt(InterruptType::VBlank);
                    self.display.present();
                    self.frame_count += 1;
                    self.frame_ready = true;
                    trace!("第 {} 幀完成", self.frame_count);
                    self.clock_target += CYCLES_PER_LINE;
                } else {
                    self.set_mode(PpuMode::OamSearch, mmu);
                    self.clock_target += CYCLES_OAM;
                }
            }
            PpuMode::VBlank => {
                let ly = mmu.ly() + 1;
                if ly == SCANLINES_TOTAL {
                    mmu.set_ly(0);
                    self.check_coincidence(mmu);
                    self.clock -= CYCLES_PER_FRAME;
                    self.clock_target = CYCLES_OAM;
                    self.window_line = 0;
                    self.set_mode(PpuMode::OamSearch, mmu);
                } else {
                    mmu.set_ly(ly);
                    self.check_coincidence(mmu);
                    self.clock_target += CYCLES_PER_LINE;
                }
            }
        }
    }

    /// 切換模式並依 STAT 啟用位元請求 LCD STAT 中斷
    fn set_mode(&mut self, mode: PpuMode, mmu: &mut MMU) {
        self.mode = mode;
        mmu.set_stat_mode(mode);

        let stat = mmu.stat();
        let mut request = mode
            .stat_interrupt_bit()
            .is_some_and(|bit| stat & bit != 0);
        // DMG：進入 V-Blank 時 OAM 位元也會觸發
        if mode == PpuMode::VBlank && stat & STAT_OAM_INT != 0 {
            request = true;
        }
        if request {
            mmu.request_interrupt(InterruptType::LCDStat);
        }
    }

    fn check_coincidence(&mut self, mmu: &mut MMU) {
        let equal = mmu.ly() == mmu.io_register(LYC);
        mmu.set_stat_coincidence(equal);
        if equal && mmu.stat() & STAT_LYC_INT != 0 {
            mmu.request_interrupt(InterruptType::LCDStat);
        }
    }

    fn render_scanline(&mut self, mmu: &MMU) {
        let ly = mmu.ly();
        if ly as usize >= SCREEN_HEIGHT {
            return;
        }
        render_background(mmu, ly, &mut self.line);
        if render_window(mmu, ly, self.window_line, &mut self.line) {
            self.window_line = self.window_line.wrapping_add(1);
        }
        render_sprites(mmu, ly, &mut self.line);
        self.display.write_line(ly as usize, &self.line.shades);
    }

    pub fn mode(&self) -> PpuMode {
        self.mode
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn clock_target(&self) -> u32 {
        self.clock_target
    }

    pub fn frame_clock(&self) -> u32 {
        self.frame_clock
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// 自上次呼叫後是否完成了新的一幀
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    pub fn frame_buffer(&self) -> SharedFrame {
        self.display.front_buffer()
    }

    pub fn set_shades(&mut self, shades: [[u8; 3]; 4]) {
        self.display.set_shades(shades);
    }
}
