pub mod io_registers;
pub mod mbc;

use self::io_registers::*;
use self::mbc::{create_mbc_controller, MBCController, NoCartridge};
use crate::cartridge::{Cartridge, CartridgeHeader};
use crate::error::LoadError;
use crate::interrupts::{InterruptController, InterruptType, IE_REGISTER, IF_REGISTER};
use crate::joypad::{GameBoyKey, Joypad, JOYP_REGISTER};
use crate::ppu::registers::*;
use crate::timer::registers::{DIV_REGISTER, TAC_REGISTER};
use crate::timer::Timer;
use log::{debug, info, warn};

// Game Boy 記憶體映射
// 0000-00FF: 啟動 ROM（啟用時覆蓋卡匣）
// 0000-3FFF: 16KB ROM Bank 00（卡匣）
// 4000-7FFF: 16KB ROM Bank 01..NN（卡匣）
// 8000-9FFF: 8KB 視訊 RAM (VRAM)
// A000-BFFF: 8KB 外部 RAM（卡匣）
// C000-DFFF: 8KB 工作 RAM
// E000-FDFF: Echo RAM（C000-DDFF 的鏡像）
// FE00-FE9F: Sprite 屬性表 (OAM)
// FEA0-FEFF: 未使用
// FF00-FF7F: I/O 寄存器
// FF80-FFFE: 高速 RAM (HRAM)
// FFFF-FFFF: 中斷啟用寄存器 (IE)

pub const BOOT_ROM_SIZE: usize = 0x100;
pub const VRAM_SIZE: usize = 0x2000;
pub const WRAM_SIZE: usize = 0x2000;
pub const HRAM_SIZE: usize = 0x7F;
pub const IO_SIZE: usize = 0x80;

/// 未使用區域的讀取值
pub const UNUSABLE_READ: u8 = 0xFF;

pub struct MMU {
    mbc: Box<dyn MBCController>,
    cartridge: Option<Cartridge>, // 重置時用來重建 MBC
    boot_rom: Option<Vec<u8>>,
    boot_rom_enabled: bool,
    vram: Vec<u8>,
    wram: Vec<u8>,
    oam: Vec<u8>,
    hram: Vec<u8>,
    io: Vec<u8>,
    pub interrupts: InterruptController,
    pub timer: Timer,
    pub joypad: Joypad,
    bg_palette: [u8; 4],
    obj_palettes: [[u8; 4]; 2],
    serial_output: Vec<u8>,
}

impl std::fmt::Debug for MMU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MMU")
            .field("mbc", &self.mbc.mbc_type())
            .field("rom_bank", &self.mbc.rom_bank())
            .field("boot_rom_enabled", &self.boot_rom_enabled)
            .field("interrupts", &self.interrupts)
            .field("timer", &self.timer)
            .field("joypad", &self.joypad)
            .finish_non_exhaustive()
    }
}

impl Default for MMU {
    fn default() -> Self {
        Self::new()
    }
}

impl MMU {
    pub fn new() -> Self {
        let mut mmu = Self {
            mbc: Box::new(NoCartridge::new()),
            cartridge: None,
            boot_rom: None,
            boot_rom_enabled: false,
            vram: vec![0; VRAM_SIZE],
            wram: vec![0; WRAM_SIZE],
            oam: vec![0; OAM_SIZE],
            hram: vec![0; HRAM_SIZE],
            io: vec![0; IO_SIZE],
            interrupts: InterruptController::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            bg_palette: expand_palette(0),
            obj_palettes: [expand_palette(0); 2],
            serial_output: Vec::new(),
        };
        mmu.reset(true);
        mmu
    }

    /// 清除所有 RAM 與寄存器；卡匣保留，但 MBC 狀態重建（電池 RAM 除外）
    pub fn reset(&mut self, skip_boot: bool) {
        let battery_ram = self.has_battery().then(|| self.mbc.ram().to_vec());
        self.vram.fill(0);
        self.wram.fill(0);
        self.oam.fill(0);
        self.hram.fill(0);
        self.io.fill(0);
        self.interrupts.reset();
        self.timer.reset();
        self.joypad.reset();
        self.serial_output.clear();
        self.bg_palette = expand_palette(0);
        self.obj_palettes = [expand_palette(0); 2];

        self.mbc = match &self.cartridge {
            Some(cartridge) => create_mbc_controller(cartridge.clone()),
            None => Box::new(NoCartridge::new()),
        };
        if let Some(ram) = battery_ram {
            if let Err(e) = self.mbc.load_ram(&ram) {
                warn!("重置時無法保留電池 RAM: {}", e);
            }
        }

        self.boot_rom_enabled = !skip_boot && self.boot_rom.is_some();
        if !self.boot_rom_enabled {
            for (addr, value) in POST_BOOT_IO {
                self.write_byte(addr, value);
            }
            self.interrupts.write_if(0x01);
            self.timer.set_oscillator(POST_BOOT_DIV);
        }
    }

    /// 卡匣必須已完整解析；失敗的載入不會呼叫到這裡
    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        info!(
            "插入卡匣: \"{}\" ({})",
            cartridge.header.title,
            cartridge.header.mbc_type.description()
        );
        self.mbc = create_mbc_controller(cartridge.clone());
        self.cartridge = Some(cartridge);
    }

    pub fn eject_cartridge(&mut self) {
        self.cartridge = None;
        self.mbc = Box::new(NoCartridge::new());
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.cartridge.as_ref().map(|cartridge| &cartridge.header)
    }

    pub fn has_battery(&self) -> bool {
        self.cartridge_header().is_some_and(|header| header.battery)
    }

    /// 卡匣外部 RAM 的內容（電池存檔）
    pub fn external_ram(&self) -> &[u8] {
        self.mbc.ram()
    }

    /// 還原存檔；大小不符時不做任何改動
    pub fn load_external_ram(&mut self, data: &[u8]) -> Result<(), LoadError> {
        self.mbc.load_ram(data)
    }

    /// 目前映射到 0x4000-0x7FFF 的 ROM bank
    pub fn rom_bank(&self) -> usize {
        self.mbc.rom_bank()
    }

    pub fn set_boot_rom(&mut self, data: Vec<u8>) -> Result<(), LoadError> {
        if data.len() != BOOT_ROM_SIZE {
            return Err(LoadError::BadBootRom(data.len()));
        }
        self.boot_rom = Some(data);
        Ok(())
    }

    pub fn has_boot_rom(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom_enabled
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom_enabled => self
                .boot_rom
                .as_ref()
                .map_or(UNUSABLE_READ, |boot| boot[addr as usize]),
            0x0000..=0x7FFF => self.mbc.read(addr),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => self.mbc.read(addr),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            0xE000..=0xFDFF => self.read_byte(addr - 0x2000),
            0xFE00..=0xFE9F => self.oam[(addr - OAM_START) as usize],
            0xFEA0..=0xFEFF => UNUSABLE_READ,
            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            IE_REGISTER => self.interrupts.read_ie(),
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.mbc.write(addr, value),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => self.mbc.write(addr, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.write_byte(addr - 0x2000, value),
            0xFE00..=0xFE9F => self.oam[(addr - OAM_START) as usize] = value,
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            IE_REGISTER => self.interrupts.write_ie(value),
        }
    }

    /// 小端序：低位元組在 addr，高位元組在 addr+1
    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read_byte(addr) as u16;
        let high = self.read_byte(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, (value & 0xFF) as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }

    fn read_io(&self, addr: u16) -> u8 {
        let index = (addr - 0xFF00) as usize;
        match addr {
            JOYP_REGISTER => self.joypad.read(),
            SC_REGISTER => self.io[index] | SC_UNUSED_BITS,
            DIV_REGISTER..=TAC_REGISTER => self.timer.read_register(addr),
            IF_REGISTER => self.interrupts.read_if(),
            SOUND_START..=SOUND_END => {
                self.io[index] | SOUND_READ_MASKS[(addr - SOUND_START) as usize]
            }
            LCD_STATUS => self.io[index] | STAT_UNUSED_BIT,
            BOOT_ROM_DISABLE => UNUSABLE_READ,
            _ if is_unused_io(addr) => UNUSABLE_READ,
            _ => self.io[index],
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        let index = (addr - 0xFF00) as usize;
        match addr {
            JOYP_REGISTER => self.joypad.write(value),
            SC_REGISTER => {
                self.io[index] = value;
                if value & SC_START_INTERNAL == SC_START_INTERNAL {
                    self.serial_transfer();
                }
            }
            DIV_REGISTER..=TAC_REGISTER => {
                if self.timer.write_register(addr, value) {
                    self.interrupts.request_interrupt(InterruptType::Timer);
                }
            }
            IF_REGISTER => self.interrupts.write_if(value),
            LCD_CONTROL => {
                let was_enabled = self.io[index] & LCDC_ENABLE != 0;
                self.io[index] = value;
                if was_enabled && value & LCDC_ENABLE == 0 {
                    debug!("LCD 關閉");
                    self.io[(LY - 0xFF00) as usize] = 0;
                    self.io[(LCD_STATUS - 0xFF00) as usize] &= !STAT_MODE_MASK;
                }
            }
            LCD_STATUS => {
                self.io[index] = (self.io[index] & !STAT_WRITABLE) | (value & STAT_WRITABLE);
            }
            LY => {} // 唯讀
            DMA => {
                self.io[index] = value;
                self.dma_transfer(value);
            }
            BGP => {
                self.io[index] = value;
                self.bg_palette = expand_palette(value);
            }
            OBP0 | OBP1 => {
                self.io[index] = value;
                self.obj_palettes[(addr - OBP0) as usize] = expand_palette(value);
            }
            BOOT_ROM_DISABLE => {
                if value != 0 && self.boot_rom_enabled {
                    info!("啟動 ROM 結束，卸除覆蓋區域");
                    self.boot_rom_enabled = false;
                }
            }
            _ if is_unused_io(addr) => {}
            _ => self.io[index] = value,
        }
    }

    /// OAM DMA：從 value << 8 複製 160 bytes
    fn dma_transfer(&mut self, value: u8) {
        let source = (value as u16) << 8;
        for offset in 0..OAM_SIZE as u16 {
            self.oam[offset as usize] = self.read_byte(source.wrapping_add(offset));
        }
    }

    /// 內部時鐘傳輸立即完成，沒有連線對象時收到 0xFF
    fn serial_transfer(&mut self) {
        let sb = (SB_REGISTER - 0xFF00) as usize;
        let sc = (SC_REGISTER - 0xFF00) as usize;
        let byte = self.io[sb];
        self.serial_output.push(byte);
        debug!("序列埠輸出: {:#04X}", byte);
        self.io[sb] = 0xFF;
        self.io[sc] &= 0x7F;
        self.interrupts.request_interrupt(InterruptType::Serial);
    }

    pub fn serial_output(&self) -> &[u8] {
        &self.serial_output
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.serial_output)
    }

    pub fn request_interrupt(&mut self, interrupt: InterruptType) {
        self.interrupts.request_interrupt(interrupt);
    }

    /// 推進計時器並在溢位時請求中斷
    pub fn update_timer(&mut self, cycles: u8) {
        if self.timer.update(cycles) {
            self.interrupts.request_interrupt(InterruptType::Timer);
        }
    }

    pub fn press_key(&mut self, key: GameBoyKey) {
        if self.joypad.press(key) {
            self.interrupts.request_interrupt(InterruptType::Joypad);
        }
    }

    pub fn release_key(&mut self, key: GameBoyKey) {
        self.joypad.release(key);
    }

    // 以下供 PPU 使用

    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    pub fn oam(&self) -> &[u8] {
        &self.oam
    }

    /// 不經過讀取遮罩的 I/O 原始值
    pub fn io_register(&self, addr: u16) -> u8 {
        self.io[(addr - 0xFF00) as usize]
    }

    pub fn lcdc(&self) -> u8 {
        self.io_register(LCD_CONTROL)
    }

    pub fn stat(&self) -> u8 {
        self.io_register(LCD_STATUS)
    }

    pub fn ly(&self) -> u8 {
        self.io_register(LY)
    }

    pub(crate) fn set_ly(&mut self, ly: u8) {
        self.io[(LY - 0xFF00) as usize] = ly;
    }

    pub(crate) fn set_stat_mode(&mut self, mode: PpuMode) {
        let stat = &mut self.io[(LCD_STATUS - 0xFF00) as usize];
        *stat = (*stat & !STAT_MODE_MASK) | mode as u8;
    }

    pub(crate) fn set_stat_coincidence(&mut self, equal: bool) {
        let stat = &mut self.io[(LCD_STATUS - 0xFF00) as usize];
        if equal {
            *stat |= STAT_LYC_FLAG;
        } else {
            *stat &= !STAT_LYC_FLAG;
        }
    }

    pub fn bg_palette(&self) -> [u8; 4] {
        self.bg_palette
    }

    pub fn obj_palette(&self, index: usize) -> [u8; 4] {
        self.obj_palettes[index & 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{CARTRIDGE_TYPE, RAM_BANK_SIZE, RAM_SIZE, ROM_BANK_SIZE, ROM_SIZE};
    use crate::interrupts::{JOYPAD_BIT, SERIAL_BIT, TIMER_BIT};

    fn mbc1_cartridge(banks: usize) -> Cartridge {
        let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
        for bank in 0..banks {
            rom[bank * ROM_BANK_SIZE] = bank as u8;
        }
        rom[CARTRIDGE_TYPE] = 0x01;
        rom[ROM_SIZE] = (banks / 2).trailing_zeros() as u8;
        rom[RAM_SIZE] = 0x00;
        Cartridge::from_bytes(&rom).unwrap()
    }

    #[test]
    fn test_echo_ram_mirrors_wram() {
        let mut mmu = MMU::new();
        mmu.write_byte(0xC123, 0x42);
        assert_eq!(mmu.read_byte(0xE123), 0x42);
        mmu.write_byte(0xFDFF, 0x24);
        assert_eq!(mmu.read_byte(0xDDFF), 0x24);
    }

    #[test]
    fn test_unusable_region() {
        let mut mmu = MMU::new();
        mmu.write_byte(0xFEA0, 0x12);
        assert_eq!(mmu.read_byte(0xFEA0), UNUSABLE_READ);
        assert_eq!(mmu.read_byte(0xFEFF), UNUSABLE_READ);
    }

    #[test]
    fn test_word_access_is_little_endian() {
        let mut mmu = MMU::new();
        mmu.write_word(0xC000, 0xBEEF);
        assert_eq!(mmu.read_byte(0xC000), 0xEF);
        assert_eq!(mmu.read_byte(0xC001), 0xBE);
        assert_eq!(mmu.read_word(0xC000), 0xBEEF);
    }

    #[test]
    fn test_dma_copies_160_bytes() {
        let mut mmu = MMU::new();
        for i in 0..0xA0u16 {
            mmu.write_byte(0xC100 + i, i as u8);
        }
        mmu.write_byte(DMA, 0xC1);
        assert_eq!(mmu.read_byte(0xFE00), 0x00);
        assert_eq!(mmu.read_byte(0xFE9F), 0x9F);
        assert_eq!(mmu.oam()[0x50], 0x50);
    }

    #[test]
    fn test_palette_expansion() {
        let mut mmu = MMU::new();
        mmu.write_byte(BGP, 0b11_10_01_00);
        assert_eq!(mmu.bg_palette(), [0, 1, 2, 3]);
        mmu.write_byte(OBP1, 0b00_01_10_11);
        assert_eq!(mmu.obj_palette(1), [3, 2, 1, 0]);
        assert_eq!(mmu.read_byte(OBP1), 0b00_01_10_11);
    }

    #[test]
    fn test_forced_bits() {
        let mut mmu = MMU::new();
        mmu.write_byte(IF_REGISTER, 0x00);
        assert_eq!(mmu.read_byte(IF_REGISTER), 0xE0);
        mmu.write_byte(TAC_REGISTER, 0x00);
        assert_eq!(mmu.read_byte(TAC_REGISTER), 0xF8);
        mmu.write_byte(SC_REGISTER, 0x00);
        assert_eq!(mmu.read_byte(SC_REGISTER), 0x7E);
        mmu.write_byte(0xFF1A, 0x00); // NR30
        assert_eq!(mmu.read_byte(0xFF1A), 0x7F);
        assert_eq!(mmu.read_byte(0xFF03), 0xFF);
        assert_eq!(mmu.read_byte(0xFF4D), 0xFF);
    }

    #[test]
    fn test_stat_only_bits_3_to_6_writable() {
        let mut mmu = MMU::new();
        mmu.set_stat_mode(PpuMode::PixelTransfer);
        mmu.write_byte(LCD_STATUS, 0xFF);
        assert_eq!(mmu.read_byte(LCD_STATUS), 0x80 | 0x78 | 0x03);
        mmu.write_byte(LCD_STATUS, 0x00);
        assert_eq!(mmu.read_byte(LCD_STATUS), 0x80 | 0x03);
    }

    #[test]
    fn test_lcd_off_resets_ly_and_mode() {
        let mut mmu = MMU::new();
        mmu.set_ly(0x42);
        mmu.set_stat_mode(PpuMode::VBlank);
        mmu.write_byte(LY, 0x10);
        assert_eq!(mmu.ly(), 0x42);
        mmu.write_byte(LCD_CONTROL, 0x11);
        assert_eq!(mmu.ly(), 0);
        assert_eq!(mmu.stat() & STAT_MODE_MASK, 0);
    }

    #[test]
    fn test_div_write_resets() {
        let mut mmu = MMU::new();
        mmu.update_timer(200);
        mmu.write_byte(DIV_REGISTER, 0x55);
        assert_eq!(mmu.read_byte(DIV_REGISTER), 0);
    }

    #[test]
    fn test_timer_overflow_requests_interrupt() {
        let mut mmu = MMU::new();
        mmu.write_byte(IF_REGISTER, 0);
        mmu.write_byte(0xFF05, 0xFF);
        mmu.write_byte(TAC_REGISTER, 0x05);
        for _ in 0..4 {
            mmu.update_timer(4);
        }
        assert_ne!(mmu.read_byte(IF_REGISTER) & TIMER_BIT, 0);
    }

    #[test]
    fn test_no_cartridge_defaults() {
        let mut mmu = MMU::new();
        assert_eq!(mmu.read_byte(0x0150), 0xFF);
        assert_eq!(mmu.read_byte(0x4000), 0xFF);
        mmu.write_byte(0xA010, 0x77);
        assert_eq!(mmu.read_byte(0xA010), 0x77);
    }

    #[test]
    fn test_bank_zero_resolves_to_one() {
        let mut mmu = MMU::new();
        mmu.load_cartridge(mbc1_cartridge(8));
        mmu.write_byte(0x2000, 0x05);
        assert_eq!(mmu.read_byte(0x4000), 5);
        mmu.write_byte(0x2000, 0x00);
        assert_eq!(mmu.read_byte(0x4000), 1);
        assert_eq!(mmu.rom_bank(), 1);
        assert_eq!(mmu.read_byte(0x0000), 0);
    }

    #[test]
    fn test_boot_overlay() {
        let mut mmu = MMU::new();
        mmu.load_cartridge(mbc1_cartridge(2));
        mmu.set_boot_rom(vec![0x31; BOOT_ROM_SIZE]).unwrap();
        mmu.reset(false);
        assert!(mmu.boot_rom_enabled());
        assert_eq!(mmu.read_byte(0x0000), 0x31);
        assert_eq!(mmu.read_byte(0x0100), 0x00);

        mmu.write_byte(BOOT_ROM_DISABLE, 0x01);
        assert!(!mmu.boot_rom_enabled());
        assert_eq!(mmu.read_byte(0x0000), 0x00);
    }

    #[test]
    fn test_bad_boot_rom_size() {
        let mut mmu = MMU::new();
        assert_eq!(
            mmu.set_boot_rom(vec![0; 10]),
            Err(LoadError::BadBootRom(10))
        );
        assert!(!mmu.has_boot_rom());
    }

    #[test]
    fn test_serial_transfer() {
        let mut mmu = MMU::new();
        mmu.write_byte(IF_REGISTER, 0);
        mmu.write_byte(SB_REGISTER, b'O');
        mmu.write_byte(SC_REGISTER, 0x81);
        mmu.write_byte(SB_REGISTER, b'K');
        mmu.write_byte(SC_REGISTER, 0x81);
        assert_eq!(mmu.serial_output(), b"OK");
        assert_eq!(mmu.read_byte(SC_REGISTER) & 0x80, 0);
        assert_ne!(mmu.read_byte(IF_REGISTER) & SERIAL_BIT, 0);
        assert_eq!(mmu.take_serial_output(), b"OK".to_vec());
        assert!(mmu.serial_output().is_empty());
    }

    #[test]
    fn test_key_press_requests_joypad_interrupt() {
        let mut mmu = MMU::new();
        mmu.write_byte(IF_REGISTER, 0);
        mmu.press_key(GameBoyKey::Start);
        assert_ne!(mmu.read_byte(IF_REGISTER) & JOYPAD_BIT, 0);
        mmu.write_byte(JOYP_REGISTER, 0x10);
        assert_eq!(mmu.read_byte(JOYP_REGISTER) & 0x0F, 0x07);
    }

    fn ram_cartridge(cartridge_type: u8) -> Cartridge {
        let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
        rom[CARTRIDGE_TYPE] = cartridge_type;
        rom[ROM_SIZE] = 0x00;
        rom[RAM_SIZE] = 0x02;
        Cartridge::from_bytes(&rom).unwrap()
    }

    #[test]
    fn test_battery_ram_survives_reset() {
        let mut mmu = MMU::new();
        mmu.load_cartridge(ram_cartridge(0x03));
        assert!(mmu.has_battery());
        mmu.write_byte(0x0000, 0x0A);
        mmu.write_byte(0xA100, 0x77);

        mmu.reset(true);
        assert_eq!(mmu.external_ram()[0x100], 0x77);
        mmu.write_byte(0x0000, 0x0A);
        assert_eq!(mmu.read_byte(0xA100), 0x77);
    }

    #[test]
    fn test_plain_ram_cleared_on_reset() {
        let mut mmu = MMU::new();
        mmu.load_cartridge(ram_cartridge(0x02));
        assert!(!mmu.has_battery());
        mmu.write_byte(0x0000, 0x0A);
        mmu.write_byte(0xA100, 0x77);

        mmu.reset(true);
        assert_eq!(mmu.external_ram()[0x100], 0x00);
    }

    #[test]
    fn test_load_external_ram() {
        let mut mmu = MMU::new();
        mmu.load_cartridge(ram_cartridge(0x03));
        let mut save = vec![0u8; RAM_BANK_SIZE];
        save[0x20] = 0xAB;
        mmu.load_external_ram(&save).unwrap();
        mmu.write_byte(0x0000, 0x0A);
        assert_eq!(mmu.read_byte(0xA020), 0xAB);

        assert_eq!(
            mmu.load_external_ram(&save[..10]),
            Err(LoadError::SaveSize {
                expected: RAM_BANK_SIZE,
                found: 10
            })
        );
        assert_eq!(mmu.read_byte(0xA020), 0xAB);
    }
}
