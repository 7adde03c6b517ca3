pub mod registers;

use self::registers::*;

/// DIV/TIMA/TMA/TAC
///
/// TIMA 在「震盪器選定位元 AND 啟用位元」的下降沿遞增。
/// 寫入 DIV 或 TAC 時同樣檢查下降沿，重現硬體的額外遞增。
#[derive(Debug, Clone, Default)]
pub struct Timer {
    oscillator: u16,      // 16 位元自由運行計數器，高 8 位即 DIV
    tima: u8,             // TIMA 寄存器
    tma: u8,              // TMA 寄存器
    tac: u8,              // TAC 寄存器
    timer_overflow: bool, // 上次更新期間 TIMA 溢位
}

impl Timer {
    pub fn new() -> Timer {
        Timer::default()
    }

    pub fn reset(&mut self) {
        *self = Timer::default();
    }

    /// 推進 `cycles` 個時脈，回傳是否需要請求計時器中斷
    pub fn update(&mut self, cycles: u8) -> bool {
        self.timer_overflow = false;
        let mut interrupt_requested = false;

        for _ in 0..cycles {
            let before = self.tick_signal();
            self.oscillator = self.oscillator.wrapping_add(1);
            if before && !self.tick_signal() {
                interrupt_requested |= self.increment_tima();
            }
        }

        interrupt_requested
    }

    /// 目前的下降沿偵測訊號
    fn tick_signal(&self) -> bool {
        Self::signal_for(self.oscillator, self.tac)
    }

    fn signal_for(oscillator: u16, tac: u8) -> bool {
        let bit = CLOCK_TAP_BITS[(tac & TAC_CLOCK_SELECT) as usize];
        tac & TAC_ENABLE != 0 && (oscillator >> bit) & 1 != 0
    }

    fn increment_tima(&mut self) -> bool {
        let (new_tima, did_overflow) = self.tima.overflowing_add(1);
        if did_overflow {
            self.timer_overflow = true;
            self.tima = self.tma; // 重載 TMA 的值
        } else {
            self.tima = new_tima;
        }
        did_overflow
    }

    /// 回傳值同 `update`：寫入可能引發一次額外遞增
    pub fn write_register(&mut self, addr: u16, value: u8) -> bool {
        match addr {
            DIV_REGISTER => self.write_div(value),
            TIMA_REGISTER => {
                self.tima = value;
                false
            }
            TMA_REGISTER => {
                self.tma = value;
                false
            }
            TAC_REGISTER => self.write_tac(value),
            _ => false,
        }
    }

    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            DIV_REGISTER => self.read_div(),
            TIMA_REGISTER => self.tima,
            TMA_REGISTER => self.tma,
            TAC_REGISTER => self.tac | TAC_UNUSED_BITS,
            _ => 0xFF,
        }
    }

    // DIV 讀寫
    pub fn read_div(&self) -> u8 {
        (self.oscillator >> 8) as u8 // 只返回高 8 位
    }

    fn write_div(&mut self, _value: u8) -> bool {
        let before = self.tick_signal();
        self.oscillator = 0;
        // 歸零後訊號必為低
        before && self.increment_tima()
    }

    fn write_tac(&mut self, value: u8) -> bool {
        let before = self.tick_signal();
        self.tac = value & (TAC_ENABLE | TAC_CLOCK_SELECT);
        before && !self.tick_signal() && self.increment_tima()
    }

    pub fn tima(&self) -> u8 {
        self.tima
    }

    pub fn tma(&self) -> u8 {
        self.tma
    }

    pub fn tac(&self) -> u8 {
        self.tac
    }

    pub fn oscillator(&self) -> u16 {
        self.oscillator
    }

    pub fn overflowed(&self) -> bool {
        self.timer_overflow
    }

    /// 開機後的 DIV 內部值
    pub fn set_oscillator(&mut self, value: u16) {
        self.oscillator = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fastest_timer() -> Timer {
        let mut timer = Timer::new();
        timer.write_register(TAC_REGISTER, TAC_ENABLE | 0x01);
        timer
    }

    #[test]
    fn test_fastest_rate_increments_every_16_cycles() {
        let mut timer = fastest_timer();
        for _ in 0..15 {
            timer.update(1);
        }
        assert_eq!(timer.tima(), 0);
        timer.update(1);
        assert_eq!(timer.tima(), 1);
    }

    #[test]
    fn test_overflow_reloads_tma_and_requests_interrupt() {
        let mut timer = fastest_timer();
        timer.write_register(TMA_REGISTER, 0xAB);
        timer.write_register(TIMA_REGISTER, 0xFF);

        let mut requested = false;
        for _ in 0..16 {
            requested |= timer.update(1);
        }
        assert!(requested);
        assert_eq!(timer.tima(), 0xAB);
    }

    #[test]
    fn test_disabled_timer_does_not_count() {
        let mut timer = Timer::new();
        timer.write_register(TAC_REGISTER, 0x01);
        for _ in 0..100 {
            timer.update(20);
        }
        assert_eq!(timer.tima(), 0);
        // DIV 仍然持續計數
        assert_eq!(timer.read_div(), (2000u16 >> 8) as u8);
    }

    #[test]
    fn test_every_rate_matches_its_period() {
        for select in 0..4u8 {
            let period = CLOCK_PERIODS[select as usize];
            assert_eq!(1u16 << CLOCK_TAP_BITS[select as usize], period / 2);

            let mut timer = Timer::new();
            timer.write_register(TAC_REGISTER, TAC_ENABLE | select);
            for _ in 0..period - 1 {
                timer.update(1);
            }
            assert_eq!(timer.tima(), 0, "選擇 {}", select);
            timer.update(1);
            assert_eq!(timer.tima(), 1, "選擇 {}", select);
            for _ in 0..period {
                timer.update(1);
            }
            assert_eq!(timer.tima(), 2, "選擇 {}", select);
        }
    }

    #[test]
    fn test_slowest_rate() {
        let mut timer = Timer::new();
        timer.write_register(TAC_REGISTER, TAC_ENABLE);
        for _ in 0..64 {
            timer.update(16);
        }
        assert_eq!(timer.tima(), 1);
    }

    #[test]
    fn test_div_write_resets_divider() {
        let mut timer = Timer::new();
        timer.update(255);
        timer.update(1);
        assert_eq!(timer.read_div(), 1);
        timer.write_register(DIV_REGISTER, 0x12);
        assert_eq!(timer.read_div(), 0);
        assert_eq!(timer.oscillator(), 0);
    }

    #[test]
    fn test_div_write_on_high_signal_adds_increment() {
        let mut timer = fastest_timer();
        timer.update(8); // 第 3 位為 1
        timer.write_register(DIV_REGISTER, 0);
        assert_eq!(timer.tima(), 1);

        let mut timer = fastest_timer();
        timer.update(4); // 第 3 位為 0
        timer.write_register(DIV_REGISTER, 0);
        assert_eq!(timer.tima(), 0);
    }

    #[test]
    fn test_tac_disable_on_high_signal_adds_increment() {
        let mut timer = fastest_timer();
        timer.update(8);
        timer.write_register(TAC_REGISTER, 0x01);
        assert_eq!(timer.tima(), 1);
    }

    #[test]
    fn test_tac_reads_upper_bits_high() {
        let mut timer = Timer::new();
        timer.write_register(TAC_REGISTER, 0x05);
        assert_eq!(timer.read_register(TAC_REGISTER), 0xFD);
    }
}
