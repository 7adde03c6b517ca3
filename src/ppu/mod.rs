// PPU (Picture Processing Unit) 核心模組
pub mod background; // 背景與視窗渲染
pub mod display; // 雙緩衝顯示與調色
#[allow(clippy::module_inception)]
pub mod ppu; // PPU 主要邏輯
pub mod registers; // PPU 寄存器定義
pub mod sprite; // 精靈渲染

// 重新導出主要組件
pub use display::{lock_frame, SharedFrame, DEFAULT_SHADES, FRAME_BUFFER_SIZE};
pub use ppu::PPU;
pub use registers::{PpuMode, SCREEN_HEIGHT, SCREEN_WIDTH};
