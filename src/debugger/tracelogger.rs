use crate::cpu::CPU;
use crate::error::Result;
use crate::interrupts::registers::{IE_REGISTER, IF_REGISTER};
use crate::mmu::MMU;
use crate::ppu::registers::{LCD_CONTROL, LCD_STATUS, LY};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 追蹤行中可選的欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceField {
    A,
    B,
    C,
    D,
    E,
    F,
    H,
    L,
    PC,
    SP,
    Opcode,
    IF,
    IE,
    LY,
    LCDC,
    STAT,
}

impl TraceField {
    pub const DEFAULT: [TraceField; 10] = [
        TraceField::PC,
        TraceField::Opcode,
        TraceField::A,
        TraceField::F,
        TraceField::B,
        TraceField::C,
        TraceField::D,
        TraceField::E,
        TraceField::H,
        TraceField::L,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TraceField::A => "A",
            TraceField::B => "B",
            TraceField::C => "C",
            TraceField::D => "D",
            TraceField::E => "E",
            TraceField::F => "F",
            TraceField::H => "H",
            TraceField::L => "L",
            TraceField::PC => "PC",
            TraceField::SP => "SP",
            TraceField::Opcode => "OP",
            TraceField::IF => "IF",
            TraceField::IE => "IE",
            TraceField::LY => "LY",
            TraceField::LCDC => "LCDC",
            TraceField::STAT => "STAT",
        }
    }

    /// 固定寬度的十六進位值
    pub fn render(self, cpu: &CPU, mmu: &MMU) -> String {
        let regs = &cpu.registers;
        let byte = match self {
            TraceField::PC => return format!("{:04X}", regs.pc),
            TraceField::SP => return format!("{:04X}", regs.sp),
            TraceField::A => regs.a,
            TraceField::B => regs.b,
            TraceField::C => regs.c,
            TraceField::D => regs.d,
            TraceField::E => regs.e,
            TraceField::F => regs.f(),
            TraceField::H => regs.h,
            TraceField::L => regs.l,
            TraceField::Opcode => mmu.read_byte(regs.pc),
            TraceField::IF => mmu.read_byte(IF_REGISTER),
            TraceField::IE => mmu.read_byte(IE_REGISTER),
            TraceField::LY => mmu.read_byte(LY),
            TraceField::LCDC => mmu.read_byte(LCD_CONTROL),
            TraceField::STAT => mmu.read_byte(LCD_STATUS),
        };
        format!("{:02X}", byte)
    }
}

/// 每執行一條指令寫一行；只在啟用時寫入
pub struct TraceLogger {
    fields: Vec<TraceField>,
    writer: Option<BufWriter<Box<dyn Write + Send>>>,
    lines_logged: u64,
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("fields", &self.fields)
            .field("active", &self.is_active())
            .field("lines_logged", &self.lines_logged)
            .finish()
    }
}

impl TraceLogger {
    pub fn new(fields: Vec<TraceField>) -> Self {
        let fields = if fields.is_empty() {
            TraceField::DEFAULT.to_vec()
        } else {
            fields
        };
        Self {
            fields,
            writer: None,
            lines_logged: 0,
        }
    }

    /// 以附加模式開啟追蹤檔
    pub fn start<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        info!("開始追蹤: {}", path.as_ref().display());
        self.start_with_writer(Box::new(file))
    }

    pub fn start_with_writer(&mut self, writer: Box<dyn Write + Send>) -> Result<()> {
        self.stop()?;
        self.writer = Some(BufWriter::new(writer));
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            info!("停止追蹤，共 {} 行", self.lines_logged);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    pub fn fields(&self) -> &[TraceField] {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: Vec<TraceField>) {
        self.fields = fields;
    }

    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }

    /// `NAME:hex` 欄位以單一空白分隔
    pub fn format_line(&self, cpu: &CPU, mmu: &MMU) -> String {
        self.fields
            .iter()
            .map(|field| format!("{}:{}", field.label(), field.render(cpu, mmu)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 在指令執行前呼叫
    pub fn log(&mut self, cpu: &CPU, mmu: &MMU) -> Result<()> {
        if self.writer.is_none() {
            return Ok(());
        }
        let line = self.format_line(cpu, mmu);
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{}", line)?;
            self.lines_logged += 1;
        }
        Ok(())
    }
}

impl Drop for TraceLogger {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }
}
