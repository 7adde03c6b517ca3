use crate::cpu::flags::FlagOperations;
use crate::cpu::CPU;
use crate::mmu::MMU;

/// 操作碼低 3 位（或 3-5 位）編碼的 8 位元運算元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegTarget {
    B,
    C,
    D,
    E,
    H,
    L,
    HL, // (HL) 記憶體
    A,
}

impl RegTarget {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => RegTarget::B,
            1 => RegTarget::C,
            2 => RegTarget::D,
            3 => RegTarget::E,
            4 => RegTarget::H,
            5 => RegTarget::L,
            6 => RegTarget::HL,
            _ => RegTarget::A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RegTarget::B => "B",
            RegTarget::C => "C",
            RegTarget::D => "D",
            RegTarget::E => "E",
            RegTarget::H => "H",
            RegTarget::L => "L",
            RegTarget::HL => "(HL)",
            RegTarget::A => "A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegPair {
    AF,
    BC,
    DE,
    HL,
    SP,
}

impl RegPair {
    /// LD rr,nn / INC rr / ADD HL,rr 的編碼 (bits 4-5)
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 4) & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }

    /// PUSH/POP 的編碼，3 代表 AF
    pub fn stack_from_bits(bits: u8) -> Self {
        match (bits >> 4) & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::AF,
        }
    }

    pub fn read(self, cpu: &CPU) -> u16 {
        match self {
            RegPair::AF => cpu.registers.get_af(),
            RegPair::BC => cpu.registers.get_bc(),
            RegPair::DE => cpu.registers.get_de(),
            RegPair::HL => cpu.registers.get_hl(),
            RegPair::SP => cpu.registers.sp,
        }
    }

    pub fn write(self, cpu: &mut CPU, value: u16) {
        match self {
            RegPair::AF => cpu.registers.set_af(value),
            RegPair::BC => cpu.registers.set_bc(value),
            RegPair::DE => cpu.registers.set_de(value),
            RegPair::HL => cpu.registers.set_hl(value),
            RegPair::SP => cpu.registers.sp = value,
        }
    }
}

/// 條件跳躍的條件 (bits 3-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    pub fn from_bits(opcode: u8) -> Self {
        match (opcode >> 3) & 0x03 {
            0 => Condition::NZ,
            1 => Condition::Z,
            2 => Condition::NC,
            _ => Condition::C,
        }
    }

    pub fn check(self, cpu: &CPU) -> bool {
        match self {
            Condition::NZ => !cpu.registers.get_z_flag(),
            Condition::Z => cpu.registers.get_z_flag(),
            Condition::NC => !cpu.registers.get_c_flag(),
            Condition::C => cpu.registers.get_c_flag(),
        }
    }
}

/// 讀取 8 位元運算元，(HL) 經由匯流排
pub fn read_reg(cpu: &CPU, mmu: &MMU, target: RegTarget) -> u8 {
    match target {
        RegTarget::A => cpu.registers.a,
        RegTarget::B => cpu.registers.b,
        RegTarget::C => cpu.registers.c,
        RegTarget::D => cpu.registers.d,
        RegTarget::E => cpu.registers.e,
        RegTarget::H => cpu.registers.h,
        RegTarget::L => cpu.registers.l,
        RegTarget::HL => mmu.read_byte(cpu.registers.get_hl()),
    }
}

pub fn write_reg(cpu: &mut CPU, mmu: &mut MMU, target: RegTarget, value: u8) {
    match target {
        RegTarget::A => cpu.registers.a = value,
        RegTarget::B => cpu.registers.b = value,
        RegTarget::C => cpu.registers.c = value,
        RegTarget::D => cpu.registers.d = value,
        RegTarget::E => cpu.registers.e = value,
        RegTarget::H => cpu.registers.h = value,
        RegTarget::L => cpu.registers.l = value,
        RegTarget::HL => mmu.write_byte(cpu.registers.get_hl(), value),
    }
}
