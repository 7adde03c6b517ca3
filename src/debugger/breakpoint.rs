use crate::cpu::CPU;
use crate::mmu::MMU;
use std::fmt::Write as _;

/// 中斷點的稀疏條件，只有 `Some` 的欄位會被比較
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointArgs {
    pub a: Option<u8>,
    pub b: Option<u8>,
    pub c: Option<u8>,
    pub d: Option<u8>,
    pub e: Option<u8>,
    pub f: Option<u8>,
    pub h: Option<u8>,
    pub l: Option<u8>,
    pub pc: Option<u16>,
    pub sp: Option<u16>,
    /// PC 位置上的操作碼
    pub opcode: Option<u8>,
    /// CPU 累計的時脈週期
    pub cycles: Option<u64>,
}

impl BreakpointArgs {
    pub fn at_pc(pc: u16) -> Self {
        Self {
            pc: Some(pc),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 編譯後的單一相等條件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    A(u8),
    B(u8),
    C(u8),
    D(u8),
    E(u8),
    F(u8),
    H(u8),
    L(u8),
    PC(u16),
    SP(u16),
    Opcode(u8),
    Cycles(u64),
}

impl Condition {
    fn holds(&self, cpu: &CPU, mmu: &MMU) -> bool {
        let regs = &cpu.registers;
        match *self {
            Condition::A(v) => regs.a == v,
            Condition::B(v) => regs.b == v,
            Condition::C(v) => regs.c == v,
            Condition::D(v) => regs.d == v,
            Condition::E(v) => regs.e == v,
            Condition::F(v) => regs.f() == v,
            Condition::H(v) => regs.h == v,
            Condition::L(v) => regs.l == v,
            Condition::PC(v) => regs.pc == v,
            Condition::SP(v) => regs.sp == v,
            Condition::Opcode(v) => mmu.read_byte(regs.pc) == v,
            Condition::Cycles(v) => cpu.total_cycles() == v,
        }
    }

    fn describe(&self) -> String {
        match *self {
            Condition::A(v) => format!("A={:02X}", v),
            Condition::B(v) => format!("B={:02X}", v),
            Condition::C(v) => format!("C={:02X}", v),
            Condition::D(v) => format!("D={:02X}", v),
            Condition::E(v) => format!("E={:02X}", v),
            Condition::F(v) => format!("F={:02X}", v),
            Condition::H(v) => format!("H={:02X}", v),
            Condition::L(v) => format!("L={:02X}", v),
            Condition::PC(v) => format!("PC={:04X}", v),
            Condition::SP(v) => format!("SP={:04X}", v),
            Condition::Opcode(v) => format!("OP={:02X}", v),
            Condition::Cycles(v) => format!("CYCLES={}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Breakpoint {
    args: BreakpointArgs,
    conditions: Vec<Condition>,
    name: String,
    from_table: bool,
}

impl Breakpoint {
    /// 只把有設定的欄位編譯成條件，順序固定
    pub fn new(args: BreakpointArgs) -> Self {
        let fields = [
            args.a.map(Condition::A),
            args.b.map(Condition::B),
            args.c.map(Condition::C),
            args.d.map(Condition::D),
            args.e.map(Condition::E),
            args.f.map(Condition::F),
            args.h.map(Condition::H),
            args.l.map(Condition::L),
            args.pc.map(Condition::PC),
            args.sp.map(Condition::SP),
            args.opcode.map(Condition::Opcode),
            args.cycles.map(Condition::Cycles),
        ];
        let conditions: Vec<Condition> = fields.into_iter().flatten().collect();

        let mut name = String::new();
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                name.push_str("&&");
            }
            let _ = write!(name, "{}", condition.describe());
        }

        let from_table = matches!(conditions.as_slice(), [Condition::PC(_)]);

        Self {
            args,
            conditions,
            name,
            from_table,
        }
    }

    /// 所有條件皆成立；空的中斷點永遠不觸發
    pub fn check(&self, cpu: &CPU, mmu: &MMU) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.holds(cpu, mmu))
    }

    pub fn args(&self) -> &BreakpointArgs {
        &self.args
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 只限制 PC，代表是從反組譯表上點選設定的
    pub fn from_table(&self) -> bool {
        self.from_table
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}
