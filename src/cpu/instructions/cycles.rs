// CPU 時脈週期常數
pub const CYCLES_1: u8 = 4; // 1 M-cycle = 4 T-cycles
pub const CYCLES_2: u8 = 8; // 2 M-cycles = 8 T-cycles
pub const CYCLES_3: u8 = 12; // 3 M-cycles = 12 T-cycles
pub const CYCLES_4: u8 = 16; // 4 M-cycles = 16 T-cycles
pub const CYCLES_5: u8 = 20; // 5 M-cycles = 20 T-cycles
pub const CYCLES_6: u8 = 24; // 6 M-cycles = 24 T-cycles

// 指令特定週期
pub const NOP: u8 = CYCLES_1;
pub const LD_R_R: u8 = CYCLES_1;
pub const LD_R_N: u8 = CYCLES_2;
pub const LD_R_HL: u8 = CYCLES_2;
pub const LD_HL_N: u8 = CYCLES_3;
pub const LD_RR_A: u8 = CYCLES_2;
pub const LD_A_NN: u8 = CYCLES_4;
pub const LDH_N: u8 = CYCLES_3;
pub const LDH_C: u8 = CYCLES_2;
pub const LD_RR_NN: u8 = CYCLES_3;
pub const LD_NN_SP: u8 = CYCLES_5;
pub const LD_HL_SP_N: u8 = CYCLES_3;
pub const LD_SP_HL: u8 = CYCLES_2;
pub const PUSH: u8 = CYCLES_4;
pub const POP: u8 = CYCLES_3;

pub const ALU_R: u8 = CYCLES_1;
pub const ALU_HL: u8 = CYCLES_2;
pub const ALU_N: u8 = CYCLES_2;
pub const INC_HL_MEM: u8 = CYCLES_3;
pub const INC_RR: u8 = CYCLES_2;
pub const ADD_HL_RR: u8 = CYCLES_2;
pub const ADD_SP_N: u8 = CYCLES_4;

pub const JP: u8 = CYCLES_4;
pub const JP_NOT_TAKEN: u8 = CYCLES_3;
pub const JP_HL: u8 = CYCLES_1;
pub const JR: u8 = CYCLES_3;
pub const JR_NOT_TAKEN: u8 = CYCLES_2;
pub const CALL: u8 = CYCLES_6;
pub const CALL_NOT_TAKEN: u8 = CYCLES_3;
pub const RET: u8 = CYCLES_4;
pub const RET_CC_TAKEN: u8 = CYCLES_5;
pub const RET_CC_NOT_TAKEN: u8 = CYCLES_2;
pub const RST: u8 = CYCLES_4;

// CB 前綴：前綴本身 4，再加上各指令的週期
pub const CB_PREFIX: u8 = CYCLES_1;
pub const CB_R: u8 = CYCLES_1;
pub const CB_BIT_HL: u8 = CYCLES_2;
pub const CB_HL: u8 = CYCLES_3;

/// 中斷服務：兩個等待週期、推入 PC、跳至向量
pub const INTERRUPT_DISPATCH: u8 = CYCLES_5;
