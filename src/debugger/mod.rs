// 除錯工具：中斷點與指令追蹤
pub mod breakpoint;
pub mod tracelogger;

pub use breakpoint::{Breakpoint, BreakpointArgs};
pub use tracelogger::{TraceField, TraceLogger};
