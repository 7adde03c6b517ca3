//! 背景模擬執行緒，以訊息控制

use super::console::Console;
use super::gameboy::Snapshot;
use crate::cpu::CPU_CLOCK_SPEED;
use crate::debugger::BreakpointArgs;
use crate::error::{Error, Result};
use crate::joypad::GameBoyKey;
use crate::ppu::registers::CYCLES_PER_FRAME;
use crate::ppu::SharedFrame;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// 一幀的實際時間 (70224 / 4194304 秒)
pub const FRAME_DURATION: Duration =
    Duration::from_nanos(CYCLES_PER_FRAME as u64 * 1_000_000_000 / CPU_CLOCK_SPEED as u64);

/// 送往模擬執行緒的控制訊息
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pause,
    Resume,
    /// 暫停時執行一條指令
    Step,
    Stop,
    Reset,
    Press(GameBoyKey),
    Release(GameBoyKey),
    AddBreakpoint(BreakpointArgs),
    RemoveBreakpoint(usize),
    SetFastMode(bool),
    StartTrace(PathBuf),
    StopTrace,
}

/// 模擬執行緒回報的事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BreakpointHit { index: usize, name: String, pc: u16 },
    Stopped,
}

fn lock_snapshot(snapshot: &Mutex<Snapshot>) -> MutexGuard<'_, Snapshot> {
    match snapshot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// 執行緒內部狀態
struct Worker {
    console: Console,
    commands: Receiver<Command>,
    events: Sender<Event>,
    snapshot: Arc<Mutex<Snapshot>>,
    paused: bool,
    fast_mode: bool,
    /// 恢復後第一條指令不檢查中斷點
    skip_breakpoint: bool,
    frame_cycles: u32,
    frame_start: Instant,
}

impl Worker {
    fn run(mut self) {
        info!("模擬執行緒啟動: {}", self.console.name());
        loop {
            if !self.drain_commands() {
                break;
            }
            if self.paused {
                continue;
            }

            if !self.skip_breakpoint {
                if let Some(index) = self.console.check_breakpoints() {
                    self.hit_breakpoint(index);
                    continue;
                }
            }
            self.skip_breakpoint = false;

            let cycles = self.console.step();
            self.frame_cycles += cycles as u32;
            if self.frame_cycles >= CYCLES_PER_FRAME {
                self.frame_cycles -= CYCLES_PER_FRAME;
                self.publish();
                self.pace();
            }
        }
        if let Err(e) = self.console.stop_trace() {
            warn!("停止追蹤失敗: {}", e);
        }
        if let Err(e) = self.console.flush_battery() {
            warn!("寫入存檔失敗: {}", e);
        }
        self.publish();
        let _ = self.events.send(Event::Stopped);
        info!("模擬執行緒結束");
    }

    /// 處理所有待處理訊息；暫停時阻塞等待。回傳 false 代表要結束
    fn drain_commands(&mut self) -> bool {
        loop {
            let command = if self.paused {
                match self.commands.recv() {
                    Ok(command) => command,
                    Err(_) => return false,
                }
            } else {
                match self.commands.try_recv() {
                    Ok(command) => command,
                    Err(TryRecvError::Empty) => return true,
                    Err(TryRecvError::Disconnected) => return false,
                }
            };

            debug!("收到訊息: {:?}", command);
            match command {
                Command::Pause => {
                    self.paused = true;
                    self.publish();
                }
                Command::Resume => {
                    if self.paused {
                        self.paused = false;
                        self.skip_breakpoint = true;
                        self.frame_start = Instant::now();
                    }
                }
                Command::Step => {
                    self.console.step();
                    self.publish();
                }
                Command::Stop => return false,
                Command::Reset => {
                    self.console.reset();
                    self.frame_cycles = 0;
                    self.publish();
                }
                Command::Press(key) => self.console.press(key),
                Command::Release(key) => self.console.release(key),
                Command::AddBreakpoint(args) => {
                    self.console.add_breakpoint(args);
                }
                Command::RemoveBreakpoint(index) => {
                    if self.console.remove_breakpoint(index).is_none() {
                        warn!("沒有第 {} 個中斷點", index);
                    }
                }
                Command::SetFastMode(enabled) => {
                    self.fast_mode = enabled;
                    self.frame_start = Instant::now();
                }
                Command::StartTrace(path) => {
                    if let Err(e) = self.console.start_trace(&path) {
                        warn!("無法開始追蹤 {}: {}", path.display(), e);
                    }
                }
                Command::StopTrace => {
                    if let Err(e) = self.console.stop_trace() {
                        warn!("停止追蹤失敗: {}", e);
                    }
                }
            }
        }
    }

    fn hit_breakpoint(&mut self, index: usize) {
        self.paused = true;
        self.publish();
        let name = self
            .console
            .breakpoints()
            .get(index)
            .map(|bp| bp.name().to_string())
            .unwrap_or_default();
        let pc = self.console.snapshot().registers.pc;
        info!("中斷點 {} 觸發於 {:04X}", name, pc);
        let _ = self.events.send(Event::BreakpointHit { index, name, pc });
    }

    fn publish(&self) {
        *lock_snapshot(&self.snapshot) = self.console.snapshot();
    }

    /// 非快速模式下等到這一幀的時間結束
    fn pace(&mut self) {
        if !self.fast_mode {
            let elapsed = self.frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                thread::sleep(FRAME_DURATION - elapsed);
            }
        }
        self.frame_start = Instant::now();
    }
}

/// 控制端持有的執行緒把手
pub struct EmulatorThread {
    commands: Sender<Command>,
    events: Receiver<Event>,
    snapshot: Arc<Mutex<Snapshot>>,
    frame: SharedFrame,
    handle: Option<JoinHandle<()>>,
}

impl EmulatorThread {
    pub fn spawn(console: Console, fast_mode: bool) -> Result<Self> {
        Self::spawn_with(console, fast_mode, false)
    }

    /// `paused` 為真時執行緒啟動後立即暫停
    pub fn spawn_with(console: Console, fast_mode: bool, paused: bool) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let snapshot = Arc::new(Mutex::new(console.snapshot()));
        let frame = console.frame_buffer();

        let worker = Worker {
            console,
            commands: command_rx,
            events: event_tx,
            snapshot: Arc::clone(&snapshot),
            paused,
            fast_mode,
            skip_breakpoint: false,
            frame_cycles: 0,
            frame_start: Instant::now(),
        };
        let handle = thread::Builder::new()
            .name("emulator".to_string())
            .spawn(move || worker.run())?;

        Ok(Self {
            commands: command_tx,
            events: event_rx,
            snapshot,
            frame,
            handle: Some(handle),
        })
    }

    pub fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::ThreadStopped)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(Command::Resume)
    }

    pub fn step(&self) -> Result<()> {
        self.send(Command::Step)
    }

    pub fn press(&self, key: GameBoyKey) -> Result<()> {
        self.send(Command::Press(key))
    }

    pub fn release(&self, key: GameBoyKey) -> Result<()> {
        self.send(Command::Release(key))
    }

    pub fn add_breakpoint(&self, args: BreakpointArgs) -> Result<()> {
        self.send(Command::AddBreakpoint(args))
    }

    pub fn snapshot(&self) -> Snapshot {
        lock_snapshot(&self.snapshot).clone()
    }

    pub fn frame_buffer(&self) -> SharedFrame {
        Arc::clone(&self.frame)
    }

    /// 不阻塞地取一個事件
    pub fn try_event(&self) -> Option<Event> {
        self.events.try_recv().ok()
    }

    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// 送出 Stop 並等待執行緒結束
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        let _ = self.commands.send(Command::Stop);
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| Error::ThreadStopped)?;
        }
        Ok(())
    }
}

impl Drop for EmulatorThread {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
