// 以記憶體內建立的 ROM 測試整台機器
use retro_emulator::config::{SystemConfig, VideoConfig};
use retro_emulator::emulator::runner::Command;
use retro_emulator::{BreakpointArgs, Console, EmulatorThread, Event, GameBoy, LoadError};
use std::time::Duration;

/// ROM-only 映像，程式放在 0x0100，另可在任意位址放資料
fn build_rom(cartridge_type: u8, rom_code: u8, patches: &[(usize, &[u8])]) -> Vec<u8> {
    let banks = 2usize << rom_code;
    let mut rom = vec![0u8; banks * 0x4000];
    rom[0x134..0x13C].copy_from_slice(b"ROMTEST\0");
    rom[0x147] = cartridge_type;
    rom[0x148] = rom_code;
    rom[0x149] = 0x00;
    for (addr, bytes) in patches {
        rom[*addr..*addr + bytes.len()].copy_from_slice(bytes);
    }
    rom
}

fn run_steps(gb: &mut GameBoy, steps: usize) {
    for _ in 0..steps {
        gb.step();
    }
}

#[test]
fn serial_output_is_captured() {
    #[rustfmt::skip]
    let program = [
        0x3E, b'O', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, // 送出 'O'
        0x3E, b'K', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, // 送出 'K'
        0x18, 0xFE,                                     // JR -2
    ];
    let mut gb = GameBoy::new();
    gb.load_from_bytes(&build_rom(0x00, 0x00, &[(0x100, &program)]))
        .unwrap();
    run_steps(&mut gb, 20);

    assert_eq!(gb.take_serial_output(), b"OK".to_vec());
    assert_eq!(gb.mmu.read_byte(0xFF01), 0xFF);
    assert_eq!(gb.mmu.read_byte(0xFF02) & 0x80, 0);
    assert!(gb.take_serial_output().is_empty());
}

#[test]
fn timer_interrupt_runs_handler() {
    #[rustfmt::skip]
    let program = [
        0x3E, 0x05, 0xE0, 0x07, // TAC: 啟用，每 16 週期
        0xAF, 0xE0, 0x0F,       // IF = 0
        0x3E, 0x04, 0xE0, 0xFF, // IE = Timer
        0x3E, 0xFE, 0xE0, 0x05, // TIMA = 0xFE
        0xFB,                   // EI
        0x18, 0xFE,             // JR -2
    ];
    // 0x50: LD A,0x99 ; LD (C000),A ; JR -2
    let handler = [0x3E, 0x99, 0xEA, 0x00, 0xC0, 0x18, 0xFE];
    let mut gb = GameBoy::new();
    gb.load_from_bytes(&build_rom(0x00, 0x00, &[(0x100, &program), (0x50, &handler)]))
        .unwrap();
    run_steps(&mut gb, 400);

    assert_eq!(gb.mmu.read_byte(0xC000), 0x99);
    assert!(!gb.cpu.ime);
    assert!((0x50..0x57).contains(&gb.cpu.registers.pc));
}

#[test]
fn mbc1_switches_rom_banks() {
    let mut gb = GameBoy::new();
    let rom = build_rom(
        0x01,
        0x01,
        &[(0x4000, &[0x01]), (0x8000, &[0x02]), (0xC000, &[0x03])],
    );
    gb.load_from_bytes(&rom).unwrap();

    assert_eq!(gb.mmu.read_byte(0x4000), 0x01);
    gb.mmu.write_byte(0x2000, 0x02);
    assert_eq!(gb.mmu.read_byte(0x4000), 0x02);
    assert_eq!(gb.snapshot().rom_bank, 2);
    // bank 0 視為 bank 1
    gb.mmu.write_byte(0x2000, 0x00);
    assert_eq!(gb.mmu.read_byte(0x4000), 0x01);
    // 超出實體 bank 數取餘數
    gb.mmu.write_byte(0x2000, 0x07);
    assert_eq!(gb.mmu.read_byte(0x4000), 0x03);
}

#[test]
fn failed_load_leaves_bus_untouched() {
    let mut gb = GameBoy::new();
    gb.load_from_bytes(&build_rom(0x00, 0x00, &[(0x100, &[0x3C])]))
        .unwrap();
    gb.step();
    gb.mmu.write_byte(0xC123, 0x5A);
    let before = gb.snapshot();

    let err = gb
        .load_from_bytes(&build_rom(0x05, 0x00, &[]))
        .unwrap_err();
    assert_eq!(err, LoadError::UnsupportedMapper(0x05));
    assert_eq!(gb.snapshot(), before);
    assert_eq!(gb.mmu.read_byte(0x0100), 0x3C);
    assert_eq!(gb.mmu.read_byte(0xC123), 0x5A);

    assert_eq!(
        gb.load_from_bytes(&[0u8; 0x100]),
        Err(LoadError::TooSmall(0x100))
    );
}

#[test]
fn full_frame_returns_ppu_to_start() {
    let mut gb = GameBoy::new();
    gb.load_from_bytes(&build_rom(0x00, 0x00, &[(0x100, &[0x18, 0xFE])]))
        .unwrap();
    gb.run_frame();
    gb.run_frame();
    assert_eq!(gb.snapshot().frame_count, 2);
    let frame = gb.frame_buffer();
    let pixels = retro_emulator::ppu::lock_frame(&frame);
    assert_eq!(pixels.len(), retro_emulator::ppu::FRAME_BUFFER_SIZE);
}

#[test]
fn console_rejects_other_systems() {
    let result = Console::from_file(
        "cart.nes",
        &SystemConfig::default(),
        &VideoConfig::default(),
    );
    assert!(matches!(
        result,
        Err(retro_emulator::Error::Load(LoadError::UnsupportedConsole(_)))
    ));
}

#[test]
fn runner_pauses_on_breakpoint_and_resumes() {
    #[rustfmt::skip]
    let program = [
        0x3C,             // 0100: INC A
        0xFE, 0x10,       // 0101: CP 0x10
        0x20, 0xFB,       // 0103: JR NZ,-5
        0x18, 0xFE,       // 0105: JR -2
    ];
    let mut gb = GameBoy::new();
    gb.load_from_bytes(&build_rom(0x00, 0x00, &[(0x100, &program)]))
        .unwrap();

    let thread = EmulatorThread::spawn_with(Console::from(gb), true, true).unwrap();
    thread
        .add_breakpoint(BreakpointArgs {
            a: Some(0x10),
            pc: Some(0x0105),
            ..Default::default()
        })
        .unwrap();
    thread.resume().unwrap();

    let event = thread
        .events()
        .recv_timeout(Duration::from_secs(5))
        .unwrap();
    assert_eq!(
        event,
        Event::BreakpointHit {
            index: 0,
            name: "A=10&&PC=0105".to_string(),
            pc: 0x0105
        }
    );
    assert_eq!(thread.snapshot().registers.a, 0x10);

    thread.send(Command::RemoveBreakpoint(0)).unwrap();
    thread.step().unwrap();
    thread.send(Command::Stop).unwrap();
    assert_eq!(
        thread
            .events()
            .recv_timeout(Duration::from_secs(5))
            .unwrap(),
        Event::Stopped
    );
    assert_eq!(thread.snapshot().registers.pc, 0x0105);
}
