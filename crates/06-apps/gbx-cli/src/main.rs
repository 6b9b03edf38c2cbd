//! Headless host: drives the frame pump against a cartridge file.

use anyhow::{bail, Context, Result};
use app::{
    Intent, LogDiagnostics, PlaybackMode, PumpConfig, RefreshClock, Session, TickOutcome,
};
use clap::{Parser, Subcommand, ValueEnum};
use core_abi::Button;
use gbx_frame::{encode_ppm, MemorySurface};
use inspector_vm::render;
use log::{debug, info};
use mock::DemoCore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type HostSession = Session<DemoCore, MemorySurface, LogDiagnostics>;

/// Largest memory window the `mem` command will request.
const MAX_WINDOW_LEN: u32 = 256;

/// Drive the emulator host without a display.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run the GBX frame pump headlessly", long_about = None)]
struct Cli {
    /// Path to the cartridge image.
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tick the pump N times and report what happened.
    Run {
        /// Number of display refreshes to simulate.
        #[arg(short, long, value_parser = parse_u32, default_value_t = 60)]
        ticks: u32,
        /// Playback mode at the first tick.
        #[arg(short, long, value_enum, default_value_t = ModeArg::Running)]
        mode: ModeArg,
        /// Refresh and print the debug panel.
        #[arg(short, long)]
        debug: bool,
        /// Emit the inspector view-model as NDJSON after every tick.
        #[arg(long)]
        ndjson: bool,
        /// Hold a button for the whole run (repeatable).
        #[arg(short, long, value_parser = parse_button, value_name = "BUTTON")]
        press: Vec<Button>,
        /// Write the final composed surface as a PPM image.
        #[arg(long, value_name = "PATH")]
        dump: Option<PathBuf>,
        /// Integer scale applied to the PPM dump.
        #[arg(long, default_value_t = 1)]
        scale: usize,
    },
    /// Print registers and the memory window without advancing.
    Snapshot,
    /// Dump the core's memory window.
    Mem {
        /// Byte length (decimal or hex, at most 256).
        #[arg(value_parser = parse_window_len, default_value_t = 48, value_name = "LEN")]
        len: u32,
    },
    /// Step N CPU instructions and print the resulting panel.
    Step {
        /// Number of instructions to execute (defaults to 1).
        #[arg(value_parser = parse_u32, default_value_t = 1, value_name = "COUNT")]
        count: u32,
    },
    /// Advance one frame and print the resulting panel.
    StepFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Running,
    Paused,
}

impl From<ModeArg> for PlaybackMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Running => PlaybackMode::Running,
            ModeArg::Paused => PlaybackMode::Paused,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let bytes = load_rom_bytes(&cli.rom)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Run {
            ticks,
            mode,
            debug,
            ndjson,
            press,
            dump,
            scale,
        } => {
            let config = PumpConfig {
                initial_mode: mode.into(),
                debug: debug || ndjson,
                ..PumpConfig::default()
            };
            let mut session = start(bytes, config)?;
            for button in press {
                session.apply(Intent::Button {
                    button,
                    pressed: true,
                })?;
            }
            for now in RefreshClock::new().take(ticks as usize) {
                let outcome = session.tick(now)?;
                if ndjson {
                    let line = session.pump()?.world().inspector.vm.to_ndjson_line()?;
                    out.write_all(line.as_bytes())?;
                }
                trace_outcome(&outcome);
            }
            write!(out, "{}", summary(&session)?)?;
            if debug {
                write!(out, "{}", session.pump()?.debug_panel())?;
            }
            if let Some(path) = dump {
                dump_surface(&session, &path, scale)?;
            }
            finish(session)
        }
        Command::Snapshot => {
            let mut session = start(bytes, inspect_config(48))?;
            session.tick(0.0)?;
            write!(out, "{}", session.pump()?.debug_panel())?;
            finish(session)
        }
        Command::Mem { len } => {
            let mut session = start(bytes, inspect_config(len as usize))?;
            session.tick(0.0)?;
            let vm = &session.pump()?.world().inspector.vm;
            write!(out, "{}", render::hexdump(vm.mem.base, &vm.mem.bytes))?;
            finish(session)
        }
        Command::Step { count } => {
            let mut session = start(bytes, inspect_config(48))?;
            let mut clock = RefreshClock::new();
            let mut stepped = 0;
            for _ in 0..count {
                session.apply(Intent::StepInstruction)?;
                let outcome = session.tick(clock_next(&mut clock))?;
                if outcome.advanced.is_none() {
                    break;
                }
                stepped += 1;
            }
            let pump = session.pump()?;
            writeln!(
                out,
                "Stepped {stepped} instruction(s) -> PC={:04X}",
                pump.world().inspector.vm.cpu.pc
            )?;
            write!(out, "{}", pump.debug_panel())?;
            finish(session)
        }
        Command::StepFrame => {
            let mut session = start(bytes, inspect_config(48))?;
            session.apply(Intent::StepFrame)?;
            session.tick(0.0)?;
            let pump = session.pump()?;
            writeln!(
                out,
                "Advanced one frame -> PC={:04X}",
                pump.world().inspector.vm.cpu.pc
            )?;
            write!(out, "{}", pump.debug_panel())?;
            finish(session)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

fn load_rom_bytes(path: &Path) -> Result<Arc<[u8]>> {
    let data = fs::read(path).with_context(|| format!("failed to read ROM {path:?}"))?;
    Ok(Arc::from(data.into_boxed_slice()))
}

fn start(bytes: Arc<[u8]>, config: PumpConfig) -> Result<HostSession> {
    Session::create(bytes, MemorySurface::new(), LogDiagnostics, config)
        .context("failed to start session")
}

fn inspect_config(memory_window_len: usize) -> PumpConfig {
    PumpConfig {
        memory_window_len,
        initial_mode: PlaybackMode::Paused,
        debug: true,
        ..PumpConfig::default()
    }
}

fn clock_next(clock: &mut RefreshClock) -> f64 {
    clock.next().unwrap_or_default()
}

fn trace_outcome(outcome: &TickOutcome) {
    if outcome.faulted {
        info!("tick {} faulted; playback paused", outcome.tick);
    } else {
        debug!("tick {}: {:?}", outcome.tick, outcome.advanced);
    }
}

fn summary(session: &HostSession) -> Result<String> {
    let world = session.pump()?.world();
    let mut text = format!(
        "ticks={} frames={} instructions={} mode={:?}\n",
        world.perf.ticks, world.perf.frames, world.perf.instructions, world.mode
    );
    if let Some(fault) = &world.last_fault {
        text.push_str(&format!("{fault}\n"));
    }
    Ok(text)
}

fn dump_surface(session: &HostSession, path: &Path, scale: usize) -> Result<()> {
    if scale == 0 {
        bail!("--scale must be at least 1");
    }
    let surface = session.pump()?.surface();
    if surface.presents == 0 {
        bail!("nothing has been rendered yet");
    }
    let ppm = encode_ppm(&surface.pixels, surface.width, surface.height, scale);
    fs::write(path, ppm).with_context(|| format!("failed to write surface dump {path:?}"))?;
    info!(
        "wrote {}x{} surface to {path:?}",
        surface.width * scale,
        surface.height * scale
    );
    Ok(())
}

fn finish(mut session: HostSession) -> Result<()> {
    if session.shutdown().is_none() {
        bail!("session was already shut down");
    }
    Ok(())
}

fn parse_button(input: &str) -> Result<Button, String> {
    Button::from_name(input).ok_or_else(|| {
        format!("unknown button '{input}' (expected up, down, left, right, a, b, start, select)")
    })
}

fn parse_window_len(input: &str) -> Result<u32, String> {
    let len = parse_u32(input)?;
    if len > MAX_WINDOW_LEN {
        return Err(format!(
            "window length {len} exceeds the maximum of {MAX_WINDOW_LEN} bytes"
        ));
    }
    Ok(len)
}

fn parse_u32(input: &str) -> Result<u32, String> {
    if let Some(stripped) = input.strip_prefix("0x") {
        u32::from_str_radix(stripped, 16).map_err(|_| format!("invalid hex value '{input}'"))
    } else {
        input
            .parse::<u32>()
            .map_err(|_| format!("invalid number '{input}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn looping_rom() -> Arc<[u8]> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100] = 0x18;
        rom[0x101] = 0xFE;
        rom.into()
    }

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_u32("0x30"), Ok(48));
        assert_eq!(parse_u32("48"), Ok(48));
        assert!(parse_u32("0xZZ").is_err());
    }

    #[test]
    fn window_length_is_bounded() {
        assert_eq!(parse_window_len("0x100"), Ok(256));
        assert!(parse_window_len("257").is_err());
        assert!(Cli::try_parse_from(["gbx-cli", "game.gb", "mem", "0xFFFFFFFF"]).is_err());
    }

    #[test]
    fn parses_button_names() {
        assert_eq!(parse_button("Start"), Ok(Button::Start));
        assert!(parse_button("turbo").is_err());
    }

    #[test]
    fn cli_accepts_run_flags() {
        let cli = Cli::try_parse_from([
            "gbx-cli", "game.gb", "run", "--ticks", "0x10", "--mode", "paused", "--press",
            "up", "--press", "a", "--debug",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                ticks,
                mode,
                press,
                debug,
                ..
            } => {
                assert_eq!(ticks, 16);
                assert_eq!(mode, ModeArg::Paused);
                assert_eq!(press, vec![Button::Up, Button::A]);
                assert!(debug);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summary_reports_counters() {
        let mut session = start(looping_rom(), PumpConfig::default()).unwrap();
        session.tick(0.0).unwrap();
        session.tick(16.0).unwrap();
        assert_eq!(
            summary(&session).unwrap(),
            "ticks=2 frames=2 instructions=0 mode=Running\n"
        );
    }

    #[test]
    fn summary_includes_fault() {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100] = 0xDD;
        let mut session = start(rom.into(), PumpConfig::default()).unwrap();
        session.tick(0.0).unwrap();
        assert_eq!(
            summary(&session).unwrap(),
            "ticks=1 frames=0 instructions=0 mode=Paused\n\
             core fault at PC=0100: illegal opcode DD\n"
        );
    }

    #[test]
    fn rejects_truncated_rom() {
        let err = start(Arc::from(vec![0u8; 4]), PumpConfig::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("too small"));
    }
}
