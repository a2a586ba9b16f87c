use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use chip8_core::{Chip8, Fault, LogTracer, Rom, Status, CLOCK_SPEED};

mod keymap;
mod run;

/// Runs a Chip-8 ROM
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// CPU cycles per second
    #[arg(long, default_value_t = 1_000_000_000 / CLOCK_SPEED, value_parser = clap::value_parser!(u64).range(1..))]
    clock_speed: u64,

    /// How many screen pixels make up one Chip-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print frames to stdout instead of opening a window; every key reads as up
    #[arg(long)]
    headless: bool,

    /// Stop after this many CPU cycles
    #[arg(long)]
    max_cycles: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = Rom::from_path(&args.rom)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} byte ROM from {}", rom.len(), args.rom.display());

    let tracer = Box::new(LogTracer);
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(tracer, seed),
        None => Chip8::new(tracer),
    };
    chip8.load_rom(&rom);

    let settings = run::Settings {
        cycle_time: Duration::from_nanos(1_000_000_000 / args.clock_speed),
        scale: args.scale,
        max_cycles: args.max_cycles,
    };
    let status = if args.headless {
        run::run_headless(&mut chip8, &settings)?
    } else {
        run::run(&mut chip8, &settings)?
    };

    if chip8.unknown_opcodes() > 0 {
        warn!("skipped {} unknown opcodes", chip8.unknown_opcodes());
    }
    match status {
        Status::Halted(Fault::OutOfBoundsFetch { pc }) => {
            info!("program ran off its end at {:#05X}", pc);
            Ok(())
        }
        Status::Halted(fault) => Err(fault.into()),
        _ => Ok(()),
    }
}
