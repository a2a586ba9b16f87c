use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::TIMER_FREQUENCY;
use chip8_core::{Chip8, Status};
use chip8_display::{Display, TextDisplay};

use crate::keymap::keymap;

/// How the driver paces and presents a running Chip8
pub struct Settings {
    pub cycle_time: Duration,
    pub scale: u32,
    pub max_cycles: Option<u64>,
}

/// Counts whole timer periods out of the wall-clock time that passes between cycles
struct Ticker {
    period: Duration,
    owed: Duration,
}

impl Ticker {
    fn new(frequency: u64) -> Self {
        Ticker {
            period: Duration::from_nanos(1_000_000_000 / frequency),
            owed: Duration::from_nanos(0),
        }
    }

    /// Returns how many ticks are due after `elapsed` more time has passed
    fn advance(&mut self, elapsed: Duration) -> u32 {
        self.owed += elapsed;
        let mut ticks = 0;
        while self.owed >= self.period {
            self.owed -= self.period;
            ticks += 1;
        }
        ticks
    }
}

/// Holds the CPU to its clock speed and the timers to `TIMER_FREQUENCY`
struct Pacer {
    cycle_time: Duration,
    last_cycle: Instant,
    timers: Ticker,
}

impl Pacer {
    fn new(cycle_time: Duration) -> Self {
        Pacer {
            cycle_time,
            last_cycle: Instant::now(),
            timers: Ticker::new(TIMER_FREQUENCY),
        }
    }

    /// Sleeps out the rest of the current cycle, then ticks whatever timer periods went by
    fn finish_cycle(&mut self, chip8: &mut Chip8, fast_forward: bool) {
        let elapsed_cycle_time = self.last_cycle.elapsed();
        if !fast_forward && self.cycle_time > elapsed_cycle_time {
            std::thread::sleep(self.cycle_time - elapsed_cycle_time);
        }

        let current_time = Instant::now();
        for _ in 0..self.timers.advance(current_time - self.last_cycle) {
            chip8.tick_timers();
        }
        self.last_cycle = current_time;
    }
}

fn out_of_cycles(cycles: u64, settings: &Settings) -> bool {
    settings.max_cycles.map_or(false, |max| cycles >= max)
}

/// Runs a loaded Chip8 in an SDL window until the window is closed.
///
/// Space fast-forwards while held, Escape quits.
/// Also stops when the Chip8 halts or after `max_cycles`.
pub fn run(chip8: &mut Chip8, settings: &Settings) -> Result<Status> {
    let sdl = sdl2::init().map_err(|e| anyhow!("unable to initialise SDL: {}", e))?;
    let mut display = Display::new(&sdl, settings.scale)
        .map_err(|e| anyhow!("unable to open a window: {}", e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    display
        .render(chip8.frame_buffer())
        .map_err(|e| anyhow!(e))?;

    let mut keys = [false; 16];
    let mut fast_forward = false;
    let mut pacer = Pacer::new(settings.cycle_time);
    let mut status = Status::Running;
    let mut cycles = 0;

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keys[kc as usize] = true,
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keys[kc as usize] = false,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        status = chip8.step(&keys);
        cycles += 1;
        if status.is_halted() || out_of_cycles(cycles, settings) {
            break;
        }

        if chip8.consume_redraw_flag() {
            display
                .render(chip8.frame_buffer())
                .map_err(|e| anyhow!(e))?;
        }

        pacer.finish_cycle(chip8, fast_forward);
    }

    info!("stopped after {} cycles", cycles);
    Ok(status)
}

/// Runs a loaded Chip8 with every key up, printing each new frame to stdout.
///
/// Stops when the Chip8 halts or after `max_cycles`.
pub fn run_headless(chip8: &mut Chip8, settings: &Settings) -> Result<Status> {
    let mut display = TextDisplay::stdout();
    let keys = [false; 16];
    let mut pacer = Pacer::new(settings.cycle_time);
    let mut status = Status::Running;
    let mut cycles = 0;

    while !status.is_halted() && !out_of_cycles(cycles, settings) {
        status = chip8.step(&keys);
        cycles += 1;

        if chip8.consume_redraw_flag() {
            display.render(chip8.frame_buffer())?;
        }

        pacer.finish_cycle(chip8, false);
    }

    info!("stopped after {} cycles", cycles);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_counts_whole_periods() {
        let mut ticker = Ticker::new(60);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(50)), 3);
    }

    #[test]
    fn test_ticker_catches_up_after_a_stall() {
        let mut ticker = Ticker::new(60);
        assert_eq!(ticker.advance(Duration::from_secs(1)), 60);
        assert_eq!(ticker.advance(Duration::from_nanos(0)), 0);
    }

    #[test]
    fn test_out_of_cycles() {
        let mut settings = Settings {
            cycle_time: Duration::from_millis(2),
            scale: 10,
            max_cycles: None,
        };
        assert!(!out_of_cycles(u64::MAX, &settings));
        settings.max_cycles = Some(3);
        assert!(!out_of_cycles(2, &settings));
        assert!(out_of_cycles(3, &settings));
    }
}
