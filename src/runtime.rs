// Copyright (c) 2026 rezky_nightky

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::config::{Settings, DENSITY_RANGE};
use crate::engine::{Engine, SizeSource};
use crate::renderer::Renderer;
use crate::terminal::Terminal;

const DENSITY_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    pub frames: u64,
    pub late_frames: u64,
    pub elapsed: Duration,
}

enum Input {
    Quit,
    Repaint,
    Density(f64),
    Nothing,
}

fn handle_event(ev: Event, density: f64) -> Input {
    match ev {
        Event::Resize(..) => Input::Repaint,
        Event::Key(k) if k.kind == KeyEventKind::Press => match (k.code, k.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => Input::Quit,
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Input::Quit,
            (KeyCode::Char(' '), _) => Input::Repaint,
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => {
                Input::Density((density + DENSITY_STEP).min(DENSITY_RANGE.1))
            }
            (KeyCode::Char('-'), _) => Input::Density((density - DENSITY_STEP).max(DENSITY_RANGE.0)),
            _ => Input::Nothing,
        },
        _ => Input::Nothing,
    }
}

/// Runs the rain until a quit key, `stop` being raised, or `limit` elapsing.
///
/// One tick renders one frame; a tick that overruns its period pushes the
/// next one back instead of overlapping it.
pub fn run<S: SizeSource>(
    mut engine: Engine<S>,
    settings: &Settings,
    limit: Option<Duration>,
    stop: &AtomicBool,
) -> io::Result<RunStats> {
    let _term = Terminal::new()?;
    let renderer = Renderer::new(io::stdout(), settings.color_mode);

    let period = Duration::from_secs_f64(1.0 / f64::from(settings.fps.max(1)));
    let start = Instant::now();
    let end_time = limit.map(|d| start + d);
    let mut next_frame = start;
    let mut density = engine.grid().density();
    let mut stats = RunStats::default();

    'rain: loop {
        loop {
            let now = Instant::now();
            if stop.load(Ordering::Relaxed) || end_time.is_some_and(|end| now >= end) {
                break 'rain;
            }
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                timeout = timeout.min(end.saturating_duration_since(now));
            }
            if !Terminal::poll_event(timeout)? {
                continue;
            }
            match handle_event(Terminal::read_event()?, density) {
                Input::Quit => break 'rain,
                Input::Repaint => renderer.invalidate(),
                Input::Density(d) => {
                    density = d;
                    engine.set_density(d);
                    tracing::info!(density = d, "density changed");
                }
                Input::Nothing => {}
            }
        }

        renderer.draw(engine.next_frame())?;
        stats.frames += 1;

        next_frame += period;
        let now = Instant::now();
        if now > next_frame {
            stats.late_frames += 1;
            next_frame = now;
        }
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}
