// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod color;
mod config;
mod droplet;
mod engine;
mod error;
mod frame;
mod grid;
mod logging;
mod renderer;
mod runtime;
mod terminal;
mod theme;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(unix)]
use std::thread;

use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{print_list_charsets, print_list_colors, Args};
use crate::engine::Engine;
use crate::terminal::{restore_terminal_best_effort, TermSize};

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}

/// Raised on SIGINT/SIGTERM/SIGHUP (Ctrl-C on windows); the run loop checks
/// it between ticks.
fn install_stop_flag() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));

    #[cfg(unix)]
    {
        match Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            Ok(mut signals) => {
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    if let Some(sig) = signals.forever().next() {
                        tracing::info!(signal = sig, "stop requested");
                        stop.store(true, Ordering::Relaxed);
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to install signal handlers"),
        }
    }

    #[cfg(windows)]
    {
        let flag = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
    }

    stop
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    let args = Args::parse();

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", env!("GLYPHFALL_BUILD"));
        let sha = env!("GLYPHFALL_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {}", sha);
        }
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let settings = args.settings().unwrap_or_else(|e| fail(e));
    let limit = args.run_limit().unwrap_or_else(|e| fail(e));

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        fail(format!("failed to open log file: {}", e));
    }

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let engine = Engine::new(&settings, TermSize, StdRng::seed_from_u64(seed))
        .unwrap_or_else(|e| fail(e));
    tracing::info!(
        seed,
        width = engine.width(),
        height = engine.height(),
        density = settings.density,
        fps = settings.fps,
        color_mode = ?settings.color_mode,
        "starting rain"
    );

    let stop = install_stop_flag();
    let stats = runtime::run(engine, &settings, limit, &stop)?;

    tracing::info!(
        frames = stats.frames,
        late_frames = stats.late_frames,
        elapsed_s = stats.elapsed.as_secs_f64(),
        "rain stopped"
    );
    Ok(())
}
