mod args;
mod clock;

use std::fs::File;
use std::io::Write;
use std::time::{Duration, Instant};

use ostinato_core::Pattern;

use clock::StepClock;

/// Polling interval of the step clock loop.
const FRAME: Duration = Duration::from_millis(5);

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("ostinato")
        .join("ostinato.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/ostinato.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("ostinato: logging disabled: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, Config::default(), log_file).is_err() {
        eprintln!("ostinato: logger already initialized");
        return;
    }

    log::info!("ostinato starting (log level: {:?})", log_level);
}

fn main() -> std::io::Result<()> {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("ostinato: {}\n{}", e, args::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", args::USAGE);
        return Ok(());
    }
    init_logging(args.verbose);

    let config = ostinato_core::Config::load();
    let mut options = config.options(args.events);
    if let Some(kind) = args.pattern {
        options.pattern = kind;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if options.events.is_empty() {
        log::warn!("no events given; ticks will be silent");
    }

    let bpm = args.bpm.unwrap_or_else(|| config.bpm());
    let steps_per_beat = config.steps_per_beat();
    log::info!(
        "{} over {} events at {} bpm, {} steps/beat",
        options.pattern.name(),
        options.events.len(),
        bpm,
        steps_per_beat
    );

    let mut pattern = Pattern::new(options, |time, event: &Option<String>| {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{:>8.3}\t{}", time, event.as_deref().unwrap_or("~"));
    });

    let mut clock = StepClock::new(bpm as f64, steps_per_beat as f64).primed();
    let mut last = Instant::now();
    while clock.steps() < args.ticks {
        let now = Instant::now();
        let elapsed = now - last;
        last = now;
        let remaining = (args.ticks - clock.steps()) as usize;
        for time in clock.advance(elapsed).into_iter().take(remaining) {
            if let Err(e) = pattern.tick(time) {
                log::error!("tick failed: {}", e);
            }
        }
        std::thread::sleep(FRAME);
    }

    pattern.dispose();
    Ok(())
}
