//! Headless driver: plays one engine in the terminal on a fixed timer.
//!
//! Usage: `stepviz_cli [life|bubble|merge|quick] [pattern|distribution]`

mod render;

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stepviz::{
    BubbleSort, GridConfig, Life, MergeSort, QuickSort, SeedMode, SortConfig, SortEngine, Stepper,
};

/// Generations shown before giving up on a pattern that never settles.
const MAX_GENERATIONS: u64 = 1000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let simulator = args.get(1).map(String::as_str).unwrap_or("life");
    let variant = args.get(2).map(String::as_str);

    match simulator {
        "life" => {
            let mut config = GridConfig::from_env()?;
            if let Some(mode) = variant {
                config.seed_mode = SeedMode::from(mode);
            }
            info!(width = config.width, height = config.height, mode = %config.seed_mode, "playing life");

            let mut life = Life::new(&config)?;
            let period = Duration::from_millis(config.step_interval_ms);
            play(&mut life, period, MAX_GENERATIONS, render::grid).await?;
        }
        "bubble" | "merge" | "quick" => {
            let mut config = SortConfig::from_env()?;
            if let Some(distribution) = variant {
                config.distribution = distribution.parse()?;
            }
            info!(size = config.size, distribution = %config.distribution, "playing {simulator} sort");

            let mut sort: Box<dyn SortEngine> = match simulator {
                "bubble" => Box::new(BubbleSort::new(&config)?),
                "merge" => Box::new(MergeSort::new(&config)?),
                _ => Box::new(QuickSort::new(&config)?),
            };
            let period = Duration::from_millis(config.step_interval_ms);
            play(sort.as_mut(), period, u64::MAX, |sort| render::bars(sort)).await?;
        }
        other => {
            return Err(format!(
                "unknown simulator {other:?}; expected life, bubble, merge or quick"
            )
            .into());
        }
    }
    Ok(())
}

/// Steps `engine` once per tick, drawing a frame after every step, until it
/// settles, `max_steps` is reached or Ctrl+C arrives.
async fn play<E, F>(engine: &mut E, period: Duration, max_steps: u64, render: F) -> io::Result<()>
where
    E: Stepper + ?Sized,
    F: Fn(&E) -> String,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Hide cursor
    print!("\x1b[?25l");
    let mut calls = 0;
    loop {
        let frame = render(&*engine);
        let mut out = io::stdout().lock();
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        drop(out);

        if engine.settled() || calls >= max_steps {
            break;
        }

        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted");
                break;
            }
        }
        engine.step_once();
        calls += 1;
    }
    print!("\x1b[?25h");
    io::stdout().flush()?;

    info!(steps = engine.steps(), complete = engine.is_complete(), "stopped");
    Ok(())
}
