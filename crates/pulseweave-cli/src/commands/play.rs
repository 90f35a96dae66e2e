use std::time::Duration;

use clap::Args;
use tokio::io::AsyncBufReadExt;
use tokio::time::Instant;

use pulseweave_core::{Catalog, Config, InputEvent, NullSink, Session, VibrationSink};

use crate::console::ConsoleSink;

/// Cadence for driving the caller-ticked engine.
const TICK: Duration = Duration::from_millis(10);

#[derive(Args)]
pub struct PlayArgs {
    /// Pattern name (defaults to the first in the catalog)
    pub pattern: Option<String>,
    /// Playback intensity in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub intensity: f32,
    /// Stop after this many full cycles
    #[arg(long)]
    pub cycles: Option<u64>,
    /// Stop after this many seconds
    #[arg(long)]
    pub seconds: Option<u64>,
    /// Override the random pattern seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Use the silent no-op sink instead of narrating pulses
    #[arg(long)]
    pub silent: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Use the silent no-op sink instead of narrating pulses
    #[arg(long)]
    pub silent: bool,
}

fn make_sink(silent: bool) -> Box<dyn VibrationSink> {
    if silent {
        Box::new(NullSink)
    } else {
        Box::new(ConsoleSink::new())
    }
}

fn build_session(config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    Ok(Session::new(Catalog::builtin(&config.random), config)?)
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(play_loop(args))
}

async fn play_loop(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(seed) = args.seed {
        config.random.seed = Some(seed);
    }
    let mut session = build_session(&config)?;
    let mut sink = make_sink(args.silent);

    if let Some(name) = &args.pattern {
        let _ = session.select_pattern(name, sink.as_mut())?;
    }
    let _ = session.set_intensity(args.intensity);

    let started = session
        .start(sink.as_mut())
        .ok_or("selected pattern has no steps")?;
    println!("{}", serde_json::to_string(&started)?);

    let deadline = args.seconds.map(|s| Instant::now() + Duration::from_secs(s));
    let mut interval = tokio::time::interval(TICK);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                session.tick(sink.as_mut());
                if args.cycles.is_some_and(|c| session.cycles_completed() >= c) {
                    break;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    if let Some(ev) = session.stop(sink.as_mut()) {
        println!("{}", serde_json::to_string(&ev)?);
    }
    session.teardown(sink.as_mut());
    Ok(())
}

pub fn run_session(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(session_loop(args))
}

async fn session_loop(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut session = build_session(&config)?;
    let mut sink = make_sink(args.silent);
    let step = config.ui.intensity_step;

    println!("commands: t=tap  a=advance  n=next  p=previous  +/- = intensity  s=status  q=quit");
    println!("{}", serde_json::to_string(&session.snapshot())?);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                session.tick(sink.as_mut());
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let event = match line.trim() {
                    "t" | "tap" => session.handle_input(InputEvent::TapCenter, sink.as_mut()),
                    "a" | "advance" => session.handle_input(InputEvent::TapNext, sink.as_mut()),
                    "n" | "next" => session.handle_input(InputEvent::SwipeNext, sink.as_mut()),
                    "p" | "previous" => {
                        session.handle_input(InputEvent::SwipePrevious, sink.as_mut())
                    }
                    "+" => session.handle_input(InputEvent::Drag { delta: step }, sink.as_mut()),
                    "-" => session.handle_input(InputEvent::Drag { delta: -step }, sink.as_mut()),
                    "s" | "status" => Some(session.snapshot()),
                    "q" | "quit" => break,
                    "" => None,
                    other => {
                        eprintln!("unknown command: {other}");
                        None
                    }
                };
                if let Some(event) = event {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
        }
    }

    // Leaving the screen always cancels outstanding pulses.
    session.teardown(sink.as_mut());
    Ok(())
}
