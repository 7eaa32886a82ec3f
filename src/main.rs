//! Headless stabilization runner.
//!
//! Builds the configured arm, replays a key timeline against it and logs how
//! far the end effector drifts from its anchor while the mount shakes.
//!
//! ```text
//! RUST_LOG=info steadyarm --duration 20 --keys "0:KeyB,12:KeyE,14:KeyB"
//! ```

use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use steadyarm::engine::{ArmCommand, ArmEngine, ArmSnapshot};
use steadyarm::input::{InputEvent, InputProcessor};
use steadyarm::kinematics::KinematicsSolver;
use steadyarm::options::Options;
use steadyarm::util::frame_timing::FrameTiming;

/// Run the arm stabilization loop without a window.
#[derive(Parser)]
#[command(name = "steadyarm")]
#[command(about = "Closed-loop end-effector stabilization", long_about = None)]
#[command(version)]
struct Cli {
    /// Options preset (TOML). Defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Control ticks per simulated second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Starting pose, one angle per joint in degrees
    #[arg(long, value_delimiter = ',', default_value = "0,0,45,0")]
    pose: Vec<f64>,

    /// Key timeline as "<seconds>:<Key>,..." (default: start the test at 0)
    #[arg(long)]
    keys: Option<String>,

    /// Pace ticks to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Write the default options to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Write the options JSON schema to this path and exit
    #[arg(long)]
    write_schema: Option<PathBuf>,
}

/// Parse `"0:KeyB, 12.5:KeyE"` into time-ordered key presses.
fn parse_key_script(script: &str) -> Result<VecDeque<(f64, String)>> {
    let mut events = script
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (time, key) = entry
                .split_once(':')
                .with_context(|| format!("key entry {entry:?} is not <seconds>:<Key>"))?;
            let time: f64 = time
                .trim()
                .parse()
                .with_context(|| format!("bad time in key entry {entry:?}"))?;
            Ok((time, key.trim().to_owned()))
        })
        .collect::<Result<Vec<_>>>()?;
    events.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(events.into())
}

/// Advance one tick and move the target sliders to the panel readout.
///
/// The readout only follows the effector after a solve reaches it, so an
/// unreachable request stays on the sliders.
fn step<S: KinematicsSolver>(
    engine: &mut ArmEngine<S>,
    input: &mut InputProcessor,
    dt: f64,
) -> Result<ArmSnapshot> {
    let snapshot = engine.update(dt)?;
    input.sync_target(engine.panel().target());
    Ok(snapshot)
}

/// Running drift statistics.
#[derive(Default)]
struct DriftStats {
    samples: u64,
    sum: f64,
    max: f64,
    unreachable_ticks: u64,
}

impl DriftStats {
    fn record(&mut self, drift: Option<f64>, reached: bool) {
        if let Some(d) = drift {
            self.samples += 1;
            self.sum += d;
            self.max = self.max.max(d);
        }
        if !reached {
            self.unreachable_ticks += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.sum / self.samples as f64
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        Options::default().save(path)?;
        log::info!("wrote default options to {}", path.display());
        return Ok(());
    }
    if let Some(path) = &cli.write_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        std::fs::write(path, schema)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote options schema to {}", path.display());
        return Ok(());
    }
    if cli.tick_rate == 0 {
        bail!("--tick-rate must be positive");
    }

    let options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let mut script = match &cli.keys {
        Some(keys) => parse_key_script(keys)?,
        None => VecDeque::new(),
    };

    let mut engine = ArmEngine::from_options(&options)?;
    engine
        .set_pose_deg(&cli.pose)
        .context("--pose needs one angle per joint")?;
    let mut input =
        InputProcessor::new(options.keybindings.clone(), engine.panel().target());
    if cli.keys.is_none() {
        engine.execute(ArmCommand::StartSession)?;
    }

    let mut timing = FrameTiming::new(cli.tick_rate);
    let dt = timing.fixed_dt().unwrap_or(1.0 / 60.0);
    let ticks = (cli.duration.max(0.0) / dt).ceil() as u64;
    let log_every = u64::from(cli.tick_rate);
    let mut stats = DriftStats::default();

    for tick in 0..ticks {
        while script.front().is_some_and(|(t, _)| *t <= engine.clock()) {
            let Some((t, key)) = script.pop_front() else {
                break;
            };
            log::info!("t={t:.2}: key {key}");
            if let Some(command) = input.handle_event(InputEvent::KeyPressed { key }) {
                engine.execute(command)?;
            }
        }

        if cli.realtime {
            std::thread::sleep(timing.remaining());
        }
        let snapshot = step(&mut engine, &mut input, dt)?;
        if cli.realtime {
            let _ = timing.end_tick();
        }
        stats.record(snapshot.drift(), snapshot.solve_reached);

        if tick % log_every == 0 {
            match snapshot.drift() {
                Some(drift) => log::info!(
                    "t={:.2} drift={drift:.4} base={:?} {}",
                    snapshot.time,
                    snapshot.base_offset,
                    snapshot.status_text
                ),
                None => log::info!(
                    "t={:.2} released, effector={:?} {}",
                    snapshot.time,
                    snapshot.effector,
                    snapshot.status_text
                ),
            }
        }
    }

    engine.execute(ArmCommand::StopSession)?;
    log::info!(
        "done: {ticks} ticks, mean drift {:.4}, max drift {:.4}, {} unreachable ticks{}",
        stats.mean(),
        stats.max,
        stats.unreachable_ticks,
        if cli.realtime {
            format!(", {:.1} Hz", timing.rate())
        } else {
            String::new()
        }
    );
    engine.shutdown();
    Ok(())
}
