//! EjectWheel terminal host
//!
//! Usage:
//!   ejectwheel Ada Grace Linus            - Eliminate until one name remains
//!   ejectwheel --file names.txt --until 2 - Read names, stop at two
//!   ejectwheel --profile instant --fast   - No waiting at all
//!   ejectwheel --seed 7 --json Ada Grace  - Reproducible run, JSON events

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use ew_core::ParticipantList;
use ew_wheel::{
    RandomSource, RevealTiming, RngSource, SequenceState, Sequencer, TimingProfile, WheelConfig,
    WheelHost,
};

#[derive(Parser)]
#[command(name = "ejectwheel", about = "Spin the wheel, eliminate a name")]
struct Cli {
    /// Participant names
    names: Vec<String>,

    /// Read participants from a file (one name per line)
    #[arg(short, long, conflicts_with = "names")]
    file: Option<PathBuf>,

    /// Wheel config file (.json, .yaml, .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Full turns before landing
    #[arg(long)]
    rounds: Option<u32>,

    /// Visual spin duration in seconds
    #[arg(long)]
    spin_duration: Option<f64>,

    /// Reveal timing profile (normal, turbo, instant)
    #[arg(short, long)]
    profile: Option<TimingProfile>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop once this many names remain
    #[arg(long, default_value_t = 1)]
    until: usize,

    /// Fire timers back to back instead of waiting
    #[arg(long)]
    fast: bool,

    /// Print each round's stage events as JSON
    #[arg(long)]
    json: bool,
}

/// Host that prints announcements and remembers the last elimination
#[derive(Debug, Default)]
struct TerminalHost {
    quiet: bool,
    eliminated: Option<String>,
    closed: bool,
}

impl TerminalHost {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Default::default()
        }
    }

    fn begin_round(&mut self) {
        self.eliminated = None;
        self.closed = false;
    }
}

impl WheelHost for TerminalHost {
    fn on_eliminated(&mut self, name: &str) {
        self.eliminated = Some(name.to_string());
    }

    fn on_close(&mut self) {
        self.closed = true;
    }

    fn announce(&mut self, message: &str) {
        if !self.quiet {
            println!("  {message}");
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let participants = load_participants(&cli)?;
    let config = build_config(&cli)?;

    if participants.len() <= cli.until {
        bail!(
            "Need more than {} participant(s) to eliminate anyone, got {}",
            cli.until,
            participants.len()
        );
    }

    let random: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_os()),
    };

    log::info!(
        "Starting EjectWheel: {} participants, profile {}",
        participants.len(),
        config.timing.profile
    );

    let mut wheel = Sequencer::new(config, participants, TerminalHost::new(cli.json), random)
        .context("Invalid wheel configuration")?;

    let mut round = 0;
    while wheel.participants().len() > cli.until {
        round += 1;
        if !cli.json {
            println!("Round {} ({} left)", round, wheel.participants().len());
        }

        let name = play_round(&mut wheel, cli.fast)?;

        if cli.json {
            let events = wheel.drain_events();
            println!("{}", serde_json::to_string_pretty(&events)?);
        } else {
            println!("  Out: {name}");
        }
    }

    if !cli.json {
        let remaining: Vec<&str> = wheel.participants().iter().collect();
        println!("Remaining: {}", remaining.join(", "));
    }

    Ok(())
}

fn load_participants(cli: &Cli) -> Result<ParticipantList> {
    match &cli.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(ParticipantList::from_lines(&text))
        }
        None => Ok(ParticipantList::new(cli.names.iter().map(|n| n.trim()))),
    }
}

fn build_config(cli: &Cli) -> Result<WheelConfig> {
    let mut config = match &cli.config {
        Some(path) => WheelConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WheelConfig::default(),
    };

    if let Some(profile) = cli.profile {
        config.timing = RevealTiming::from_profile(profile);
    }
    if let Some(rounds) = cli.rounds {
        config.rotations = rounds;
    }
    if let Some(secs) = cli.spin_duration {
        config.spin_duration_secs = secs;
    }

    config.validate()?;
    Ok(config)
}

/// Open, spin, and drive the clock until the wheel closes itself
fn play_round(wheel: &mut Sequencer<TerminalHost>, fast: bool) -> Result<String> {
    wheel.host_mut().begin_round();
    wheel.set_visible(true);

    if !wheel.start() {
        bail!("Wheel refused to start");
    }

    if fast {
        wheel.run_to_completion();
    } else {
        drive_realtime(wheel)?;
    }

    let name = wheel
        .host_mut()
        .eliminated
        .take()
        .context("Round ended without an elimination")?;

    let mut remaining = wheel.participants().clone();
    remaining.remove_name(&name);
    wheel.set_visible(false);
    if !wheel.set_participants(remaining) {
        bail!("Participant list locked after close");
    }

    Ok(name)
}

/// Sleep between deadlines, ticking once per typed character while revealing
fn drive_realtime(wheel: &mut Sequencer<TerminalHost>) -> Result<()> {
    let typing_interval = wheel.config().timing.typing_interval_ms;
    let show_typing = !wheel.host().quiet;
    let mut shown = 0;

    while !wheel.host().closed {
        let Some(deadline) = wheel.next_deadline() else {
            break;
        };

        let step = if wheel.state() == SequenceState::Revealing && typing_interval > 0 {
            deadline.min(wheel.now_ms() + typing_interval)
        } else {
            deadline
        };

        thread::sleep(Duration::from_millis(step.saturating_sub(wheel.now_ms())));
        wheel.advance_to(step);

        if show_typing {
            let text = wheel.revealed_text();
            let count = text.chars().count();
            if count > shown {
                print!("\r  > {text}");
                std::io::stdout().flush()?;
                shown = count;
            }
            if shown > 0 && wheel.state() != SequenceState::Revealing {
                println!();
                shown = 0;
            }
        }
    }

    Ok(())
}
