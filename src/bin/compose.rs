//! Runs whole episodes of the music-theory environment with a fixed policy
//! and prints the composition and rewards.
//!
//! ```bash
//! cargo run --bin compose -- --policy scale --verbose
//! RUST_LOG=debug cargo run --bin compose -- --policy random --intervals 5.0 -n 10 --seed 1
//! ```

use anyhow::{anyhow, Result};
use bare_metal_modulo::MNum;
use clap::{Parser, ValueEnum};
use musictheory1::{
    event_name, midi2code, Environment, EventCode, Key, MidiByte, MusicEnv, PitchClass,
    TheoryConfig, FIFTH, NUM_CLASSES, OCTAVE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIDDLE_C: MidiByte = 60;
const SCALE_OFFSETS: [usize; 8] = [0, 2, 4, 5, 7, 9, 11, OCTAVE];

#[derive(Parser, Debug)]
#[command(name = "compose")]
#[command(about = "Score compositions against music-theory rewards")]
struct Args {
    /// Number of events per composition
    #[arg(long, short = 'l', default_value = "64")]
    length: usize,

    /// Beats per bar (motif window)
    #[arg(long, short = 'b', default_value = "8")]
    bar: usize,

    /// Pitch class of the major key's tonic (0 = C, 7 = G)
    #[arg(long, default_value = "0")]
    tonic_pc: usize,

    #[arg(long, value_enum, default_value = "tonic-fifth")]
    policy: Policy,

    /// Add the melodic interval reward, multiplied by this scaler
    #[arg(long)]
    intervals: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to run
    #[arg(long, short = 'n', default_value = "1")]
    episodes: usize,

    /// Print the reward components of every step
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    Random,
    TonicFifth,
    Scale,
}

impl Policy {
    fn choose(&self, beat: usize, tonic: EventCode, rng: &mut StdRng) -> EventCode {
        match self {
            Policy::Random => rng.gen_range(0..NUM_CLASSES),
            Policy::TonicFifth => if beat % 2 == 0 {tonic} else {tonic + FIFTH},
            Policy::Scale => tonic + SCALE_OFFSETS[beat % SCALE_OFFSETS.len()],
        }
    }
}

fn main() -> Result<()> {
    setup_tracing()?;
    let args = Args::parse();

    let tonic_pc = PitchClass::new(args.tonic_pc);
    let tonic = midi2code(MIDDLE_C + tonic_pc.a() as MidiByte)
        .ok_or_else(|| anyhow!("no event code for tonic pitch class {}", args.tonic_pc))?;
    let mut config = TheoryConfig::default()
        .with_composition_length(args.length)
        .with_bar_length(args.bar)
        .with_key(Key::major(tonic_pc), tonic);
    if let Some(scaler) = args.intervals {
        config = config.with_intervals(scaler);
    }
    println!("{} tonic {}, {} beats, bars of {}", config.key().name(), event_name(tonic), args.length, args.bar);

    let mut env = MusicEnv::music_theory(config)?;
    let mut rng = match args.seed {
        Some(seed) => {
            env = env.with_seed(seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut totals = vec![];
    for episode in 0..args.episodes {
        let start = env.reset();
        println!("Episode {episode} (start observation {})", event_name(start));
        let mut beat = 0;
        loop {
            let action = args.policy.choose(beat, tonic, &mut rng);
            let step = env.step(action)?;
            beat += 1;
            if args.verbose {
                println!("{beat:>3} {:>4} {:>7.3} {:?}", event_name(action), step.reward, step.info);
            }
            if step.done {
                break;
            }
        }
        println!("{}", env.composition().view_events());
        println!("Total reward: {:.3}", env.episode_reward());
        totals.push(env.episode_reward());
    }

    if totals.len() > 1 {
        let mean = totals.iter().sum::<f64>() / totals.len() as f64;
        println!("Mean reward over {} episodes: {mean:.3}", totals.len());
    }
    Ok(())
}

fn setup_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err: Box<dyn std::error::Error + Send + Sync>| {
            anyhow!("failed to initialise tracing: {err}")
        })?;
    Ok(())
}
