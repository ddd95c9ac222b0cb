#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Lane Arena episodes.

use anyhow::{Context, Result};
use clap::Parser;
use lane_arena_core::{Command, Event, TeamId};
use lane_arena_system_regeneration::Regeneration;
use lane_arena_world::{self as world, query, GameClock, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

mod roster;

/// Runs scripted lane episodes against the simulation kernel.
#[derive(Debug, Parser)]
#[command(name = "lane-arena", version)]
struct Args {
    /// Number of simulation steps per episode.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Number of episodes to run back to back on the same world.
    #[arg(long, default_value_t = 1)]
    episodes: u32,
    /// Base duration of one tick in simulated seconds.
    #[arg(long, default_value_t = 0.1)]
    tick_duration: f64,
    /// Multiplier applied to the tick duration.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
    /// Seed for spawn jitter.
    #[arg(long, default_value_t = 0x5eed_1a2e)]
    seed: u64,
    /// Minions spawned for each team at the start of an episode.
    #[arg(long, default_value_t = 3)]
    minions_per_team: u32,
}

/// Entry point for the Lane Arena command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let clock =
        GameClock::new(args.tick_duration, args.speed).context("invalid clock configuration")?;
    let mut world = World::new(clock);
    let mut regeneration = Regeneration::new();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for episode in 0..args.episodes {
        roster::populate(&mut world, &mut rng, args.minions_per_team)?;
        info!(episode, entities = world.len(), "episode started");

        for _ in 0..args.ticks {
            step(&mut world, &mut regeneration);
        }

        let summary = EpisodeSummary::capture(&world);
        info!(
            episode,
            time = summary.time,
            blue = summary.blue_survivors,
            red = summary.red_survivors,
            "episode finished",
        );
        println!(
            "episode {episode}: t={:.1}s blue={} red={}",
            summary.time, summary.blue_survivors, summary.red_survivors
        );

        let mut events = Vec::new();
        world::apply(&mut world, Command::ResetEpisode, &mut events);
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn step(world: &mut World, regeneration: &mut Regeneration) {
    let mut events = Vec::new();
    world.step(&mut events);

    let mut commands = Vec::new();
    regeneration.handle(&events, &query::entity_view(world), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }

    let fallen: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::EntityDied { entity } => Some(entity.clone()),
            _ => None,
        })
        .collect();
    for entity in fallen {
        debug!(%entity, "removing fallen entity");
        world::apply(world, Command::RemoveEntity { entity }, &mut events);
    }
}

#[derive(Debug)]
struct EpisodeSummary {
    time: f64,
    blue_survivors: usize,
    red_survivors: usize,
}

impl EpisodeSummary {
    fn capture(world: &World) -> Self {
        Self {
            time: query::current_time(world),
            blue_survivors: survivors(world, TeamId::BLUE),
            red_survivors: survivors(world, TeamId::RED),
        }
    }
}

fn survivors(world: &World, team: TeamId) -> usize {
    world
        .entities_by_team(team)
        .iter()
        .filter(|entity| entity.is_alive())
        .count()
}
