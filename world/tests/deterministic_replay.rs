use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use glam::Vec2;
use lane_arena_core::{Command, DamageType, EntityId, Event, Identity, Role, Stats, TeamId};
use lane_arena_world::{self as world, query, GameClock, GameObject, World};

#[test]
fn replay_is_deterministic_across_runs() {
    let first = replay(&mut fresh_world());
    let second = replay(&mut fresh_world());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn reset_world_replays_like_a_fresh_one() {
    let mut reused = fresh_world();
    let _ = replay(&mut reused);

    let mut events = Vec::new();
    world::apply(&mut reused, Command::ResetEpisode, &mut events);
    assert_eq!(events, vec![Event::EpisodeReset]);
    assert!(query::is_pristine(&reused));

    let after_reset = replay(&mut reused);
    let fresh = replay(&mut fresh_world());
    assert_eq!(after_reset, fresh);
}

fn fresh_world() -> World {
    World::new(GameClock::new(0.125, 2.0).expect("valid clock"))
}

fn replay(world: &mut World) -> ReplayOutcome {
    populate(world);

    let mut records = Vec::new();
    for command in scripted_commands() {
        let mut events = Vec::new();
        world::apply(world, command, &mut events);
        records.extend(events.iter().map(EventRecord::from));
    }

    let entities = query::entity_view(world)
        .into_vec()
        .into_iter()
        .map(|snapshot| EntityState {
            id: snapshot.id,
            team: snapshot.team,
            role: snapshot.role,
            hp_bits: snapshot.hp.to_bits(),
        })
        .collect();

    ReplayOutcome {
        events: records,
        entities,
        time_bits: query::current_time(world).to_bits(),
    }
}

fn populate(world: &mut World) {
    let roster = [
        ("blue_champion", TeamId::BLUE, Some(Role::Champion), 600.0),
        ("blue_minion_0", TeamId::BLUE, Some(Role::Minion), 300.0),
        ("blue_turret", TeamId::BLUE, Some(Role::Turret), 3000.0),
        ("red_champion", TeamId::RED, Some(Role::Champion), 550.0),
        ("red_minion_0", TeamId::RED, Some(Role::Minion), 300.0),
        ("red_ward", TeamId::RED, None, 3.0),
    ];

    for (index, (id, team, role, hp)) in roster.into_iter().enumerate() {
        let entity = GameObject::new(
            Identity::new(EntityId::new(id), team, Vec2::new(index as f32, 0.0), 0.5),
            Stats::new(hp, hp),
        );
        let entity = match role {
            Some(role) => entity.with_role(role),
            None => entity,
        };
        let _ = world.add_entity(entity);
    }
}

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::Tick,
        Command::DealDamage {
            target: EntityId::new("red_minion_0"),
            amount: 120.0,
            damage_type: DamageType::Physical,
        },
        Command::Tick,
        Command::DealDamage {
            target: EntityId::new("blue_champion"),
            amount: 75.5,
            damage_type: DamageType::Magical,
        },
        Command::Heal {
            target: EntityId::new("blue_champion"),
            amount: 20.0,
        },
        Command::DealDamage {
            target: EntityId::new("red_minion_0"),
            amount: 500.0,
            damage_type: DamageType::True,
        },
        Command::RemoveEntity {
            entity: EntityId::new("red_minion_0"),
        },
        Command::SetSpeedMultiplier { multiplier: 4.0 },
        Command::Tick,
        Command::DealDamage {
            target: EntityId::new("red_ward"),
            amount: 3.0,
            damage_type: DamageType::Physical,
        },
        Command::SetSpeedMultiplier { multiplier: 2.0 },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    events: Vec<EventRecord>,
    entities: Vec<EntityState>,
    time_bits: u64,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct EntityState {
    id: EntityId,
    team: TeamId,
    role: Option<Role>,
    hp_bits: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced { dt_bits: u64, now_bits: u64 },
    DamageApplied { target: EntityId, amount_bits: u64 },
    Healed { target: EntityId, amount_bits: u64 },
    EntityDied { entity: EntityId },
    EntityRemoved { entity: EntityId },
    SpeedMultiplierRejected,
    EpisodeReset,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimeAdvanced { dt, now } => Self::TimeAdvanced {
                dt_bits: dt.to_bits(),
                now_bits: now.to_bits(),
            },
            Event::DamageApplied { target, amount, .. } => Self::DamageApplied {
                target: target.clone(),
                amount_bits: amount.to_bits(),
            },
            Event::Healed { target, amount } => Self::Healed {
                target: target.clone(),
                amount_bits: amount.to_bits(),
            },
            Event::EntityDied { entity } => Self::EntityDied {
                entity: entity.clone(),
            },
            Event::EntityRemoved { entity } => Self::EntityRemoved {
                entity: entity.clone(),
            },
            Event::SpeedMultiplierRejected { .. } => Self::SpeedMultiplierRejected,
            Event::EpisodeReset => Self::EpisodeReset,
        }
    }
}
