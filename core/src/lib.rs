#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Arena simulation kernel.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! pure systems, and adapters. Callers describe mutations as [`Command`]
//! values, the world executes them through its `apply` entry point and then
//! reports [`Event`] values that systems consume to produce their next
//! command batch. Entity identity, role tags, and stat records live here so
//! that every layer agrees on their shape.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod stat;

pub use stat::{StatError, Stats};

/// Unique identifier assigned to an entity by the factory that creates it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new entity identifier from the provided string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the string representation of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Team affiliation of an entity. Any number of partitions is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(u32);

impl TeamId {
    /// Conventional identifier of the blue side.
    pub const BLUE: Self = Self(0);
    /// Conventional identifier of the red side.
    pub const RED: Self = Self(1);

    /// Creates a new team identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the team identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Gameplay role that determines which registry view an entity joins.
///
/// Roles are chosen by whoever constructs the entity and never inferred from
/// naming. Entities without a role remain reachable through identity and team
/// queries only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Player-controlled or policy-controlled hero unit.
    Champion,
    /// Lane creep spawned in waves.
    Minion,
    /// Static defensive structure.
    Turret,
    /// Short-lived travelling attack.
    Projectile,
}

impl Role {
    /// Every role in the order the registry stores its views.
    pub const ALL: [Role; 4] = [Role::Champion, Role::Minion, Role::Turret, Role::Projectile];
}

/// Category of incoming damage.
///
/// Mitigation is not applied yet; the tag travels with damage so a future
/// resistance layer can use it without changing call sites.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DamageType {
    /// Damage mitigated by armor.
    #[default]
    Physical,
    /// Damage mitigated by magic resistance.
    Magical,
    /// Damage that ignores resistances.
    True,
}

/// Immutable identity shared by everything that lives in the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    id: EntityId,
    team: TeamId,
    position: Vec2,
    radius: f32,
}

impl Identity {
    /// Creates a new identity record. The position is stored by value.
    #[must_use]
    pub fn new(id: EntityId, team: TeamId, position: Vec2, radius: f32) -> Self {
        Self {
            id,
            team,
            position,
            radius,
        }
    }

    /// Identifier assigned by the creator of the entity.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Team the entity fights for.
    #[must_use]
    pub const fn team(&self) -> TeamId {
        self.team
    }

    /// Current position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the entity to the provided position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }
}

/// Commands that express the mutations the world accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by exactly one step.
    Tick,
    /// Applies damage to the targeted entity.
    DealDamage {
        /// Entity receiving the damage.
        target: EntityId,
        /// Raw damage before any mitigation.
        amount: f64,
        /// Category of the damage.
        damage_type: DamageType,
    },
    /// Restores health to the targeted entity.
    Heal {
        /// Entity receiving the healing.
        target: EntityId,
        /// Requested amount of health.
        amount: f64,
    },
    /// Removes an entity from every registry container.
    RemoveEntity {
        /// Entity to remove.
        entity: EntityId,
    },
    /// Changes how much simulated time passes per tick.
    SetSpeedMultiplier {
        /// New multiplier applied to the tick duration.
        multiplier: f64,
    },
    /// Clears the registry and rewinds the clock for the next episode.
    ResetEpisode,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Simulated seconds that elapsed in the tick.
        dt: f64,
        /// Simulated time after the tick.
        now: f64,
    },
    /// Confirms that damage reduced an entity's health.
    DamageApplied {
        /// Entity that lost health.
        target: EntityId,
        /// Health actually removed after clamping.
        amount: f64,
        /// Category of the damage.
        damage_type: DamageType,
    },
    /// Confirms that healing restored an entity's health.
    Healed {
        /// Entity that gained health.
        target: EntityId,
        /// Health actually restored after clamping.
        amount: f64,
    },
    /// Announces that an entity's health dropped to zero.
    EntityDied {
        /// Entity that died.
        entity: EntityId,
    },
    /// Confirms that an entity left the registry.
    EntityRemoved {
        /// Entity that was removed.
        entity: EntityId,
    },
    /// Reports that a speed change was refused because the value was not positive.
    SpeedMultiplierRejected {
        /// Multiplier that was requested.
        multiplier: f64,
    },
    /// Confirms that the registry and clock returned to their pristine state.
    EpisodeReset,
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Identifier of the entity.
    pub id: EntityId,
    /// Team the entity fights for.
    pub team: TeamId,
    /// Role view the entity belongs to, if any.
    pub role: Option<Role>,
    /// Position at capture time.
    pub position: Vec2,
    /// Current health.
    pub hp: f64,
    /// Maximum health.
    pub max_hp: f64,
    /// Value of the `hp_regen` stat, or zero when absent.
    pub hp_regen: f64,
}

impl EntitySnapshot {
    /// Reports whether the entity had health left at capture time.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

/// Read-only snapshot describing every registered entity.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by(|left, right| left.id.cmp(&right.id));
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}
