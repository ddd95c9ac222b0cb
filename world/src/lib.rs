#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-episode state for the Lane Arena simulation.
//!
//! A [`World`] owns the [`GameClock`] and every [`GameObject`] taking part in
//! an episode. Entities are indexed by identifier in a master map and,
//! when tagged with a [`Role`], in one role view. Mutations arrive either as
//! direct method calls or as [`Command`] values executed by [`apply`], which
//! reports the resulting [`Event`] values.

use std::collections::HashMap;

use lane_arena_core::{Command, EntityId, Event, Role, TeamId};
use tracing::{debug, trace, warn};

mod behavior;
mod clock;
mod object;
mod roles;

pub use behavior::{Behavior, Inert, WorldHandle};
pub use clock::{ClockError, GameClock};
pub use object::GameObject;

use roles::RoleIndex;

/// Represents the authoritative state of one training episode.
#[derive(Debug)]
pub struct World {
    clock: GameClock,
    entities: HashMap<EntityId, GameObject>,
    roles: RoleIndex,
    /// Stamp handed to the next inserted entity; never reused.
    next_generation: u64,
}

impl World {
    /// Creates an empty world driven by the provided clock.
    #[must_use]
    pub fn new(clock: GameClock) -> Self {
        Self {
            clock,
            entities: HashMap::new(),
            roles: RoleIndex::new(),
            next_generation: 0,
        }
    }

    /// Registers an entity under its identifier.
    ///
    /// If another entity already used the identifier it is evicted from every
    /// container and returned, and the replacement is logged.
    pub fn add_entity(&mut self, mut entity: GameObject) -> Option<GameObject> {
        entity.set_generation(self.next_generation);
        self.next_generation += 1;

        let id = entity.id().clone();
        let role = entity.role();
        let displaced = self.entities.insert(id.clone(), entity);

        if let Some(previous) = displaced.as_ref() {
            warn!(entity = %id, "entity identifier reused; replacing previous entity");
            if let Some(previous_role) = previous.role() {
                let _ = self.roles.remove(previous_role, &id);
            }
        }

        if let Some(role) = role {
            self.roles.insert(role, id.clone());
        }

        debug!(entity = %id, ?role, "entity added");
        debug_assert!(self.roles.len() <= self.entities.len());
        displaced
    }

    /// Removes an entity from the master index and its role view.
    ///
    /// Unknown identifiers are ignored.
    pub fn remove_entity(&mut self, id: &EntityId) -> Option<GameObject> {
        let removed = self.entities.remove(id)?;
        if let Some(role) = removed.role() {
            let _ = self.roles.remove(role, id);
        }

        debug!(entity = %id, "entity removed");
        debug_assert!(self.roles.len() <= self.entities.len());
        Some(removed)
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&GameObject> {
        self.entities.get(id)
    }

    /// Looks up an entity by identifier for direct mutation.
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut GameObject> {
        self.entities.get_mut(id)
    }

    /// Every entity on the provided team regardless of role, ordered by identifier.
    #[must_use]
    pub fn entities_by_team(&self, team: TeamId) -> Vec<&GameObject> {
        let mut members: Vec<&GameObject> = self
            .entities
            .values()
            .filter(|entity| entity.team() == team)
            .collect();
        members.sort_by(|left, right| left.id().cmp(right.id()));
        members
    }

    /// Every entity in the provided role view, in insertion order.
    #[must_use]
    pub fn role_members(&self, role: Role) -> Vec<&GameObject> {
        self.roles
            .members(role)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// Every entity, ordered by identifier.
    #[must_use]
    pub fn entities(&self) -> Vec<&GameObject> {
        let mut all: Vec<&GameObject> = self.entities.values().collect();
        all.sort_by(|left, right| left.id().cmp(right.id()));
        all
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Reports whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Read access to the owned clock.
    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Write access to the owned clock, e.g. to change the speed multiplier.
    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    /// Empties every container and rewinds the clock.
    ///
    /// The clock's cadence survives, so the world is ready for the next
    /// episode without reconstruction.
    pub fn reset(&mut self) {
        let cleared = self.entities.len();
        self.entities.clear();
        self.roles.clear();
        self.clock.reset();
        debug!(cleared, "world reset");
    }

    /// Invokes each entity's behavior once, in identifier order.
    ///
    /// Every behavior receives `time_delta` and a [`WorldHandle`]. Entities
    /// removed earlier in the same pass are skipped. A behavior whose entity
    /// was removed or replaced during its own update is dropped with it.
    pub fn run_behaviors(&mut self, time_delta: f64, out_events: &mut Vec<Event>) {
        let mut ids: Vec<EntityId> = self.entities.keys().cloned().collect();
        ids.sort();

        for id in ids {
            let Some((generation, mut behavior)) = self.entities.get_mut(&id).and_then(|entity| {
                let generation = entity.generation();
                entity.take_behavior().map(|behavior| (generation, behavior))
            }) else {
                continue;
            };

            {
                let mut handle = WorldHandle::new(self, out_events);
                behavior.update(&id, time_delta, &mut handle);
            }

            match self.entities.get_mut(&id) {
                Some(entity) if entity.generation() == generation => {
                    entity.restore_behavior(behavior);
                }
                _ => {
                    trace!(entity = %id, "actor replaced during its update; behavior dropped");
                }
            }
        }
    }

    /// Advances the clock by one tick and runs every behavior with the new delta.
    pub fn step(&mut self, out_events: &mut Vec<Event>) {
        apply(self, Command::Tick, out_events);
        let time_delta = self.clock.time_delta();
        self.run_behaviors(time_delta, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameClock::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.clock.tick();
            let dt = world.clock.time_delta();
            let now = world.clock.current_time();
            trace!(tick = world.clock.tick_count(), now, "clock advanced");
            out_events.push(Event::TimeAdvanced { dt, now });
        }
        Command::DealDamage {
            target,
            amount,
            damage_type,
        } => {
            let Some(entity) = world.entities.get_mut(&target) else {
                return;
            };
            let was_alive = entity.is_alive();
            let applied = entity.take_damage(amount, damage_type);
            let died = was_alive && !entity.is_alive();

            if applied > 0.0 {
                out_events.push(Event::DamageApplied {
                    target: target.clone(),
                    amount: applied,
                    damage_type,
                });
            }
            if died {
                debug!(entity = %target, "entity died");
                out_events.push(Event::EntityDied { entity: target });
            }
        }
        Command::Heal { target, amount } => {
            let Some(entity) = world.entities.get_mut(&target) else {
                return;
            };
            let applied = entity.heal(amount);
            if applied > 0.0 {
                out_events.push(Event::Healed {
                    target,
                    amount: applied,
                });
            }
        }
        Command::RemoveEntity { entity } => {
            if world.remove_entity(&entity).is_some() {
                out_events.push(Event::EntityRemoved { entity });
            }
        }
        Command::SetSpeedMultiplier { multiplier } => {
            if let Err(error) = world.clock.set_speed_multiplier(multiplier) {
                warn!(%error, "speed multiplier rejected");
                out_events.push(Event::SpeedMultiplierRejected { multiplier });
            }
        }
        Command::ResetEpisode => {
            world.reset();
            out_events.push(Event::EpisodeReset);
        }
    }
}

/// Query functions that provide read-only snapshots of the world state.
pub mod query {
    use lane_arena_core::{stat, EntitySnapshot, EntityView, Role};

    use super::World;

    /// Simulated seconds elapsed in the current episode.
    #[must_use]
    pub fn current_time(world: &World) -> f64 {
        world.clock.current_time()
    }

    /// Captures a read-only view of every registered entity.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        let snapshots: Vec<EntitySnapshot> = world
            .entities
            .values()
            .map(|entity| EntitySnapshot {
                id: entity.id().clone(),
                team: entity.team(),
                role: entity.role(),
                position: entity.position(),
                hp: entity.stats().hp(),
                max_hp: entity.stats().max_hp(),
                hp_regen: entity.stats().get_or_zero(stat::HP_REGEN),
            })
            .collect();
        EntityView::from_snapshots(snapshots)
    }

    /// Number of entities in the provided role view.
    #[must_use]
    pub fn role_count(world: &World, role: Role) -> usize {
        world.roles.members(role).len()
    }

    /// Reports whether no entity, role view entry, or elapsed time remains.
    #[must_use]
    pub fn is_pristine(world: &World) -> bool {
        world.entities.is_empty()
            && world.roles.len() == 0
            && world.clock.current_time() == 0.0
            && world.clock.tick_count() == 0
    }
}
