//! Per-tick behavior hooks and the world capability they receive.

use std::fmt;

use lane_arena_core::{Command, EntityId, Event, Role, TeamId};

use crate::{apply, GameObject, World};

/// Per-tick logic attached to a game object.
///
/// The world calls [`Behavior::update`] once per step for every entity that
/// carries a behavior, passing the simulated seconds that elapsed and a
/// [`WorldHandle`] through which the behavior may read and mutate the arena.
/// The default implementation does nothing.
pub trait Behavior: fmt::Debug {
    /// Advances the behavior of `actor` by `time_delta` simulated seconds.
    fn update(&mut self, actor: &EntityId, time_delta: f64, world: &mut WorldHandle<'_>) {
        let _ = (actor, time_delta, world);
    }
}

/// Behavior that never acts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inert;

impl Behavior for Inert {}

/// Read/write capability handed to behaviors during an update pass.
///
/// Mutations issued through [`WorldHandle::apply`] report their events into
/// the same buffer as the surrounding step.
#[derive(Debug)]
pub struct WorldHandle<'w> {
    world: &'w mut World,
    events: &'w mut Vec<Event>,
}

impl<'w> WorldHandle<'w> {
    pub(crate) fn new(world: &'w mut World, events: &'w mut Vec<Event>) -> Self {
        Self { world, events }
    }

    /// Simulated seconds elapsed since the episode started.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.world.clock().current_time()
    }

    /// Simulated seconds covered by one step.
    #[must_use]
    pub fn time_delta(&self) -> f64 {
        self.world.clock().time_delta()
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&GameObject> {
        self.world.entity(id)
    }

    /// Looks up an entity by identifier for direct mutation.
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut GameObject> {
        self.world.entity_mut(id)
    }

    /// Every entity on the provided team, ordered by identifier.
    #[must_use]
    pub fn entities_by_team(&self, team: TeamId) -> Vec<&GameObject> {
        self.world.entities_by_team(team)
    }

    /// Every entity in the provided role view, ordered by insertion.
    #[must_use]
    pub fn role_members(&self, role: Role) -> Vec<&GameObject> {
        self.world.role_members(role)
    }

    /// Inserts a new entity, such as a freshly fired projectile.
    pub fn add_entity(&mut self, entity: GameObject) -> Option<GameObject> {
        self.world.add_entity(entity)
    }

    /// Executes a command against the world, recording its events.
    pub fn apply(&mut self, command: Command) {
        apply(self.world, command, self.events);
    }
}
