//! Stat-bearing game objects and their damage/heal contract.

use std::collections::BTreeMap;

use glam::Vec2;
use lane_arena_core::{DamageType, EntityId, Identity, Role, StatError, Stats, TeamId};

use crate::behavior::Behavior;

/// Combat-capable entity: an identity, a stat record, an optional role tag,
/// and an optional per-tick behavior.
#[derive(Debug)]
pub struct GameObject {
    identity: Identity,
    role: Option<Role>,
    stats: Stats,
    behavior: Option<Box<dyn Behavior>>,
    generation: u64,
}

impl GameObject {
    /// Creates a game object without a role or behavior.
    #[must_use]
    pub fn new(identity: Identity, stats: Stats) -> Self {
        Self {
            identity,
            role: None,
            stats,
            behavior: None,
            generation: 0,
        }
    }

    /// Creates a game object from a stat template, copying the template.
    ///
    /// Fails when the template lacks `hp` or `max_hp`.
    pub fn from_template(
        identity: Identity,
        template: &BTreeMap<String, f64>,
    ) -> Result<Self, StatError> {
        let stats = Stats::from_template(template)?;
        Ok(Self::new(identity, stats))
    }

    /// Tags the object with the registry view it should join.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Attaches the per-tick behavior invoked by the world.
    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Identity record of the object.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Identifier assigned by the creator.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        self.identity.id()
    }

    /// Team the object fights for.
    #[must_use]
    pub fn team(&self) -> TeamId {
        self.identity.team()
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.identity.position()
    }

    /// Moves the object.
    pub fn set_position(&mut self, position: Vec2) {
        self.identity.set_position(position);
    }

    /// Collision radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.identity.radius()
    }

    /// Role view the object belongs to, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Read access to the stat record.
    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Write access to the stat record for ability systems. Writes here are
    /// not clamped.
    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Applies damage and returns the health actually removed.
    ///
    /// Non-positive amounts are ignored. Health never drops below zero.
    /// The damage type is carried for a future mitigation layer and does not
    /// change the outcome yet.
    pub fn take_damage(&mut self, amount: f64, _damage_type: DamageType) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }

        let before = self.stats.hp();
        let after = (before - amount).max(0.0);
        self.stats.set_hp(after);
        before - after
    }

    /// Restores health and returns the amount actually gained.
    ///
    /// Non-positive amounts are ignored. Health never exceeds `max_hp`.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }

        let before = self.stats.hp();
        let after = (before + amount).min(self.stats.max_hp());
        self.stats.set_hp(after);
        after - before
    }

    /// Reports whether the object has health left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.stats.hp() > 0.0
    }

    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn Behavior>> {
        self.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, behavior: Box<dyn Behavior>) {
        if self.behavior.is_none() {
            self.behavior = Some(behavior);
        }
    }
}
