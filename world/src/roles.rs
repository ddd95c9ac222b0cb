//! Role-partitioned views over the entity registry.

use lane_arena_core::{EntityId, Role};

/// Identifier lists, one per role, kept alongside the master index.
#[derive(Debug, Default)]
pub(crate) struct RoleIndex {
    champions: Vec<EntityId>,
    minions: Vec<EntityId>,
    turrets: Vec<EntityId>,
    projectiles: Vec<EntityId>,
}

impl RoleIndex {
    /// Creates an index with every view empty.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Members of a role view in insertion order.
    pub(crate) fn members(&self, role: Role) -> &[EntityId] {
        match role {
            Role::Champion => &self.champions,
            Role::Minion => &self.minions,
            Role::Turret => &self.turrets,
            Role::Projectile => &self.projectiles,
        }
    }

    /// Appends an identifier to a role view.
    pub(crate) fn insert(&mut self, role: Role, id: EntityId) {
        self.members_mut(role).push(id);
    }

    /// Removes an identifier from a role view, reporting whether it was present.
    pub(crate) fn remove(&mut self, role: Role, id: &EntityId) -> bool {
        let members = self.members_mut(role);
        match members.iter().position(|member| member == id) {
            Some(index) => {
                let _ = members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties every view.
    pub(crate) fn clear(&mut self) {
        for role in Role::ALL {
            self.members_mut(role).clear();
        }
    }

    /// Total number of identifiers across every view.
    pub(crate) fn len(&self) -> usize {
        Role::ALL
            .iter()
            .map(|role| self.members(*role).len())
            .sum()
    }

    fn members_mut(&mut self, role: Role) -> &mut Vec<EntityId> {
        match role {
            Role::Champion => &mut self.champions,
            Role::Minion => &mut self.minions,
            Role::Turret => &mut self.turrets,
            Role::Projectile => &mut self.projectiles,
        }
    }
}
