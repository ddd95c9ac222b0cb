//! Demo roster and the per-kind behaviors that drive it.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use glam::Vec2;
use lane_arena_core::{stat, Command, DamageType, EntityId, Identity, Role, TeamId};
use lane_arena_world::{Behavior, GameObject, Inert, World, WorldHandle};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const LANE_LENGTH: f32 = 100.0;
const CHAMPION_OFFSET: f32 = 10.0;
const TURRET_OFFSET: f32 = 20.0;
const MINION_OFFSET: f32 = 25.0;
const SPAWN_JITTER: f32 = 3.0;

/// Populates the world with one champion, one turret, and the requested
/// number of minions for each side.
pub(crate) fn populate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    minions_per_team: u32,
) -> Result<()> {
    for team in [TeamId::BLUE, TeamId::RED] {
        let prefix = team_prefix(team);

        let champion = GameObject::from_template(
            Identity::new(
                EntityId::new(format!("{prefix}_champion")),
                team,
                lane_point(team, CHAMPION_OFFSET, 0.0),
                0.65,
            ),
            &champion_template(),
        )
        .context("champion template is invalid")?
        .with_role(Role::Champion)
        .with_behavior(Inert);
        let _ = world.add_entity(champion);

        let turret = GameObject::from_template(
            Identity::new(
                EntityId::new(format!("{prefix}_turret")),
                team,
                lane_point(team, TURRET_OFFSET, 0.0),
                1.0,
            ),
            &turret_template(),
        )
        .context("turret template is invalid")?
        .with_role(Role::Turret)
        .with_behavior(TurretStrike);
        let _ = world.add_entity(turret);

        for index in 0..minions_per_team {
            let jitter = rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER);
            let minion = GameObject::from_template(
                Identity::new(
                    EntityId::new(format!("{prefix}_minion_{index:02}")),
                    team,
                    lane_point(team, MINION_OFFSET, jitter),
                    0.48,
                ),
                &minion_template(),
            )
            .context("minion template is invalid")?
            .with_role(Role::Minion)
            .with_behavior(MinionMarch {
                heading: heading(team),
            });
            let _ = world.add_entity(minion);
        }
    }

    Ok(())
}

/// Short label used as the identifier prefix for a side.
pub(crate) fn team_prefix(team: TeamId) -> &'static str {
    if team == TeamId::BLUE {
        "blue"
    } else {
        "red"
    }
}

/// Walks toward the enemy side and attacks the first enemy in range.
#[derive(Debug)]
struct MinionMarch {
    heading: f32,
}

impl Behavior for MinionMarch {
    fn update(&mut self, actor: &EntityId, time_delta: f64, world: &mut WorldHandle<'_>) {
        if !world.entity(actor).is_some_and(GameObject::is_alive) {
            return;
        }

        if strike_nearest_enemy(actor, time_delta, world) {
            return;
        }

        let Some(minion) = world.entity_mut(actor) else {
            return;
        };
        let speed = minion.stats().get_or_zero(stat::MOVE_SPEED) as f32;
        let step = speed * time_delta as f32 * self.heading;
        let mut next = minion.position() + Vec2::new(step, 0.0);
        next.x = next.x.clamp(0.0, LANE_LENGTH);
        minion.set_position(next);
    }
}

/// Attacks the nearest living enemy within range every tick.
#[derive(Debug)]
struct TurretStrike;

impl Behavior for TurretStrike {
    fn update(&mut self, actor: &EntityId, time_delta: f64, world: &mut WorldHandle<'_>) {
        if world.entity(actor).is_some_and(GameObject::is_alive) {
            let _ = strike_nearest_enemy(actor, time_delta, world);
        }
    }
}

fn strike_nearest_enemy(actor: &EntityId, time_delta: f64, world: &mut WorldHandle<'_>) -> bool {
    let Some(attacker) = world.entity(actor) else {
        return false;
    };
    let origin = attacker.position();
    let team = attacker.team();
    let range = attacker.stats().get_or_zero(stat::ATTACK_RANGE) as f32;
    let damage = attacker.stats().get_or_zero(stat::AD) * time_delta;

    let target = world
        .entities_by_team(opponent(team))
        .into_iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| {
            let reach = range + attacker.radius() + enemy.radius();
            (enemy, origin.distance(enemy.position()), reach)
        })
        .filter(|(_, distance, reach)| distance <= reach)
        .min_by(|(left, left_distance, _), (right, right_distance, _)| {
            left_distance
                .total_cmp(right_distance)
                .then_with(|| left.id().cmp(right.id()))
        })
        .map(|(enemy, _, _)| enemy.id().clone());

    let Some(target) = target else {
        return false;
    };
    world.apply(Command::DealDamage {
        target,
        amount: damage,
        damage_type: DamageType::Physical,
    });
    true
}

fn opponent(team: TeamId) -> TeamId {
    if team == TeamId::BLUE {
        TeamId::RED
    } else {
        TeamId::BLUE
    }
}

fn heading(team: TeamId) -> f32 {
    if team == TeamId::BLUE {
        1.0
    } else {
        -1.0
    }
}

fn lane_point(team: TeamId, offset: f32, lateral: f32) -> Vec2 {
    if team == TeamId::BLUE {
        Vec2::new(offset, lateral)
    } else {
        Vec2::new(LANE_LENGTH - offset, lateral)
    }
}

fn template(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), *value))
        .collect()
}

fn champion_template() -> BTreeMap<String, f64> {
    template(&[
        (stat::HP, 600.0),
        (stat::MAX_HP, 600.0),
        (stat::MANA, 300.0),
        (stat::MAX_MANA, 300.0),
        (stat::AD, 55.0),
        (stat::ARMOR, 30.0),
        (stat::MR, 32.0),
        (stat::MOVE_SPEED, 3.4),
        (stat::ATTACK_RANGE, 1.5),
        (stat::HP_REGEN, 4.0),
        (stat::MANA_REGEN, 1.5),
    ])
}

fn turret_template() -> BTreeMap<String, f64> {
    template(&[
        (stat::HP, 3000.0),
        (stat::MAX_HP, 3000.0),
        (stat::AD, 150.0),
        (stat::ARMOR, 40.0),
        (stat::ATTACK_RANGE, 7.5),
    ])
}

fn minion_template() -> BTreeMap<String, f64> {
    template(&[
        (stat::HP, 300.0),
        (stat::MAX_HP, 300.0),
        (stat::AD, 12.0),
        (stat::MOVE_SPEED, 3.25),
        (stat::ATTACK_RANGE, 1.1),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_arena_world::query;
    use rand::SeedableRng;

    #[test]
    fn populate_fills_every_role_view() {
        let mut world = World::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        populate(&mut world, &mut rng, 2).expect("templates are valid");

        assert_eq!(world.len(), 8);
        assert_eq!(query::role_count(&world, Role::Champion), 2);
        assert_eq!(query::role_count(&world, Role::Turret), 2);
        assert_eq!(query::role_count(&world, Role::Minion), 4);
        assert_eq!(query::role_count(&world, Role::Projectile), 0);
        assert_eq!(world.entities_by_team(TeamId::RED).len(), 4);
    }

    #[test]
    fn same_seed_spawns_same_positions() {
        let positions = |seed: u64| {
            let mut world = World::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            populate(&mut world, &mut rng, 3).expect("templates are valid");
            world
                .entities()
                .iter()
                .map(|entity| entity.position())
                .collect::<Vec<_>>()
        };

        assert_eq!(positions(11), positions(11));
    }

    #[test]
    fn minions_advance_toward_the_enemy() {
        let mut world = World::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        populate(&mut world, &mut rng, 1).expect("templates are valid");
        let blue = EntityId::new("blue_minion_00");
        let start = world.entity(&blue).map(GameObject::position).expect("spawned");

        let mut events = Vec::new();
        world.step(&mut events);

        let after = world.entity(&blue).map(GameObject::position).expect("still present");
        assert!(after.x > start.x);
    }
}
