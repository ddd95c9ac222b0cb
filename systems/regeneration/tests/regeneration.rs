use glam::Vec2;
use lane_arena_core::{stat, Command, DamageType, EntityId, Event, Identity, Role, Stats, TeamId};
use lane_arena_system_regeneration::Regeneration;
use lane_arena_world::{self as world, query, GameClock, GameObject, World};

fn champion(id: &str, hp: f64, hp_regen: f64) -> GameObject {
    GameObject::new(
        Identity::new(EntityId::new(id), TeamId::BLUE, Vec2::ZERO, 0.65),
        Stats::new(hp, 600.0).with_stat(stat::HP_REGEN, hp_regen),
    )
    .with_role(Role::Champion)
}

fn run_step(world: &mut World, regeneration: &mut Regeneration) -> Vec<Event> {
    let mut events = Vec::new();
    world.step(&mut events);

    let mut commands = Vec::new();
    regeneration.handle(&events, &query::entity_view(world), &mut commands);

    let mut healed = Vec::new();
    for command in commands {
        world::apply(world, command, &mut healed);
    }
    healed
}

#[test]
fn regeneration_tops_up_to_max_hp() {
    let mut world = World::new(GameClock::new(0.5, 2.0).expect("valid clock"));
    let mut regeneration = Regeneration::new();
    let _ = world.add_entity(champion("taric", 590.0, 4.0));

    let first = run_step(&mut world, &mut regeneration);
    assert_eq!(
        first,
        vec![Event::Healed {
            target: EntityId::new("taric"),
            amount: 4.0,
        }]
    );

    let second = run_step(&mut world, &mut regeneration);
    assert_eq!(
        second,
        vec![Event::Healed {
            target: EntityId::new("taric"),
            amount: 4.0,
        }]
    );

    let third = run_step(&mut world, &mut regeneration);
    assert_eq!(
        third,
        vec![Event::Healed {
            target: EntityId::new("taric"),
            amount: 2.0,
        }]
    );

    assert!(run_step(&mut world, &mut regeneration).is_empty());
    let taric = world.entity(&EntityId::new("taric")).expect("champion present");
    assert_eq!(taric.stats().hp(), 600.0);
}

#[test]
fn dead_champions_do_not_regenerate() {
    let mut world = World::default();
    let mut regeneration = Regeneration::new();
    let _ = world.add_entity(champion("fallen", 100.0, 10.0));

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DealDamage {
            target: EntityId::new("fallen"),
            amount: 100.0,
            damage_type: DamageType::True,
        },
        &mut events,
    );

    assert!(run_step(&mut world, &mut regeneration).is_empty());
    let fallen = world.entity(&EntityId::new("fallen")).expect("still registered");
    assert!(!fallen.is_alive());
}
