#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that restores health over time from the `hp_regen` stat.

use lane_arena_core::{Command, EntitySnapshot, EntityView, Event};

/// Regeneration system that queues heal commands for wounded living entities.
#[derive(Debug, Default)]
pub struct Regeneration {
    scratch: Vec<Command>,
}

impl Regeneration {
    /// Creates a new regeneration system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::Heal` entries covering the time reported by `events`.
    ///
    /// Only `Event::TimeAdvanced` contributes elapsed time. Dead entities,
    /// entities at full health, and entities without positive `hp_regen` are
    /// skipped.
    pub fn handle(&mut self, events: &[Event], entities: &EntityView, out: &mut Vec<Command>) {
        let elapsed: f64 = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt, .. } => Some(*dt),
                _ => None,
            })
            .sum();

        if elapsed <= 0.0 || entities.is_empty() {
            return;
        }

        self.scratch.clear();

        for snapshot in entities.iter().filter(|snapshot| is_regenerating(snapshot)) {
            self.scratch.push(Command::Heal {
                target: snapshot.id.clone(),
                amount: snapshot.hp_regen * elapsed,
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn is_regenerating(snapshot: &EntitySnapshot) -> bool {
    snapshot.is_alive() && snapshot.hp_regen > 0.0 && snapshot.hp < snapshot.max_hp
}
