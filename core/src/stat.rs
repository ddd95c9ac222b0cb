//! Stat records carried by every combat-capable entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current health.
pub const HP: &str = "hp";
/// Upper bound for health.
pub const MAX_HP: &str = "max_hp";
/// Current mana.
pub const MANA: &str = "mana";
/// Upper bound for mana.
pub const MAX_MANA: &str = "max_mana";
/// Attack damage.
pub const AD: &str = "ad";
/// Ability power.
pub const AP: &str = "ap";
/// Physical resistance.
pub const ARMOR: &str = "armor";
/// Magic resistance.
pub const MR: &str = "mr";
/// Movement speed in world units per second.
pub const MOVE_SPEED: &str = "move_speed";
/// Basic attack reach in world units.
pub const ATTACK_RANGE: &str = "attack_range";
/// Basic attacks per second before bonuses.
pub const ATTACK_SPEED_BASE: &str = "attack_speed_base";
/// Health restored per second.
pub const HP_REGEN: &str = "hp_regen";
/// Mana restored per second.
pub const MANA_REGEN: &str = "mana_regen";

/// Errors raised while building a stat record from a template.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StatError {
    /// The template lacks a stat every entity must carry.
    #[error("stat template is missing required stat `{stat}`")]
    MissingRequiredStat {
        /// Name of the absent stat.
        stat: &'static str,
    },
}

/// Numeric attributes of an entity.
///
/// Health and its cap are fixed fields so their presence is guaranteed by
/// construction. Every other stat lives in an open map keyed by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct Stats {
    hp: f64,
    max_hp: f64,
    extra: BTreeMap<String, f64>,
}

impl Stats {
    /// Creates a stat record with the provided health values and no extra stats.
    #[must_use]
    pub fn new(hp: f64, max_hp: f64) -> Self {
        Self {
            hp,
            max_hp,
            extra: BTreeMap::new(),
        }
    }

    /// Builds a stat record from a name-to-value template.
    ///
    /// The template is copied; later changes to it never reach the record.
    pub fn from_template(template: &BTreeMap<String, f64>) -> Result<Self, StatError> {
        let hp = *template
            .get(HP)
            .ok_or(StatError::MissingRequiredStat { stat: HP })?;
        let max_hp = *template
            .get(MAX_HP)
            .ok_or(StatError::MissingRequiredStat { stat: MAX_HP })?;
        let extra = template
            .iter()
            .filter(|(name, _)| !is_required(name))
            .map(|(name, value)| (name.clone(), *value))
            .collect();
        Ok(Self { hp, max_hp, extra })
    }

    /// Returns the record with an additional stat set.
    #[must_use]
    pub fn with_stat(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Current health.
    #[must_use]
    pub const fn hp(&self) -> f64 {
        self.hp
    }

    /// Upper bound for health.
    #[must_use]
    pub const fn max_hp(&self) -> f64 {
        self.max_hp
    }

    /// Overwrites current health without clamping.
    pub fn set_hp(&mut self, hp: f64) {
        self.hp = hp;
    }

    /// Overwrites the health cap without clamping current health.
    pub fn set_max_hp(&mut self, max_hp: f64) {
        self.max_hp = max_hp;
    }

    /// Looks up a stat by name, including `hp` and `max_hp`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            HP => Some(self.hp),
            MAX_HP => Some(self.max_hp),
            _ => self.extra.get(name).copied(),
        }
    }

    /// Looks up a stat by name, falling back to zero when absent.
    #[must_use]
    pub fn get_or_zero(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// Writes a stat by name. Health fields are written raw.
    pub fn set(&mut self, name: &str, value: f64) {
        match name {
            HP => self.hp = value,
            MAX_HP => self.max_hp = value,
            _ => {
                let _ = self.extra.insert(name.to_owned(), value);
            }
        }
    }

    /// Iterates over every stat, health fields first, then the rest by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        [(HP, self.hp), (MAX_HP, self.max_hp)]
            .into_iter()
            .chain(self.extra.iter().map(|(name, value)| (name.as_str(), *value)))
    }
}

impl TryFrom<BTreeMap<String, f64>> for Stats {
    type Error = StatError;

    fn try_from(template: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_template(&template)
    }
}

impl From<Stats> for BTreeMap<String, f64> {
    fn from(stats: Stats) -> Self {
        let mut map = stats.extra;
        let _ = map.insert(HP.to_owned(), stats.hp);
        let _ = map.insert(MAX_HP.to_owned(), stats.max_hp);
        map
    }
}

fn is_required(name: &str) -> bool {
    name == HP || name == MAX_HP
}
