//! # Entity Kinds
//!
//! The treasures, weapons, monsters, pits, and thieves that populate a
//! generated world, together with the explicit monster-health model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of treasure a junction can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treasure {
    Ruby,
    Sapphire,
    Diamond,
}

impl Treasure {
    /// Relative worth of the treasure.
    pub fn value(self) -> u32 {
        match self {
            Treasure::Ruby => 1,
            Treasure::Sapphire => 5,
            Treasure::Diamond => 10,
        }
    }

    /// Returns all treasure kinds, in placement-sampling order.
    pub fn all() -> [Treasure; 3] {
        [Treasure::Ruby, Treasure::Sapphire, Treasure::Diamond]
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Treasure::Ruby => "ruby",
            Treasure::Sapphire => "sapphire",
            Treasure::Diamond => "diamond",
        };
        write!(f, "{}", name)
    }
}

/// The kinds of ranged weapon found in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    CrookedArrow,
}

impl WeaponKind {
    /// The farthest number of steps a shot from this weapon can fly.
    pub fn flight_distance(self) -> u32 {
        match self {
            WeaponKind::CrookedArrow => 5,
        }
    }

    /// Damage dealt by one hit.
    pub fn hit_points(self) -> u32 {
        match self {
            WeaponKind::CrookedArrow => 1,
        }
    }

    /// Returns all weapon kinds, in placement-sampling order.
    pub fn all() -> [WeaponKind; 1] {
        [WeaponKind::CrookedArrow]
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponKind::CrookedArrow => write!(f, "crooked arrow"),
        }
    }
}

/// The kinds of monster that inhabit the world.
///
/// An Otyugh is bound to one junction and takes two hits to kill; a
/// Beholder patrols, relocating one random passage every player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Otyugh,
    Beholder,
}

impl MonsterKind {
    /// Health the monster has when unharmed.
    pub fn full_health(self) -> u32 {
        match self {
            MonsterKind::Otyugh => 2,
            MonsterKind::Beholder => 1,
        }
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonsterKind::Otyugh => "Otyugh",
            MonsterKind::Beholder => "Beholder",
        };
        write!(f, "{}", name)
    }
}

/// A monster occupying a location, with its remaining health tracked
/// explicitly against the kind's full-health threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterState {
    kind: MonsterKind,
    health: u32,
}

impl MonsterState {
    /// Creates a monster of the given kind at full health.
    pub fn new(kind: MonsterKind) -> Self {
        Self {
            kind,
            health: kind.full_health(),
        }
    }

    /// The kind of this monster.
    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Whether the monster has not yet been wounded.
    pub fn is_at_full_health(&self) -> bool {
        self.health == self.kind.full_health()
    }

    /// Applies one hit, saturating at zero.
    pub(crate) fn take_hit(&mut self, hit_points: u32) {
        self.health = self.health.saturating_sub(hit_points);
    }
}

/// The kinds of pit a location can hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pit {
    Deep,
}

/// The kinds of thief lurking in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Thief {
    TreasureThief,
}
