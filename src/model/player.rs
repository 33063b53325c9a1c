//! # Player
//!
//! The explorer: a position, a health pool spent on revivals, and two
//! capacity-limited bags (treasure and weapons). Arrows are the crooked
//! arrows in the weapon bag; the player enters the maze with three.

use crate::config::{BAG_CAPACITY, STARTING_ARROWS, STARTING_HEALTH};
use crate::model::{Position, Treasure, WeaponKind};
use crate::{WarrenError, WarrenResult};

/// The player's mutable state.
#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    health: u32,
    treasures: Vec<Treasure>,
    weapons: Vec<WeaponKind>,
}

impl Player {
    /// Creates a player at the start position with full health and the
    /// starting stash of crooked arrows.
    pub(crate) fn new(start: Position) -> Self {
        Self {
            position: start,
            health: STARTING_HEALTH,
            treasures: Vec::new(),
            weapons: vec![WeaponKind::CrookedArrow; STARTING_ARROWS],
        }
    }

    /// Current coordinate.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Remaining health (revivals left).
    pub fn health(&self) -> u32 {
        self.health
    }

    /// The treasure bag, in pickup order.
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// The weapon bag, in pickup order.
    pub fn weapons(&self) -> &[WeaponKind] {
        &self.weapons
    }

    /// Crooked arrows left in the weapon bag.
    pub fn arrows_left(&self) -> usize {
        self.weapons
            .iter()
            .filter(|w| matches!(w, WeaponKind::CrookedArrow))
            .count()
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Spends one health point for a revival.
    ///
    /// Fails with a state error once health is exhausted; callers must stop
    /// reviving at that point.
    pub(crate) fn spend_health(&mut self) -> WarrenResult<()> {
        if self.health == 0 {
            return Err(WarrenError::InvalidState(
                "no health left to spend".to_string(),
            ));
        }
        self.health -= 1;
        Ok(())
    }

    /// Stows a treasure, refusing once the bag is full.
    pub(crate) fn store_treasure(&mut self, treasure: Treasure) -> bool {
        if self.treasures.len() >= BAG_CAPACITY {
            return false;
        }
        self.treasures.push(treasure);
        true
    }

    /// Stows a weapon, refusing once the bag is full.
    pub(crate) fn store_weapon(&mut self, weapon: WeaponKind) -> bool {
        if self.weapons.len() >= BAG_CAPACITY {
            return false;
        }
        self.weapons.push(weapon);
        true
    }

    /// Whether another treasure fits in the bag.
    pub(crate) fn has_treasure_room(&self) -> bool {
        self.treasures.len() < BAG_CAPACITY
    }

    /// Whether another weapon fits in the bag.
    pub(crate) fn has_weapon_room(&self) -> bool {
        self.weapons.len() < BAG_CAPACITY
    }

    /// Removes the first crooked arrow from the bag.
    pub(crate) fn consume_arrow(&mut self) {
        if let Some(index) = self
            .weapons
            .iter()
            .position(|w| matches!(w, WeaponKind::CrookedArrow))
        {
            self.weapons.remove(index);
        }
    }

    /// Hands over the treasure at `index` (to a thief).
    pub(crate) fn surrender_treasure(&mut self, index: usize) -> Treasure {
        self.treasures.remove(index)
    }
}
