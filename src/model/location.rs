//! # Location
//!
//! A graph node of the maze: its coordinate, its outgoing passages, and the
//! entity slots physically present there.
//!
//! Locations come in two variants decided once, at creation time, by passage
//! count: a **junction** (1, 3, or 4 passages) can host every entity kind,
//! while a **corridor** (exactly 2 passages) permanently refuses treasure,
//! weapons, and stationary monsters. The refusal is a capability check in the
//! shared slot logic, so adding to a disabled slot is a silent no-op that
//! reports failure rather than an error.

use serde::{Deserialize, Serialize};

use crate::model::{MonsterKind, MonsterState, Passage, Pit, Position, Thief, Treasure, WeaponKind};

/// The structural classification of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    /// 1, 3, or 4 passages; all entity slots usable
    Junction,
    /// Exactly 2 passages; treasure, weapon, and stationary-monster slots
    /// are permanently disabled
    Corridor,
}

/// The entity slots a location offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Treasure,
    Weapon,
    StationaryMonster,
    PatrolMonster,
    Pit,
    Thief,
}

impl LocationKind {
    /// Classifies by outgoing-passage count. The count is fixed at
    /// construction, so the classification never changes.
    fn classify(passage_count: usize) -> Self {
        if passage_count == 2 {
            LocationKind::Corridor
        } else {
            LocationKind::Junction
        }
    }

    /// Whether this variant can host the given slot.
    pub fn allows(self, slot: Slot) -> bool {
        match self {
            LocationKind::Junction => true,
            LocationKind::Corridor => matches!(slot, Slot::PatrolMonster | Slot::Pit | Slot::Thief),
        }
    }
}

/// A single cell of the maze and everything currently inside it.
#[derive(Debug, Clone)]
pub struct Location {
    position: Position,
    kind: LocationKind,
    passages: Vec<Passage>,
    treasures: Vec<Treasure>,
    weapons: Vec<WeaponKind>,
    monster: Option<MonsterState>,
    patrol_monster: Option<MonsterState>,
    pit: Option<Pit>,
    thief: Option<Thief>,
}

impl Location {
    /// Creates a location with the given outgoing passages, classifying it
    /// from their count.
    pub(crate) fn new(position: Position, passages: Vec<Passage>) -> Self {
        let kind = LocationKind::classify(passages.len());
        Self {
            position,
            kind,
            passages,
            treasures: Vec::new(),
            weapons: Vec::new(),
            monster: None,
            patrol_monster: None,
            pit: None,
            thief: None,
        }
    }

    /// The coordinate of this location.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Junction or corridor.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// The outgoing passages usable from here.
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Whether any treasure lies here.
    pub fn has_treasure(&self) -> bool {
        !self.treasures.is_empty()
    }

    /// The treasures lying here, in pickup-index order.
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// Drops a treasure here. Reports `false` from a corridor.
    pub(crate) fn add_treasure(&mut self, treasure: Treasure) -> bool {
        if !self.kind.allows(Slot::Treasure) {
            return false;
        }
        self.treasures.push(treasure);
        true
    }

    /// Removes and returns the treasure at `index`.
    pub(crate) fn remove_treasure(&mut self, index: usize) -> Treasure {
        self.treasures.remove(index)
    }

    /// Whether any weapon lies here.
    pub fn has_weapon(&self) -> bool {
        !self.weapons.is_empty()
    }

    /// The weapons lying here, in pickup-index order.
    pub fn weapons(&self) -> &[WeaponKind] {
        &self.weapons
    }

    /// Drops a weapon here. Reports `false` from a corridor.
    pub(crate) fn add_weapon(&mut self, weapon: WeaponKind) -> bool {
        if !self.kind.allows(Slot::Weapon) {
            return false;
        }
        self.weapons.push(weapon);
        true
    }

    /// Removes and returns the weapon at `index`.
    pub(crate) fn remove_weapon(&mut self, index: usize) -> WeaponKind {
        self.weapons.remove(index)
    }

    /// Whether a stationary monster lives here.
    pub fn has_monster(&self) -> bool {
        self.monster.is_some()
    }

    /// The stationary monster living here, if any.
    pub fn monster(&self) -> Option<&MonsterState> {
        self.monster.as_ref()
    }

    /// Settles a stationary monster here at full health. Reports `false`
    /// from a corridor.
    pub(crate) fn add_monster(&mut self, kind: MonsterKind) -> bool {
        if !self.kind.allows(Slot::StationaryMonster) {
            return false;
        }
        self.monster = Some(MonsterState::new(kind));
        true
    }

    /// Wounds the stationary monster here, if any.
    pub(crate) fn wound_monster(&mut self, hit_points: u32) {
        if let Some(monster) = self.monster.as_mut() {
            monster.take_hit(hit_points);
        }
    }

    /// Removes the stationary monster.
    pub(crate) fn remove_monster(&mut self) {
        self.monster = None;
    }

    /// Whether a patrol monster is currently here.
    pub fn has_patrol_monster(&self) -> bool {
        self.patrol_monster.is_some()
    }

    /// The patrol monster currently here, if any.
    pub fn patrol_monster(&self) -> Option<&MonsterState> {
        self.patrol_monster.as_ref()
    }

    /// Stations a patrol monster here at full health.
    pub(crate) fn add_patrol_monster(&mut self, kind: MonsterKind) -> bool {
        if !self.kind.allows(Slot::PatrolMonster) {
            return false;
        }
        self.patrol_monster = Some(MonsterState::new(kind));
        true
    }

    /// Vacates the patrol slot.
    pub(crate) fn remove_patrol_monster(&mut self) {
        self.patrol_monster = None;
    }

    /// Whether a pit gapes here.
    pub fn has_pit(&self) -> bool {
        self.pit.is_some()
    }

    /// The pit here, if any.
    pub fn pit(&self) -> Option<Pit> {
        self.pit
    }

    /// Digs a pit here.
    pub(crate) fn add_pit(&mut self, pit: Pit) -> bool {
        if !self.kind.allows(Slot::Pit) {
            return false;
        }
        self.pit = Some(pit);
        true
    }

    /// Whether a thief lurks here.
    pub fn has_thief(&self) -> bool {
        self.thief.is_some()
    }

    /// The thief lurking here, if any.
    pub fn thief(&self) -> Option<Thief> {
        self.thief
    }

    /// Hides a thief here.
    pub(crate) fn add_thief(&mut self, thief: Thief) -> bool {
        if !self.kind.allows(Slot::Thief) {
            return false;
        }
        self.thief = Some(thief);
        true
    }
}
