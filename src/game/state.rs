//! # State Machine
//!
//! Movement, sensing, looting, ranged attacks, encounter resolution, and
//! revival — the operations that advance a session turn by turn.
//!
//! The machine has one terminal state: the player standing on the goal.
//! Death is not terminal inside the engine; it is reported as an outcome and
//! the caller decides between [`Dungeon::reset_player`] and giving up.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::Dungeon;
use crate::model::{Direction, MonsterKind, Position, Treasure, WeaponKind};
use crate::rng::RandomSource;
use crate::{WarrenError, WarrenResult};

/// What a call to [`Dungeon::move_player`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// No passage leads that way; the player stayed put. Patrol monsters
    /// still took their step.
    Blocked,
    /// The player moved; the destination was resolved to this encounter.
    Moved(Encounter),
}

/// What the player walked into after a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    /// An empty, uneventful location
    None,
    /// A stationary monster got the player
    EatenByMonster,
    /// A wounded stationary monster missed its chance
    SurvivedMonster,
    /// The floor gave way
    FellIntoPit,
    /// A thief took this treasure from the player's bag
    Robbed(Treasure),
    /// A thief found nothing worth taking
    RobberSympathy,
    /// A patrol monster got the player
    EatenByPatrolMonster,
    /// A patrol monster missed; its post goes quiet
    SurvivedPatrolMonster,
    /// The player stands on the goal — the terminal state
    ReachedGoal,
}

impl Encounter {
    /// Whether this encounter killed the player.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Encounter::EatenByMonster | Encounter::FellIntoPit | Encounter::EatenByPatrolMonster
        )
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encounter::None => write!(f, "Nothing of note happens"),
            Encounter::EatenByMonster => {
                write!(f, "Chomp, chomp, chomp, you are eaten by an Otyugh!")
            }
            Encounter::SurvivedMonster => write!(f, "You were lucky this time!"),
            Encounter::FellIntoPit => write!(f, "You fell into a pit!"),
            Encounter::Robbed(treasure) => write!(f, "You were looted of a {}!", treasure),
            Encounter::RobberSympathy => {
                write!(f, "You are broke! The thief sends his deepest sympathies")
            }
            Encounter::EatenByPatrolMonster => {
                write!(f, "You have been eaten by a Beholder!")
            }
            Encounter::SurvivedPatrolMonster => write!(f, "You were lucky this time!"),
            Encounter::ReachedGoal => write!(f, "You emerged victorious!"),
        }
    }
}

/// Where an arrow came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// Stopped dead at a junction with no onward passage
    Wall,
    /// Flew its full power and dropped
    Ground,
}

impl Impact {
    fn phrase(self) -> &'static str {
        match self {
            Impact::Wall => "a wall",
            Impact::Ground => "the ground",
        }
    }
}

/// The result of a ranged attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The stash is empty; nothing was consumed
    OutOfArrows,
    /// A full-health monster took its first wound
    WoundedMonster(Impact),
    /// An already-wounded monster was finished off
    SlainMonster(Impact),
    /// The arrow found no monster
    Missed(Impact),
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::OutOfArrows => {
                write!(f, "You are out of arrows, explore to find more")
            }
            ShotOutcome::WoundedMonster(impact) => write!(
                f,
                "You hear a small ouch in the distance and the arrow hitting {}",
                impact.phrase()
            ),
            ShotOutcome::SlainMonster(impact) => write!(
                f,
                "You hear a great howl in the distance and the arrow hitting {}",
                impact.phrase()
            ),
            ShotOutcome::Missed(impact) => {
                write!(f, "You hear the arrow hitting {}", impact.phrase())
            }
        }
    }
}

impl<R: RandomSource> Dungeon<R> {
    /// Moves the player one location in `direction`, if a passage exists.
    ///
    /// Whether or not the move succeeds, every active patrol monster takes
    /// one uniformly random step along its own passages. A successful move
    /// appends the destination to the visited list and resolves what the
    /// player walked into; an invalid direction is a soft failure, not an
    /// error.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let destination = self
            .valid_passages()
            .iter()
            .find(|p| p.direction == direction)
            .map(|p| p.to);
        if let Some(to) = destination {
            self.player.move_to(to);
            self.visited.push(to);
            debug!("player moved {} to {}", direction, to);
        } else {
            debug!("player blocked moving {}", direction);
        }
        self.step_patrol_monsters();
        match destination {
            None => MoveOutcome::Blocked,
            Some(_) => MoveOutcome::Moved(self.resolve_encounter()),
        }
    }

    /// Every active patrol post picks one of its own passages uniformly at
    /// random, relocates its monster there, and vacates; the active set
    /// becomes the destinations.
    fn step_patrol_monsters(&mut self) {
        let posts = std::mem::take(&mut self.patrol_posts);
        let mut next_posts = Vec::with_capacity(posts.len());
        for post in posts {
            let passages = self.grid.cell(post).passages();
            let passage = passages[self.rng.next_in_range(passages.len())];
            self.grid.cell_mut(post).remove_patrol_monster();
            self.grid
                .cell_mut(passage.to)
                .add_patrol_monster(MonsterKind::Beholder);
            next_posts.push(passage.to);
        }
        self.patrol_posts = next_posts;
    }

    /// Resolves the player's location after a move, first match wins:
    /// stationary monster, pit, thief, patrol monster, goal.
    fn resolve_encounter(&mut self) -> Encounter {
        let position = self.player.position();
        if let Some(monster) = self.grid.cell(position).monster() {
            // A full-health monster never misses; a wounded one has an even
            // chance of letting the player slip away.
            if monster.is_at_full_health() || self.rng.next_in_range(2) == 0 {
                info!("player eaten by the monster at {}", position);
                return Encounter::EatenByMonster;
            }
            return Encounter::SurvivedMonster;
        }
        if self.grid.cell(position).has_pit() {
            info!("player fell into the pit at {}", position);
            return Encounter::FellIntoPit;
        }
        if self.grid.cell(position).has_thief() {
            if self.player.treasures().is_empty() {
                return Encounter::RobberSympathy;
            }
            let index = self.rng.next_in_range(self.player.treasures().len());
            let stolen = self.player.surrender_treasure(index);
            info!("thief at {} took a {}", position, stolen);
            return Encounter::Robbed(stolen);
        }
        if self.grid.cell(position).has_patrol_monster() {
            if self.rng.next_in_range(2) == 0 {
                info!("player eaten by the patrol monster at {}", position);
                return Encounter::EatenByPatrolMonster;
            }
            // The survivor scares the monster off its patrol; the post goes
            // quiet but the monster stays where it stands.
            if let Some(index) = self.patrol_posts.iter().position(|p| *p == position) {
                self.patrol_posts.remove(index);
            }
            return Encounter::SurvivedPatrolMonster;
        }
        if position == self.goal {
            info!("player reached the goal at {}", position);
            return Encounter::ReachedGoal;
        }
        Encounter::None
    }

    /// Picks up the treasure at `index` from the player's location.
    ///
    /// Reports `false` when the location holds no treasure or the player's
    /// bag is full; fails with an argument error when treasure is present
    /// but `index` is out of range.
    pub fn pick_treasure(&mut self, index: usize) -> WarrenResult<bool> {
        let position = self.player.position();
        if !self.grid.cell(position).has_treasure() {
            return Ok(false);
        }
        if !self.player.has_treasure_room() {
            return Ok(false);
        }
        let available = self.grid.cell(position).treasures().len();
        if index >= available {
            return Err(WarrenError::InvalidArgument(format!(
                "treasure index {} out of range (only {} here)",
                index, available
            )));
        }
        let treasure = self.grid.cell_mut(position).remove_treasure(index);
        let stored = self.player.store_treasure(treasure);
        debug_assert!(stored);
        Ok(true)
    }

    /// Picks up the weapon at `index` from the player's location.
    ///
    /// Same contract as [`pick_treasure`](Dungeon::pick_treasure).
    pub fn pick_weapon(&mut self, index: usize) -> WarrenResult<bool> {
        let position = self.player.position();
        if !self.grid.cell(position).has_weapon() {
            return Ok(false);
        }
        if !self.player.has_weapon_room() {
            return Ok(false);
        }
        let available = self.grid.cell(position).weapons().len();
        if index >= available {
            return Err(WarrenError::InvalidArgument(format!(
                "weapon index {} out of range (only {} here)",
                index, available
            )));
        }
        let weapon = self.grid.cell_mut(position).remove_weapon(index);
        let stored = self.player.store_weapon(weapon);
        debug_assert!(stored);
        Ok(true)
    }

    /// Faint scent: exactly one stationary monster found across the 2-hop
    /// sweep of the player's passages (duplicate routes counted as the
    /// sweep visits them).
    pub fn faint_monster_scent(&self) -> bool {
        self.two_hop_monster_count() == 1
    }

    /// Strong scent: a stationary monster one hop away, or more than one
    /// across the 2-hop sweep.
    pub fn strong_monster_scent(&self) -> bool {
        let position = self.player.position();
        let one_hop = self
            .grid
            .cell(position)
            .passages()
            .iter()
            .filter(|p| self.grid.cell(p.to).has_monster())
            .count();
        one_hop > 0 || self.two_hop_monster_count() > 1
    }

    fn two_hop_monster_count(&self) -> usize {
        let position = self.player.position();
        let mut count = 0;
        for first in self.grid.cell(position).passages() {
            for second in self.grid.cell(first.to).passages() {
                if self.grid.cell(second.to).has_monster() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Damp-earth scent: a pit one hop away.
    pub fn damp_earth_scent(&self) -> bool {
        let position = self.player.position();
        self.grid
            .cell(position)
            .passages()
            .iter()
            .any(|p| self.grid.cell(p.to).has_pit())
    }

    /// Fires one arrow from the player's location.
    ///
    /// `power` must lie within `[1, weapon.flight_distance()]`, else an
    /// argument error. An empty stash short-circuits without consuming
    /// anything; otherwise one arrow is always spent. The arrow flies up to
    /// `power` steps: corridors bend it along their other passage, junctions
    /// pass it straight through or stop it dead at a wall. Wherever it
    /// stops, a full-health monster is wounded and a wounded one slain (its
    /// coordinate recorded).
    pub fn shoot(
        &mut self,
        weapon: WeaponKind,
        power: u32,
        direction: Direction,
    ) -> WarrenResult<ShotOutcome> {
        if power < 1 || power > weapon.flight_distance() {
            return Err(WarrenError::InvalidArgument(format!(
                "shot power must be within [1, {}], got {}",
                weapon.flight_distance(),
                power
            )));
        }
        if self.player.arrows_left() == 0 {
            return Ok(ShotOutcome::OutOfArrows);
        }
        self.player.consume_arrow();

        let mut position = self.player.position();
        let mut direction = direction;
        let mut power = power;
        while power > 0 {
            let step = {
                let passages = self.grid.cell(position).passages();
                if passages.len() == 2 {
                    // A corridor forwards the arrow along whichever passage
                    // does not double back on its flight.
                    let onward = if passages[0].direction != direction.reverse() {
                        passages[0]
                    } else {
                        passages[1]
                    };
                    Some((onward.to, onward.direction))
                } else {
                    passages
                        .iter()
                        .find(|p| p.direction == direction)
                        .map(|p| (p.to, direction))
                }
            };
            match step {
                Some((to, onward)) => {
                    position = to;
                    direction = onward;
                    power -= 1;
                }
                // Stopped dead without spending the step.
                None => return Ok(self.strike(position, weapon, Impact::Wall)),
            }
        }
        Ok(self.strike(position, weapon, Impact::Ground))
    }

    /// Applies the two-tier hit rule where an arrow came to rest.
    fn strike(&mut self, position: Position, weapon: WeaponKind, impact: Impact) -> ShotOutcome {
        let at_full_health = match self.grid.cell(position).monster() {
            None => return ShotOutcome::Missed(impact),
            Some(monster) => monster.is_at_full_health(),
        };
        if at_full_health {
            self.grid.cell_mut(position).wound_monster(weapon.hit_points());
            debug!("arrow wounded the monster at {}", position);
            ShotOutcome::WoundedMonster(impact)
        } else {
            self.grid.cell_mut(position).remove_monster();
            self.slain_monsters.push(position);
            info!("arrow slew the monster at {}", position);
            ShotOutcome::SlainMonster(impact)
        }
    }

    /// Spends one health point and returns the player to the start,
    /// leaving inventory, visited list, slain list, and patrol posts
    /// intact.
    ///
    /// Fails with a state error once health is exhausted; callers must
    /// stop reviving at that point.
    pub fn reset_player(&mut self) -> WarrenResult<()> {
        self.player.spend_health()?;
        self.player.move_to(self.start);
        info!(
            "player revived at {} with {} health left",
            self.start,
            self.player.health()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::DungeonConfig;
    use crate::grid::Grid;
    use crate::model::{Location, Passage, Pit, Player, Thief};
    use std::collections::VecDeque;

    /// A random source that replays a script, reducing each value modulo
    /// the requested bound; an exhausted script yields zero.
    struct ScriptedRandom {
        values: VecDeque<usize>,
    }

    impl ScriptedRandom {
        fn new(values: &[usize]) -> Self {
            Self {
                values: values.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_in_range(&mut self, bound: usize) -> usize {
            self.values.pop_front().map(|v| v % bound).unwrap_or(0)
        }
    }

    /// Builds a grid from undirected 4-neighbor edges; cells with no edges
    /// become isolated one-passage-less junctions that tests simply avoid.
    fn grid_from_edges(
        rows: usize,
        columns: usize,
        edges: &[((usize, usize), (usize, usize))],
    ) -> Grid {
        let mut passages: Vec<Vec<Passage>> = vec![Vec::new(); rows * columns];
        for &((ax, ay), (bx, by)) in edges {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            let (forward, backward) = if ax == bx {
                (Direction::East, Direction::West)
            } else {
                (Direction::South, Direction::North)
            };
            passages[ax * columns + ay].push(Passage::new(b, forward));
            passages[bx * columns + by].push(Passage::new(a, backward));
        }
        let cells = passages
            .into_iter()
            .enumerate()
            .map(|(i, p)| Location::new(Position::new(i / columns, i % columns), p))
            .collect();
        Grid::from_cells(rows, columns, cells)
    }

    fn dungeon_on(
        grid: Grid,
        start: Position,
        goal: Position,
        rng: ScriptedRandom,
    ) -> Dungeon<ScriptedRandom> {
        Dungeon {
            config: DungeonConfig::new(6, 6, 0, false),
            grid,
            start,
            goal,
            player: Player::new(start),
            visited: vec![start],
            slain_monsters: Vec::new(),
            patrol_posts: Vec::new(),
            rng,
        }
    }

    /// One row of five cells joined west-to-east: junction ends, corridor
    /// middle.
    fn line_grid() -> Grid {
        grid_from_edges(
            1,
            5,
            &[
                ((0, 0), (0, 1)),
                ((0, 1), (0, 2)),
                ((0, 2), (0, 3)),
                ((0, 3), (0, 4)),
            ],
        )
    }

    #[test]
    fn test_move_records_visits_in_order() {
        let mut dungeon = dungeon_on(
            line_grid(),
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert_eq!(dungeon.move_player(Direction::East), MoveOutcome::Moved(Encounter::None));
        assert_eq!(dungeon.move_player(Direction::East), MoveOutcome::Moved(Encounter::None));
        assert_eq!(
            dungeon.visited_positions(),
            &[Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_blocked_move_is_soft_failure() {
        let mut dungeon = dungeon_on(
            line_grid(),
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert_eq!(dungeon.move_player(Direction::North), MoveOutcome::Blocked);
        assert_eq!(dungeon.player_position(), Position::new(0, 0));
        assert_eq!(dungeon.visited_positions(), &[Position::new(0, 0)]);
    }

    #[test]
    fn test_patrol_steps_even_when_blocked() {
        let mut grid = line_grid();
        let post = Position::new(0, 4);
        grid.cell_mut(post).add_patrol_monster(MonsterKind::Beholder);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[0]),
        );
        dungeon.patrol_posts = vec![post];

        assert_eq!(dungeon.move_player(Direction::North), MoveOutcome::Blocked);
        // The end of the line has exactly one passage, so the monster must
        // now stand one cell west, and the old post is vacated.
        assert!(!dungeon.location(post).unwrap().has_patrol_monster());
        assert!(dungeon
            .location(Position::new(0, 3))
            .unwrap()
            .has_patrol_monster());
        assert_eq!(dungeon.patrol_posts(), &[Position::new(0, 3)]);
    }

    #[test]
    fn test_patrol_always_lands_on_a_neighbor() {
        for roll in 0..4 {
            let mut grid = grid_from_edges(
                3,
                3,
                &[
                    ((0, 1), (1, 1)),
                    ((1, 1), (2, 1)),
                    ((1, 0), (1, 1)),
                    ((1, 1), (1, 2)),
                ],
            );
            let post = Position::new(1, 1);
            grid.cell_mut(post).add_patrol_monster(MonsterKind::Beholder);
            let neighbors: Vec<Position> =
                grid.cell(post).passages().iter().map(|p| p.to).collect();
            let mut dungeon = dungeon_on(
                grid,
                Position::new(0, 1),
                Position::new(2, 1),
                ScriptedRandom::new(&[roll, 1]),
            );
            dungeon.patrol_posts = vec![post];

            dungeon.move_player(Direction::West);
            assert!(!dungeon.location(post).unwrap().has_patrol_monster());
            let landed: Vec<Position> = dungeon.patrol_posts().to_vec();
            assert_eq!(landed.len(), 1);
            assert!(neighbors.contains(&landed[0]));
            assert!(dungeon.location(landed[0]).unwrap().has_patrol_monster());
        }
    }

    #[test]
    fn test_full_health_monster_always_eats() {
        let mut grid = grid_from_edges(1, 3, &[((0, 0), (0, 1)), ((0, 1), (0, 2))]);
        let lair = Position::new(0, 2);
        assert!(grid.cell_mut(lair).add_monster(MonsterKind::Otyugh));
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            lair,
            // No escape roll is consumed for a full-health monster.
            ScriptedRandom::new(&[]),
        );
        dungeon.move_player(Direction::East);
        assert_eq!(
            dungeon.move_player(Direction::East),
            MoveOutcome::Moved(Encounter::EatenByMonster)
        );
    }

    #[test]
    fn test_wounded_monster_even_odds() {
        for (roll, expected) in [
            (0, Encounter::EatenByMonster),
            (1, Encounter::SurvivedMonster),
        ] {
            let mut grid = grid_from_edges(1, 3, &[((0, 0), (0, 1)), ((0, 1), (0, 2))]);
            let lair = Position::new(0, 2);
            grid.cell_mut(lair).add_monster(MonsterKind::Otyugh);
            grid.cell_mut(lair).wound_monster(1);
            let mut dungeon = dungeon_on(
                grid,
                Position::new(0, 0),
                lair,
                ScriptedRandom::new(&[roll]),
            );
            dungeon.move_player(Direction::East);
            assert_eq!(
                dungeon.move_player(Direction::East),
                MoveOutcome::Moved(expected)
            );
        }
    }

    #[test]
    fn test_pit_encounter() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 1)).add_pit(Pit::Deep);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert_eq!(
            dungeon.move_player(Direction::East),
            MoveOutcome::Moved(Encounter::FellIntoPit)
        );
    }

    #[test]
    fn test_thief_takes_one_random_treasure() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 1)).add_thief(Thief::TreasureThief);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[1]),
        );
        dungeon.player.store_treasure(Treasure::Ruby);
        dungeon.player.store_treasure(Treasure::Diamond);

        assert_eq!(
            dungeon.move_player(Direction::East),
            MoveOutcome::Moved(Encounter::Robbed(Treasure::Diamond))
        );
        assert_eq!(dungeon.player().treasures(), &[Treasure::Ruby]);
    }

    #[test]
    fn test_thief_with_empty_bag() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 1)).add_thief(Thief::TreasureThief);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert_eq!(
            dungeon.move_player(Direction::East),
            MoveOutcome::Moved(Encounter::RobberSympathy)
        );
    }

    #[test]
    fn test_patrol_encounter_survival_quiets_post() {
        let mut grid = line_grid();
        let post = Position::new(0, 3);
        grid.cell_mut(post).add_patrol_monster(MonsterKind::Beholder);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 1),
            Position::new(0, 4),
            // The player steps east to (0,2); the patrol's first passage is
            // west, into the same cell; then the escape roll comes up lucky.
            ScriptedRandom::new(&[0, 1]),
        );
        dungeon.patrol_posts = vec![post];

        let outcome = dungeon.move_player(Direction::East);
        assert_eq!(outcome, MoveOutcome::Moved(Encounter::SurvivedPatrolMonster));
        // The post is no longer active, though the monster still stands
        // where it met the player.
        assert!(dungeon.patrol_posts().is_empty());
        assert!(dungeon
            .location(dungeon.player_position())
            .unwrap()
            .has_patrol_monster());
    }

    #[test]
    fn test_goal_encounter_when_unguarded() {
        let grid = grid_from_edges(1, 3, &[((0, 0), (0, 1)), ((0, 1), (0, 2))]);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 2),
            ScriptedRandom::new(&[]),
        );
        dungeon.move_player(Direction::East);
        assert_eq!(
            dungeon.move_player(Direction::East),
            MoveOutcome::Moved(Encounter::ReachedGoal)
        );
        assert!(dungeon.is_goal_reached());
    }

    #[test]
    fn test_pick_treasure_contract() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 0)).add_treasure(Treasure::Ruby);
        grid.cell_mut(Position::new(0, 0)).add_treasure(Treasure::Sapphire);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );

        // Out-of-range index with treasure present is an argument error.
        assert!(matches!(
            dungeon.pick_treasure(5),
            Err(WarrenError::InvalidArgument(_))
        ));
        assert!(dungeon.pick_treasure(1).unwrap());
        assert_eq!(dungeon.player().treasures(), &[Treasure::Sapphire]);
        assert!(dungeon.pick_treasure(0).unwrap());
        // Nothing left: soft failure.
        assert!(!dungeon.pick_treasure(0).unwrap());
    }

    #[test]
    fn test_pick_weapon_respects_bag_cap() {
        let mut grid = line_grid();
        for _ in 0..3 {
            grid.cell_mut(Position::new(0, 0)).add_weapon(WeaponKind::CrookedArrow);
        }
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        // Starting stash is three; the cap is four.
        assert!(dungeon.pick_weapon(0).unwrap());
        assert!(!dungeon.pick_weapon(0).unwrap());
        assert_eq!(dungeon.player().arrows_left(), 4);
        assert_eq!(dungeon.current_location().weapons().len(), 2);
    }

    #[test]
    fn test_scents() {
        // A plus: center (1,1) joined to four one-passage junctions.
        let edges = [
            ((0, 1), (1, 1)),
            ((1, 1), (2, 1)),
            ((1, 0), (1, 1)),
            ((1, 1), (1, 2)),
        ];
        let mut grid = grid_from_edges(3, 3, &edges);
        grid.cell_mut(Position::new(0, 1)).add_monster(MonsterKind::Otyugh);
        let dungeon = dungeon_on(
            grid,
            Position::new(1, 0),
            Position::new(2, 1),
            ScriptedRandom::new(&[]),
        );
        // One monster two hops out: faint, not strong.
        assert!(dungeon.faint_monster_scent());
        assert!(!dungeon.strong_monster_scent());

        // A second two-hop monster tips the sweep over one: strong.
        let mut grid = grid_from_edges(3, 3, &edges);
        grid.cell_mut(Position::new(0, 1)).add_monster(MonsterKind::Otyugh);
        grid.cell_mut(Position::new(2, 1)).add_monster(MonsterKind::Otyugh);
        let dungeon = dungeon_on(
            grid,
            Position::new(1, 0),
            Position::new(1, 2),
            ScriptedRandom::new(&[]),
        );
        assert!(!dungeon.faint_monster_scent());
        assert!(dungeon.strong_monster_scent());

        // Standing next to a monster is always strong.
        let mut grid = grid_from_edges(3, 3, &edges);
        grid.cell_mut(Position::new(0, 1)).add_monster(MonsterKind::Otyugh);
        let dungeon = dungeon_on(
            grid,
            Position::new(1, 1),
            Position::new(1, 2),
            ScriptedRandom::new(&[]),
        );
        assert!(dungeon.strong_monster_scent());
    }

    #[test]
    fn test_damp_earth_scent() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 1)).add_pit(Pit::Deep);
        let dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert!(dungeon.damp_earth_scent());

        let dungeon = dungeon_on(
            line_grid(),
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert!(!dungeon.damp_earth_scent());
    }

    #[test]
    fn test_shot_flies_straight_down_the_line() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 4)).add_monster(MonsterKind::Otyugh);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );

        // Power 2 falls short: the arrow drops in an empty corridor.
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 2, Direction::East).unwrap(),
            ShotOutcome::Missed(Impact::Ground)
        );
        // Power 4 lands exactly on the lair: first wound, then the kill.
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 4, Direction::East).unwrap(),
            ShotOutcome::WoundedMonster(Impact::Ground)
        );
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 4, Direction::East).unwrap(),
            ShotOutcome::SlainMonster(Impact::Ground)
        );
        assert_eq!(dungeon.slain_monster_positions(), &[Position::new(0, 4)]);
        assert_eq!(dungeon.player().arrows_left(), 0);

        // Stash empty: nothing consumed, nothing hit.
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 1, Direction::East).unwrap(),
            ShotOutcome::OutOfArrows
        );
    }

    #[test]
    fn test_corridors_bend_the_arrow() {
        // (0,0) -E- (0,1) -S- (1,1) -E- (1,2): both middles are corridors.
        let mut grid = grid_from_edges(
            2,
            3,
            &[((0, 0), (0, 1)), ((0, 1), (1, 1)), ((1, 1), (1, 2))],
        );
        grid.cell_mut(Position::new(1, 2)).add_monster(MonsterKind::Otyugh);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(1, 2),
            ScriptedRandom::new(&[]),
        );

        // The arrow is fired east but follows the corridor south then east.
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 3, Direction::East).unwrap(),
            ShotOutcome::WoundedMonster(Impact::Ground)
        );
    }

    #[test]
    fn test_dead_end_shot_hits_wall_without_spending_power() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 4)).add_monster(MonsterKind::Otyugh);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );

        // No passage north from this dead-end junction: the arrow stops at
        // the player's own location, one arrow gone, the distant monster
        // untouched.
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 1, Direction::North).unwrap(),
            ShotOutcome::Missed(Impact::Wall)
        );
        assert_eq!(dungeon.player().arrows_left(), 2);
        let monster = dungeon.location(Position::new(0, 4)).unwrap().monster();
        assert!(monster.unwrap().is_at_full_health());
    }

    #[test]
    fn test_shot_power_validation() {
        let mut dungeon = dungeon_on(
            line_grid(),
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        assert!(matches!(
            dungeon.shoot(WeaponKind::CrookedArrow, 0, Direction::East),
            Err(WarrenError::InvalidArgument(_))
        ));
        assert!(matches!(
            dungeon.shoot(WeaponKind::CrookedArrow, 6, Direction::East),
            Err(WarrenError::InvalidArgument(_))
        ));
        // Failed validation consumes nothing.
        assert_eq!(dungeon.player().arrows_left(), 3);
    }

    #[test]
    fn test_wall_strike_on_wounded_monster_kills_it() {
        // Player shares a junction wall with a wounded monster lair: a
        // power-1 shot into the dead end finishes it.
        let mut grid = grid_from_edges(1, 2, &[((0, 0), (0, 1))]);
        grid.cell_mut(Position::new(0, 0)).add_monster(MonsterKind::Otyugh);
        grid.cell_mut(Position::new(0, 0)).wound_monster(1);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 1),
            ScriptedRandom::new(&[]),
        );
        assert_eq!(
            dungeon.shoot(WeaponKind::CrookedArrow, 1, Direction::North).unwrap(),
            ShotOutcome::SlainMonster(Impact::Wall)
        );
        assert_eq!(dungeon.slain_monster_positions(), &[Position::new(0, 0)]);
    }

    #[test]
    fn test_reset_player_spends_health_and_keeps_progress() {
        let mut grid = line_grid();
        grid.cell_mut(Position::new(0, 0)).add_treasure(Treasure::Ruby);
        let mut dungeon = dungeon_on(
            grid,
            Position::new(0, 0),
            Position::new(0, 4),
            ScriptedRandom::new(&[]),
        );
        dungeon.pick_treasure(0).unwrap();
        dungeon.move_player(Direction::East);
        dungeon.move_player(Direction::East);

        dungeon.reset_player().unwrap();
        assert_eq!(dungeon.player_position(), Position::new(0, 0));
        assert_eq!(dungeon.player().health(), 2);
        assert_eq!(dungeon.player().treasures(), &[Treasure::Ruby]);
        // Visited history survives the revival.
        assert_eq!(dungeon.visited_positions().len(), 3);

        dungeon.reset_player().unwrap();
        dungeon.reset_player().unwrap();
        assert!(matches!(
            dungeon.reset_player(),
            Err(WarrenError::InvalidState(_))
        ));
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            ShotOutcome::WoundedMonster(Impact::Wall).to_string(),
            "You hear a small ouch in the distance and the arrow hitting a wall"
        );
        assert_eq!(
            ShotOutcome::SlainMonster(Impact::Ground).to_string(),
            "You hear a great howl in the distance and the arrow hitting the ground"
        );
        assert_eq!(
            ShotOutcome::Missed(Impact::Wall).to_string(),
            "You hear the arrow hitting a wall"
        );
        assert_eq!(
            ShotOutcome::OutOfArrows.to_string(),
            "You are out of arrows, explore to find more"
        );
        assert_eq!(
            Encounter::Robbed(Treasure::Ruby).to_string(),
            "You were looted of a ruby!"
        );
    }
}
