//! # Game Module
//!
//! The playable world and its turn-based state machine.
//!
//! [`Dungeon`] is the single entry point front ends talk to: it owns the
//! generated grid, the player, and the session bookkeeping (visited
//! coordinates, slain monsters, active patrol posts), and exposes the
//! query/command surface — movement, sensing, looting, shooting, revival.

pub mod state;

pub use state::{Encounter, Impact, MoveOutcome, ShotOutcome};

use log::info;

use crate::generation::{self, placement, DungeonConfig, MazeGenerator};
use crate::grid::Grid;
use crate::model::{Direction, Location, Passage, Player, Position};
use crate::rng::{RandomSource, SeededRandom};
use crate::WarrenResult;

/// A fully generated, populated, playable maze world.
///
/// Constructed once, then mutated only through player commands. All
/// randomness — maze shape, entity layout, patrol steps, escape rolls —
/// flows from the injected [`RandomSource`], so a seed reproduces an entire
/// playthrough.
#[derive(Debug)]
pub struct Dungeon<R: RandomSource = SeededRandom> {
    config: DungeonConfig,
    grid: Grid,
    start: Position,
    goal: Position,
    player: Player,
    visited: Vec<Position>,
    slain_monsters: Vec<Position>,
    patrol_posts: Vec<Position>,
    rng: R,
}

impl Dungeon<SeededRandom> {
    /// Builds a world from the configuration, seeding the default random
    /// source.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Dungeon, DungeonConfig};
    ///
    /// let dungeon = Dungeon::new(DungeonConfig::new(8, 8, 2, false), 42);
    /// # let _ = dungeon;
    /// ```
    pub fn new(config: DungeonConfig, seed: u64) -> WarrenResult<Self> {
        Self::with_random_source(config, SeededRandom::from_seed(seed))
    }
}

impl<R: RandomSource> Dungeon<R> {
    /// Builds a world from the configuration and an injected random source.
    ///
    /// Fails with an argument error for out-of-range dimensions or
    /// percentages, and with a state error when the maze admits no legal
    /// start/goal pair within the retry budget.
    pub fn with_random_source(config: DungeonConfig, mut rng: R) -> WarrenResult<Self> {
        config.validate()?;
        let generator = MazeGenerator::new(
            config.rows,
            config.columns,
            config.interconnectivity,
            config.wrapping,
        )?;
        let mut grid = generator.generate(&mut rng)?;
        let (start, goal) = generation::select_start_and_goal(&grid, &mut rng)?;

        placement::place_pits(&mut grid, start, goal, config.pit_percentage, &mut rng)?;
        placement::place_thieves(&mut grid, start, goal, config.thief_percentage, &mut rng)?;
        placement::place_weapons(&mut grid, start, goal, config.weapon_percentage, &mut rng)?;
        placement::place_monsters(&mut grid, start, goal, config.monster_percentage, &mut rng)?;
        placement::place_treasure(&mut grid, config.treasure_percentage, &mut rng)?;

        let player = Player::new(start);
        let visited = vec![start];
        let patrol_posts = placement::place_patrol_monsters(
            &mut grid,
            start,
            goal,
            config.patrol_monster_percentage,
            &mut rng,
        )?;

        info!(
            "world ready: {}x{}, start {}, goal {}, {} patrol posts",
            config.rows,
            config.columns,
            start,
            goal,
            patrol_posts.len()
        );
        Ok(Self {
            config,
            grid,
            start,
            goal,
            player,
            visited,
            slain_monsters: Vec::new(),
            patrol_posts,
            rng,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.config.columns
    }

    /// The extra-connectivity budget the maze was built with.
    pub fn interconnectivity(&self) -> usize {
        self.config.interconnectivity
    }

    /// Whether the maze wraps at its edges.
    pub fn is_wrapping(&self) -> bool {
        self.config.wrapping
    }

    /// Percentage of junctions holding treasure.
    pub fn treasure_percentage(&self) -> u32 {
        self.config.treasure_percentage
    }

    /// Percentage of junctions holding a stationary monster.
    pub fn monster_percentage(&self) -> u32 {
        self.config.monster_percentage
    }

    /// Percentage of junctions holding weapons.
    pub fn weapon_percentage(&self) -> u32 {
        self.config.weapon_percentage
    }

    /// Percentage of junctions hiding a pit.
    pub fn pit_percentage(&self) -> u32 {
        self.config.pit_percentage
    }

    /// Percentage of locations hiding a thief.
    pub fn thief_percentage(&self) -> u32 {
        self.config.thief_percentage
    }

    /// Percentage of locations hosting a patrol monster.
    pub fn patrol_monster_percentage(&self) -> u32 {
        self.config.patrol_monster_percentage
    }

    /// The start coordinate.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The goal coordinate.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The generated maze, for read-only queries and path calculation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The location at `position`, or `None` when out of bounds.
    ///
    /// This is the per-coordinate query surface: the returned location
    /// answers treasure, weapon, monster, patrol-monster, pit, and thief
    /// questions directly.
    pub fn location(&self, position: Position) -> Option<&Location> {
        self.grid.location(position)
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player's current coordinate.
    pub fn player_position(&self) -> Position {
        self.player.position()
    }

    /// The location the player is standing in.
    pub fn current_location(&self) -> &Location {
        self.grid.cell(self.player.position())
    }

    /// The passages usable from the player's location.
    pub fn valid_passages(&self) -> &[Passage] {
        self.current_location().passages()
    }

    /// The directions the player may move in, in passage order.
    pub fn valid_directions(&self) -> Vec<Direction> {
        self.valid_passages().iter().map(|p| p.direction).collect()
    }

    /// Every coordinate the player has entered, in order, starting with the
    /// start coordinate.
    pub fn visited_positions(&self) -> &[Position] {
        &self.visited
    }

    /// Coordinates where a stationary monster has been slain.
    pub fn slain_monster_positions(&self) -> &[Position] {
        &self.slain_monsters
    }

    /// Coordinates currently hosting an active patrol monster.
    pub fn patrol_posts(&self) -> &[Position] {
        &self.patrol_posts
    }

    /// Whether the player stands on the goal (the terminal state).
    pub fn is_goal_reached(&self) -> bool {
        self.player.position() == self.goal
    }
}
