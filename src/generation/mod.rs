//! # Generation Module
//!
//! Graph-based maze construction and percentage-driven entity placement.
//!
//! The maze is built over the full coordinate space by drawing candidate
//! edges in random order and growing a forest of edge components until one
//! spanning tree remains. Edges that would have closed a cycle are kept in a
//! leftover pool; the configured interconnectivity budget promotes some of
//! them afterwards, each promotion adding exactly one alternate route.
//! Optional wrapping joins the two ends of every row and column, making the
//! maze toroidal.

pub mod placement;

pub use placement::select_start_and_goal;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MIN_DIMENSION;
use crate::grid::Grid;
use crate::model::{Direction, Location, Passage, Position};
use crate::rng::RandomSource;
use crate::{WarrenError, WarrenResult};

/// Configuration for a complete world.
///
/// All percentages are in `[1, 100]` and drive the share of eligible
/// locations receiving the corresponding entity; see
/// [`validate`](DungeonConfig::validate) for the full argument rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Rows in the maze (at least 6)
    pub rows: usize,
    /// Columns in the maze (at least 6)
    pub columns: usize,
    /// Extra-connectivity budget: how many cycle-forming edges to add back
    pub interconnectivity: usize,
    /// Whether rows and columns wrap around to the far side
    pub wrapping: bool,
    /// Percentage of junctions holding treasure
    pub treasure_percentage: u32,
    /// Percentage of junctions holding a stationary monster
    pub monster_percentage: u32,
    /// Percentage of junctions holding weapons
    pub weapon_percentage: u32,
    /// Percentage of junctions hiding a pit
    pub pit_percentage: u32,
    /// Percentage of all locations hiding a thief
    pub thief_percentage: u32,
    /// Percentage of all locations hosting a patrol monster
    pub patrol_monster_percentage: u32,
}

impl DungeonConfig {
    /// Creates a configuration with the given shape and a moderate entity
    /// mix.
    pub fn new(rows: usize, columns: usize, interconnectivity: usize, wrapping: bool) -> Self {
        Self {
            rows,
            columns,
            interconnectivity,
            wrapping,
            treasure_percentage: 30,
            monster_percentage: 10,
            weapon_percentage: 30,
            pit_percentage: 5,
            thief_percentage: 5,
            patrol_monster_percentage: 5,
        }
    }

    /// Checks every argument rule, failing on the first violation.
    pub fn validate(&self) -> WarrenResult<()> {
        if self.rows < MIN_DIMENSION {
            return Err(WarrenError::InvalidArgument(format!(
                "rows must be at least {}, got {}",
                MIN_DIMENSION, self.rows
            )));
        }
        if self.columns < MIN_DIMENSION {
            return Err(WarrenError::InvalidArgument(format!(
                "columns must be at least {}, got {}",
                MIN_DIMENSION, self.columns
            )));
        }
        for (name, value) in [
            ("treasure", self.treasure_percentage),
            ("monster", self.monster_percentage),
            ("weapon", self.weapon_percentage),
            ("pit", self.pit_percentage),
            ("thief", self.thief_percentage),
            ("patrol monster", self.patrol_monster_percentage),
        ] {
            if !(1..=100).contains(&value) {
                return Err(WarrenError::InvalidArgument(format!(
                    "{} percentage must be within [1, 100], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new(6, 8, 2, false)
    }
}

/// An undirected candidate edge between two neighboring coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    a: Position,
    b: Position,
}

impl Edge {
    fn new(a: Position, b: Position) -> Self {
        Self { a, b }
    }

    fn touches(&self, position: Position) -> bool {
        self.a == position || self.b == position
    }

    fn shares_endpoint(&self, other: &Edge) -> bool {
        self.touches(other.a) || self.touches(other.b)
    }
}

/// Builds the maze graph over a rows x columns coordinate space.
///
/// # Examples
///
/// ```
/// use warren::{MazeGenerator, SeededRandom};
///
/// let generator = MazeGenerator::new(6, 6, 0, false).unwrap();
/// let grid = generator.generate(&mut SeededRandom::from_seed(3)).unwrap();
/// assert_eq!(grid.junction_count() + grid.corridor_count(), 36);
/// ```
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    rows: usize,
    columns: usize,
    interconnectivity: usize,
    wrapping: bool,
}

impl MazeGenerator {
    /// Creates a generator, validating the maze shape.
    pub fn new(
        rows: usize,
        columns: usize,
        interconnectivity: usize,
        wrapping: bool,
    ) -> WarrenResult<Self> {
        if rows < MIN_DIMENSION {
            return Err(WarrenError::InvalidArgument(format!(
                "rows must be at least {}, got {}",
                MIN_DIMENSION, rows
            )));
        }
        if columns < MIN_DIMENSION {
            return Err(WarrenError::InvalidArgument(format!(
                "columns must be at least {}, got {}",
                MIN_DIMENSION, columns
            )));
        }
        Ok(Self {
            rows,
            columns,
            interconnectivity,
            wrapping,
        })
    }

    /// Generates the grid. Same random sequence, same maze.
    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> WarrenResult<Grid> {
        let mut candidates = self.enumerate_candidates();
        let mut components: Vec<Vec<Edge>> = Vec::new();
        let mut leftovers: Vec<Edge> = Vec::new();

        // Draw candidates in random order, growing a forest of edge
        // components. An edge touching one component extends it only when a
        // single component edge shares an endpoint with it; otherwise the
        // edge would close a cycle and goes to the leftover pool. An edge
        // touching two components bridges them.
        while !candidates.is_empty() {
            let edge = candidates.swap_remove(rng.next_in_range(candidates.len()));
            let touching: Vec<usize> = components
                .iter()
                .enumerate()
                .filter(|(_, component)| component.iter().any(|e| e.shares_endpoint(&edge)))
                .map(|(index, _)| index)
                .collect();
            match touching.as_slice() {
                [] => components.push(vec![edge]),
                [index] => {
                    let incident = components[*index]
                        .iter()
                        .filter(|e| e.shares_endpoint(&edge))
                        .count();
                    if incident == 1 {
                        components[*index].push(edge);
                    } else {
                        leftovers.push(edge);
                    }
                }
                [first, second] => {
                    // Components are vertex-disjoint, so at most two can
                    // touch the edge's endpoints.
                    let absorbed = components.swap_remove(*second);
                    components[*first].extend(absorbed);
                    components[*first].push(edge);
                }
                _ => {
                    return Err(WarrenError::GenerationFailed(
                        "edge touched more than two components".to_string(),
                    ));
                }
            }
        }

        self.bridge_remaining(&mut components, &mut leftovers)?;
        let mut spanning = components.pop().unwrap_or_default();
        debug_assert_eq!(spanning.len(), self.rows * self.columns - 1);
        debug!(
            "spanning structure has {} edges, {} leftover cycle edges",
            spanning.len(),
            leftovers.len()
        );

        // Promote up to `interconnectivity` leftover edges; each one adds
        // exactly one alternate route.
        let mut promoted = 0;
        for _ in 0..self.interconnectivity {
            if leftovers.is_empty() {
                break;
            }
            let edge = leftovers.swap_remove(rng.next_in_range(leftovers.len()));
            spanning.push(edge);
            promoted += 1;
        }
        debug!("promoted {} leftover edges for interconnectivity", promoted);

        Ok(self.classify(&spanning))
    }

    /// Every edge between 4-neighbors, plus one wrap edge joining the two
    /// ends of each row and each column when wrapping is on.
    fn enumerate_candidates(&self) -> Vec<Edge> {
        let mut candidates = Vec::new();
        for i in 0..self.rows {
            for j in 0..self.columns {
                if i + 1 < self.rows {
                    candidates.push(Edge::new(Position::new(i, j), Position::new(i + 1, j)));
                }
                if j + 1 < self.columns {
                    candidates.push(Edge::new(Position::new(i, j), Position::new(i, j + 1)));
                }
            }
        }
        if self.wrapping {
            for i in 0..self.rows {
                candidates.push(Edge::new(
                    Position::new(i, 0),
                    Position::new(i, self.columns - 1),
                ));
            }
            for j in 0..self.columns {
                candidates.push(Edge::new(
                    Position::new(0, j),
                    Position::new(self.rows - 1, j),
                ));
            }
        }
        candidates
    }

    /// Merges any remaining components into one spanning tree by promoting
    /// bridging edges from the leftover pool.
    ///
    /// The component-growing pass can reject every edge of a coordinate
    /// whose neighbors were all busy when its edges were drawn, stranding
    /// it; every grid edge is either accepted or a leftover, so a bridging
    /// leftover always exists while the structure is disconnected.
    fn bridge_remaining(
        &self,
        components: &mut Vec<Vec<Edge>>,
        leftovers: &mut Vec<Edge>,
    ) -> WarrenResult<()> {
        let total = self.rows * self.columns;
        loop {
            let mut component_of = vec![None; total];
            let mut covered = 0;
            for (index, component) in components.iter().enumerate() {
                for edge in component {
                    for position in [edge.a, edge.b] {
                        let slot = &mut component_of[position.x * self.columns + position.y];
                        if slot.is_none() {
                            covered += 1;
                            *slot = Some(index);
                        }
                    }
                }
            }
            if components.len() <= 1 && covered == total {
                return Ok(());
            }

            let bridge = leftovers.iter().position(|edge| {
                component_of[edge.a.x * self.columns + edge.a.y]
                    != component_of[edge.b.x * self.columns + edge.b.y]
            });
            let Some(index) = bridge else {
                return Err(WarrenError::GenerationFailed(
                    "maze is disconnected and no bridging edge remains".to_string(),
                ));
            };
            let edge = leftovers.swap_remove(index);
            debug!("bridging disconnected components through {:?}", edge);
            let first = component_of[edge.a.x * self.columns + edge.a.y];
            let second = component_of[edge.b.x * self.columns + edge.b.y];
            match (first, second) {
                (Some(i), Some(j)) => {
                    let absorbed = components.swap_remove(j.max(i));
                    components[j.min(i)].extend(absorbed);
                    components[j.min(i)].push(edge);
                }
                (Some(i), None) | (None, Some(i)) => components[i].push(edge),
                (None, None) => components.push(vec![edge]),
            }
        }
    }

    /// Translates accepted edges into per-coordinate passages and classifies
    /// each location by its passage count.
    fn classify(&self, spanning: &[Edge]) -> Grid {
        let mut cells = Vec::with_capacity(self.rows * self.columns);
        for i in 0..self.rows {
            for j in 0..self.columns {
                let position = Position::new(i, j);
                let mut passages: Vec<Passage> = Vec::new();
                for edge in spanning {
                    if edge.touches(position) {
                        let passage = self.passage_for(edge, position);
                        if !passages.contains(&passage) {
                            passages.push(passage);
                        }
                    }
                }
                cells.push(Location::new(position, passages));
            }
        }
        let grid = Grid::from_cells(self.rows, self.columns, cells);
        debug!(
            "classified {} junctions and {} corridors",
            grid.junction_count(),
            grid.corridor_count()
        );
        grid
    }

    /// The passage implied by `edge` when standing at `origin`, derived from
    /// the endpoints' relative positions, or their wrap-around positions for
    /// a seam edge.
    fn passage_for(&self, edge: &Edge, origin: Position) -> Passage {
        let (a, b) = (edge.a, edge.b);
        let other = if origin == a { b } else { a };
        let direction = if a.x == b.x {
            let eastward = if b.y == a.y + 1 || (self.wrapping && a.y == self.columns - 1 && b.y == 0)
            {
                origin == a
            } else {
                origin == b
            };
            if eastward {
                Direction::East
            } else {
                Direction::West
            }
        } else {
            let southward = if b.x == a.x + 1 || (self.wrapping && a.x == self.rows - 1 && b.x == 0)
            {
                origin == a
            } else {
                origin == b
            };
            if southward {
                Direction::South
            } else {
                Direction::North
            }
        };
        Passage::new(other, direction)
    }
}
