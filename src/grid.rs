//! # Grid
//!
//! The row x column matrix of classified locations, plus the path queries
//! that run over its passage graph.
//!
//! A grid is created once by the maze generator and never resized. Every
//! location is reachable from every other using only exposed passages; the
//! generator guarantees that invariant, and the traversals here rely on it.

use std::collections::{HashSet, VecDeque};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Location, LocationKind, Passage, Position};
use crate::{WarrenError, WarrenResult};

/// The traversal strategy for [`Grid::calculate_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalMethod {
    /// Frontier queue; the returned path has the fewest possible passages.
    BreadthFirst,
    /// Frontier stack; returns some path, not necessarily the shortest.
    DepthFirst,
}

impl FromStr for TraversalMethod {
    type Err = WarrenError;

    fn from_str(s: &str) -> WarrenResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(TraversalMethod::BreadthFirst),
            "dfs" | "depth-first" => Ok(TraversalMethod::DepthFirst),
            other => Err(WarrenError::InvalidArgument(format!(
                "no such traversal method '{}'",
                other
            ))),
        }
    }
}

/// The generated maze: every location, and the junction/corridor totals.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    junction_count: usize,
    corridor_count: usize,
    cells: Vec<Location>,
}

impl Grid {
    /// Assembles a grid from its row-major cells, counting the variants.
    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<Location>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        let junction_count = cells
            .iter()
            .filter(|l| l.kind() == LocationKind::Junction)
            .count();
        let corridor_count = cells.len() - junction_count;
        Self {
            rows,
            columns,
            junction_count,
            corridor_count,
            cells,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total junction locations.
    pub fn junction_count(&self) -> usize {
        self.junction_count
    }

    /// Total corridor locations.
    pub fn corridor_count(&self) -> usize {
        self.corridor_count
    }

    /// The location at `position`, or `None` when out of bounds.
    pub fn location(&self, position: Position) -> Option<&Location> {
        if position.x >= self.rows || position.y >= self.columns {
            return None;
        }
        Some(self.cell(position))
    }

    /// Direct access for in-bounds positions. Positions taken from passages
    /// are always in bounds.
    pub(crate) fn cell(&self, position: Position) -> &Location {
        &self.cells[position.x * self.columns + position.y]
    }

    pub(crate) fn cell_mut(&mut self, position: Position) -> &mut Location {
        &mut self.cells[position.x * self.columns + position.y]
    }

    /// Iterates over every location, row-major.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.cells.iter()
    }

    /// Returns one ordered passage sequence from `start` to `end`.
    ///
    /// Breadth-first search returns a shortest path; depth-first returns
    /// some path. Each frontier entry carries its own copy of the passage
    /// sequence accumulated so far, so branches never alias one another's
    /// paths. Fails with an argument error for out-of-bounds coordinates and
    /// with a state error if the frontier empties before `end` is reached
    /// (which the connectivity invariant rules out for generated grids).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use warren::{Grid, Position, TraversalMethod};
    ///
    /// # fn example(grid: &Grid) -> warren::WarrenResult<()> {
    /// let path = grid.calculate_path(
    ///     Position::new(0, 0),
    ///     Position::new(3, 4),
    ///     TraversalMethod::BreadthFirst,
    /// )?;
    /// // Replaying `path` from (0, 0) lands exactly on (3, 4).
    /// # Ok(())
    /// # }
    /// ```
    pub fn calculate_path(
        &self,
        start: Position,
        end: Position,
        method: TraversalMethod,
    ) -> WarrenResult<Vec<Passage>> {
        if self.location(start).is_none() {
            return Err(WarrenError::InvalidArgument(format!(
                "start {} is outside the grid",
                start
            )));
        }
        if self.location(end).is_none() {
            return Err(WarrenError::InvalidArgument(format!(
                "end {} is outside the grid",
                end
            )));
        }
        match method {
            TraversalMethod::BreadthFirst => self.path_breadth_first(start, end),
            TraversalMethod::DepthFirst => self.path_depth_first(start, end),
        }
    }

    fn path_breadth_first(&self, start: Position, end: Position) -> WarrenResult<Vec<Passage>> {
        let mut explored: HashSet<Position> = HashSet::new();
        let mut frontier: VecDeque<(Position, Vec<Passage>)> = VecDeque::new();
        frontier.push_back((start, Vec::new()));

        while let Some((node, sequence)) = frontier.pop_front() {
            if node == end {
                return Ok(sequence);
            }
            if !explored.insert(node) {
                continue;
            }
            for passage in self.cell(node).passages() {
                if !explored.contains(&passage.to) {
                    let mut extended = sequence.clone();
                    extended.push(*passage);
                    frontier.push_back((passage.to, extended));
                }
            }
        }

        Err(WarrenError::InvalidState(
            "traversal frontier emptied before reaching the end".to_string(),
        ))
    }

    fn path_depth_first(&self, start: Position, end: Position) -> WarrenResult<Vec<Passage>> {
        let mut explored: HashSet<Position> = HashSet::new();
        let mut frontier: Vec<(Position, Vec<Passage>)> = vec![(start, Vec::new())];

        while let Some((node, sequence)) = frontier.pop() {
            if node == end {
                return Ok(sequence);
            }
            if !explored.insert(node) {
                continue;
            }
            for passage in self.cell(node).passages() {
                if !explored.contains(&passage.to) {
                    let mut extended = sequence.clone();
                    extended.push(*passage);
                    frontier.push((passage.to, extended));
                }
            }
        }

        Err(WarrenError::InvalidState(
            "traversal frontier emptied before reaching the end".to_string(),
        ))
    }
}
