//! # Entity Placement
//!
//! Percentage-driven population of a generated grid with treasure, weapons,
//! monsters, pits, and thieves.
//!
//! Every pass takes a percentage in `[1, 100]`, derives its target count
//! from the eligible-location total with integer truncation, then samples
//! uniformly random coordinates until the target is met or the retry budget
//! runs out. Exhausting the budget stops the pass short without error;
//! placement is best-effort by design, while a bad percentage is an argument
//! error raised before any sampling.

use log::{debug, warn};

use crate::config::{PLACEMENT_RETRY_BUDGET, START_GOAL_RETRY_BUDGET, START_GOAL_SEPARATION};
use crate::grid::Grid;
use crate::model::{LocationKind, MonsterKind, Pit, Position, Thief, Treasure, WeaponKind};
use crate::rng::RandomSource;
use crate::{WarrenError, WarrenResult};

fn validate_percentage(name: &str, percentage: u32) -> WarrenResult<()> {
    if !(1..=100).contains(&percentage) {
        return Err(WarrenError::InvalidArgument(format!(
            "{} percentage must be within [1, 100], got {}",
            name, percentage
        )));
    }
    Ok(())
}

fn random_position<R: RandomSource>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(
        rng.next_in_range(grid.rows()),
        rng.next_in_range(grid.columns()),
    )
}

/// Draws a legal start/goal pair: both junctions, separated by at least
/// [`START_GOAL_SEPARATION`] rows *and* columns.
///
/// Fails with a state error when no legal pair is found within the retry
/// budget (possible on mazes whose far-apart locations all classified as
/// corridors).
pub fn select_start_and_goal<R: RandomSource>(
    grid: &Grid,
    rng: &mut R,
) -> WarrenResult<(Position, Position)> {
    for _ in 0..START_GOAL_RETRY_BUDGET {
        let start = random_position(grid, rng);
        let goal = random_position(grid, rng);
        if is_legal_start_and_goal(grid, start, goal) {
            debug!("selected start {} and goal {}", start, goal);
            return Ok((start, goal));
        }
    }
    Err(WarrenError::InvalidState(
        "failed to find a legal start/goal pair".to_string(),
    ))
}

/// Whether a start/goal pair satisfies the placement rules.
pub fn is_legal_start_and_goal(grid: &Grid, start: Position, goal: Position) -> bool {
    let junctions = grid
        .location(start)
        .zip(grid.location(goal))
        .map(|(s, g)| {
            s.kind() == LocationKind::Junction && g.kind() == LocationKind::Junction
        })
        .unwrap_or(false);
    junctions
        && start.x.abs_diff(goal.x) >= START_GOAL_SEPARATION
        && start.y.abs_diff(goal.y) >= START_GOAL_SEPARATION
}

/// Scatters treasure across the given share of junctions.
///
/// Each attempt draws one of the three treasure kinds uniformly and only
/// succeeds on a location currently holding no treasure; corridors refuse
/// silently. Start and goal are not excluded.
pub(crate) fn place_treasure<R: RandomSource>(
    grid: &mut Grid,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<usize> {
    validate_percentage("treasure", percentage)?;
    let target = percentage as usize * grid.junction_count() / 100;
    let mut remaining = target;
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while remaining > 0 && budget > 0 {
        let position = random_position(grid, rng);
        let kinds = Treasure::all();
        let treasure = kinds[rng.next_in_range(kinds.len())];
        let location = grid.cell_mut(position);
        if location.treasures().is_empty() && location.add_treasure(treasure) {
            remaining -= 1;
        }
        budget -= 1;
    }
    report_pass("treasure", target, remaining);
    Ok(target - remaining)
}

/// Settles stationary monsters: one is always forced onto the goal and
/// consumes one unit of the target; the rest go to random junctions,
/// excluding the start and junctions that already host one.
pub(crate) fn place_monsters<R: RandomSource>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<usize> {
    validate_percentage("monster", percentage)?;
    let target = percentage as isize * grid.junction_count() as isize / 100;
    grid.cell_mut(goal).add_monster(MonsterKind::Otyugh);
    let mut remaining = target - 1;
    let mut placed = 1;
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while remaining > 0 && budget > 0 {
        let position = random_position(grid, rng);
        let location = grid.cell_mut(position);
        if !location.has_monster()
            && position != start
            && location.add_monster(MonsterKind::Otyugh)
        {
            remaining -= 1;
            placed += 1;
        }
        budget -= 1;
    }
    report_pass("monster", target.max(1) as usize, remaining.max(0) as usize);
    Ok(placed)
}

/// Scatters weapons across the given share of junctions, excluding the
/// start and goal. Weapons may stack at one location.
pub(crate) fn place_weapons<R: RandomSource>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<usize> {
    validate_percentage("weapon", percentage)?;
    let target = percentage as usize * grid.junction_count() / 100;
    let mut remaining = target;
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while remaining > 0 && budget > 0 {
        let position = random_position(grid, rng);
        let kinds = WeaponKind::all();
        let weapon = kinds[rng.next_in_range(kinds.len())];
        if position != start && position != goal && grid.cell_mut(position).add_weapon(weapon) {
            remaining -= 1;
        }
        budget -= 1;
    }
    report_pass("weapon", target, remaining);
    Ok(target - remaining)
}

/// Digs pits under the given share of junctions, excluding the start, the
/// goal, and locations that already have one. Corridors may hold pits too.
pub(crate) fn place_pits<R: RandomSource>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<usize> {
    validate_percentage("pit", percentage)?;
    let target = percentage as usize * grid.junction_count() / 100;
    let mut remaining = target;
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while remaining > 0 && budget > 0 {
        let position = random_position(grid, rng);
        let location = grid.cell_mut(position);
        if !location.has_pit()
            && position != start
            && position != goal
            && location.add_pit(Pit::Deep)
        {
            remaining -= 1;
        }
        budget -= 1;
    }
    report_pass("pit", target, remaining);
    Ok(target - remaining)
}

/// Hides thieves across the given share of all locations (junctions and
/// corridors alike), excluding the start, the goal, and locations that
/// already have one.
pub(crate) fn place_thieves<R: RandomSource>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<usize> {
    validate_percentage("thief", percentage)?;
    let target = percentage as usize * (grid.junction_count() + grid.corridor_count()) / 100;
    let mut remaining = target;
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while remaining > 0 && budget > 0 {
        let position = random_position(grid, rng);
        let location = grid.cell_mut(position);
        if !location.has_thief()
            && position != start
            && position != goal
            && location.add_thief(Thief::TreasureThief)
        {
            remaining -= 1;
        }
        budget -= 1;
    }
    report_pass("thief", target, remaining);
    Ok(target - remaining)
}

/// Stations patrol monsters across the given share of all locations with
/// the same exclusions as thieves, returning the coordinates of every post
/// so the session can register them as active.
pub(crate) fn place_patrol_monsters<R: RandomSource>(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    percentage: u32,
    rng: &mut R,
) -> WarrenResult<Vec<Position>> {
    validate_percentage("patrol monster", percentage)?;
    let target = percentage as usize * (grid.junction_count() + grid.corridor_count()) / 100;
    let mut posts = Vec::with_capacity(target);
    let mut budget = PLACEMENT_RETRY_BUDGET;
    while posts.len() < target && budget > 0 {
        let position = random_position(grid, rng);
        let location = grid.cell_mut(position);
        if !location.has_patrol_monster()
            && position != start
            && position != goal
            && location.add_patrol_monster(MonsterKind::Beholder)
        {
            posts.push(position);
        }
        budget -= 1;
    }
    report_pass("patrol monster", target, target - posts.len());
    Ok(posts)
}

fn report_pass(name: &str, target: usize, shortfall: usize) {
    if shortfall > 0 {
        warn!(
            "{} placement stopped short: {} of {} placed",
            name,
            target - shortfall,
            target
        );
    } else {
        debug!("{} placement done: {} placed", name, target);
    }
}
