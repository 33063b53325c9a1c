//! # Warren
//!
//! A procedurally generated maze-world engine with turn-based exploration
//! and combat.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a small set of concepts:
//!
//! - **Model**: immutable coordinates, directions, and passages, plus the
//!   entity kinds that inhabit the world
//! - **Generation**: graph-based maze construction with tunable
//!   interconnectivity and optional toroidal wrapping, followed by
//!   percentage-driven entity placement
//! - **Grid**: the row x column matrix of classified locations and the
//!   breadth/depth-first path queries over it
//! - **Game**: the turn-based state machine that owns the player and
//!   resolves movement, sensing, looting, and ranged attacks
//!
//! Front ends (a text console, a graphical shell) consume only the query
//! and command surface of [`Dungeon`]; none of their logic affects game
//! semantics. Randomness is injected through [`RandomSource`] so that every
//! maze and every combat roll is reproducible from a seed.

pub mod game;
pub mod generation;
pub mod grid;
pub mod model;
pub mod rng;

// Core re-exports for the common types front ends need.
pub use game::{Dungeon, Encounter, Impact, MoveOutcome, ShotOutcome};
pub use generation::{DungeonConfig, MazeGenerator};
pub use grid::{Grid, TraversalMethod};
pub use model::{
    Direction, Location, LocationKind, MonsterKind, MonsterState, Passage, Pit, Player, Position,
    Thief, Treasure, WeaponKind,
};
pub use rng::{RandomSource, SeededRandom};

/// Core error type for the Warren engine.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An argument was out of range or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was issued in a state that cannot service it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// World generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Minimum number of rows or columns a maze may have
    pub const MIN_DIMENSION: usize = 6;

    /// Minimum row and column separation between the start and the goal
    pub const START_GOAL_SEPARATION: usize = 5;

    /// Player starting health (number of times the player may be revived)
    pub const STARTING_HEALTH: u32 = 3;

    /// Number of crooked arrows in the player's starting stash
    pub const STARTING_ARROWS: usize = 3;

    /// Maximum number of items either player bag can hold
    pub const BAG_CAPACITY: usize = 4;

    /// Attempts allowed to a single placement pass before it stops short
    pub const PLACEMENT_RETRY_BUDGET: u32 = 1000;

    /// Attempts allowed when drawing a legal start/goal pair
    pub const START_GOAL_RETRY_BUDGET: u32 = 1000;
}
