//! # Warren Console Driver
//!
//! A thin text front end over the engine: builds a world from CLI flags or a
//! JSON configuration file, then runs a read/print loop. All game semantics
//! live in the library; this binary only translates lines of input into
//! engine commands and outcomes into prose.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use warren::{
    Direction, Dungeon, DungeonConfig, Encounter, LocationKind, MoveOutcome, SeededRandom,
    WarrenError, WarrenResult, WeaponKind,
};

/// Command line arguments for the Warren console driver.
#[derive(Parser, Debug)]
#[command(name = "warren")]
#[command(about = "A procedurally generated maze-world of caves, tunnels, and monsters")]
#[command(version)]
struct Args {
    /// Random seed for world generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to a JSON world configuration (overrides the shape flags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rows in the maze
    #[arg(long, default_value_t = 8)]
    rows: usize,

    /// Columns in the maze
    #[arg(long, default_value_t = 8)]
    columns: usize,

    /// Extra-connectivity budget
    #[arg(long, default_value_t = 2)]
    interconnectivity: usize,

    /// Wrap the maze at its edges
    #[arg(long)]
    wrapping: bool,

    /// Percentage of caves holding treasure
    #[arg(long, default_value_t = 30)]
    treasure_percentage: u32,

    /// Percentage of caves holding an Otyugh
    #[arg(long, default_value_t = 10)]
    monster_percentage: u32,

    /// Percentage of caves holding arrows
    #[arg(long, default_value_t = 30)]
    weapon_percentage: u32,

    /// Percentage of caves hiding a pit
    #[arg(long, default_value_t = 5)]
    pit_percentage: u32,

    /// Percentage of locations hiding a thief
    #[arg(long, default_value_t = 5)]
    thief_percentage: u32,

    /// Percentage of locations hosting a Beholder
    #[arg(long, default_value_t = 5)]
    patrol_monster_percentage: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> WarrenResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    info!("Starting Warren v{}", warren::VERSION);

    let config = load_config(&args)?;
    config.validate()?;

    let dungeon = build_world(&config, args.seed)?;
    println!("\nInitializing dungeon...");
    println!("Start: {} -> End: {}\n", dungeon.start(), dungeon.goal());
    println!("Starting game...");
    play(dungeon)
}

fn load_config(args: &Args) -> WarrenResult<DungeonConfig> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }
    Ok(DungeonConfig {
        rows: args.rows,
        columns: args.columns,
        interconnectivity: args.interconnectivity,
        wrapping: args.wrapping,
        treasure_percentage: args.treasure_percentage,
        monster_percentage: args.monster_percentage,
        weapon_percentage: args.weapon_percentage,
        pit_percentage: args.pit_percentage,
        thief_percentage: args.thief_percentage,
        patrol_monster_percentage: args.patrol_monster_percentage,
    })
}

/// Builds a world, retrying when a maze happens to admit no legal
/// start/goal pair.
fn build_world(config: &DungeonConfig, seed: Option<u64>) -> WarrenResult<Dungeon> {
    const ATTEMPTS: u64 = 20;
    for attempt in 0..ATTEMPTS {
        let result = match seed {
            Some(s) => Dungeon::new(config.clone(), s.wrapping_add(attempt)),
            None => Dungeon::with_random_source(config.clone(), SeededRandom::from_entropy()),
        };
        match result {
            Err(WarrenError::InvalidState(reason)) => {
                warn!("world rejected: {}", reason);
            }
            other => return other,
        }
    }
    Err(WarrenError::GenerationFailed(format!(
        "no legal world found in {} attempts",
        ATTEMPTS
    )))
}

fn play(mut dungeon: Dungeon) -> WarrenResult<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        describe(&dungeon);
        let Some(command) = prompt(&mut lines, "Do you decide to move, pickup or shoot (M/P/S)? ")?
        else {
            break;
        };
        match command.to_lowercase().as_str() {
            "m" => {
                let Some(reply) = prompt(&mut lines, "Which direction do you choose (N/E/S/W)? ")?
                else {
                    break;
                };
                match reply.parse::<Direction>() {
                    Ok(direction) => {
                        if !handle_move(&mut dungeon, direction)? {
                            break;
                        }
                    }
                    Err(_) => println!("Invalid input! Please try again!"),
                }
            }
            "p" => pick_up(&mut dungeon, &mut lines)?,
            "s" => {
                let Some(reply) = prompt(&mut lines, "Choose bow draw power (1-5): ")? else {
                    break;
                };
                let Ok(power) = reply.parse::<u32>() else {
                    println!("Invalid input! Please try again!");
                    continue;
                };
                let Some(reply) = prompt(&mut lines, "Which direction do you shoot (N/E/S/W)? ")?
                else {
                    break;
                };
                let Ok(direction) = reply.parse::<Direction>() else {
                    println!("Invalid input! Please try again!");
                    continue;
                };
                match dungeon.shoot(WeaponKind::CrookedArrow, power, direction) {
                    Ok(outcome) => println!("{}", outcome),
                    Err(WarrenError::InvalidArgument(reason)) => {
                        println!("{}! Please try again!", reason)
                    }
                    Err(other) => return Err(other),
                }
            }
            "q" => {
                println!("Game quit unexpectedly!");
                return Ok(());
            }
            _ => println!("Invalid input! Please try again!"),
        }
        println!(
            "\nPlayer is at {} with treasures {:?} and {} arrows",
            dungeon.player_position(),
            dungeon.player().treasures(),
            dungeon.player().arrows_left()
        );
        if dungeon.is_goal_reached() {
            break;
        }
    }
    Ok(())
}

/// Applies a move and narrates the outcome. Returns `false` when the game
/// is over (victory, or death with no health left).
fn handle_move(dungeon: &mut Dungeon, direction: Direction) -> WarrenResult<bool> {
    match dungeon.move_player(direction) {
        MoveOutcome::Blocked => {
            println!("You walk into a wall; no passage leads {}", direction);
            Ok(true)
        }
        MoveOutcome::Moved(encounter) => {
            if encounter != Encounter::None {
                println!("{}", encounter);
            }
            if encounter == Encounter::ReachedGoal {
                return Ok(false);
            }
            if encounter.is_fatal() {
                match dungeon.reset_player() {
                    Ok(()) => {
                        println!(
                            "You wake at the start with {} health left",
                            dungeon.player().health()
                        );
                        Ok(true)
                    }
                    Err(WarrenError::InvalidState(_)) => {
                        println!("You are out of health! Better luck next time");
                        Ok(false)
                    }
                    Err(other) => Err(other),
                }
            } else {
                Ok(true)
            }
        }
    }
}

fn pick_up(
    dungeon: &mut Dungeon,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> WarrenResult<()> {
    if dungeon.current_location().has_treasure() {
        let Some(reply) = prompt(lines, "Which treasure do you take? ")? else {
            return Ok(());
        };
        match reply.parse::<usize>() {
            Ok(index) if index >= 1 => match dungeon.pick_treasure(index - 1) {
                Ok(true) => println!("Taken!"),
                Ok(false) => println!("Your bag is full!"),
                Err(_) => println!("Invalid input! Please try again!"),
            },
            _ => println!("Invalid input! Please try again!"),
        }
    } else {
        println!("There are no treasures here!");
    }
    if dungeon.current_location().has_weapon() {
        let Some(reply) = prompt(lines, "Which weapon do you take? ")? else {
            return Ok(());
        };
        match reply.parse::<usize>() {
            Ok(index) if index >= 1 => match dungeon.pick_weapon(index - 1) {
                Ok(true) => println!("Taken!"),
                Ok(false) => println!("Your bag is full!"),
                Err(_) => println!("Invalid input! Please try again!"),
            },
            _ => println!("Invalid input! Please try again!"),
        }
    } else {
        println!("There are no weapons here!");
    }
    Ok(())
}

fn describe(dungeon: &Dungeon) {
    let location = dungeon.current_location();
    let kind = match location.kind() {
        LocationKind::Junction => "cave",
        LocationKind::Corridor => "tunnel",
    };
    println!("\nYou are in a {}", kind);
    if location.has_treasure() {
        let listing: Vec<String> = location
            .treasures()
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}: {}", i + 1, t))
            .collect();
        println!("Treasures available: [{}]", listing.join(", "));
    }
    if location.has_weapon() {
        let listing: Vec<String> = location
            .weapons()
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{}: {}", i + 1, w))
            .collect();
        println!("Weapons available: [{}]", listing.join(", "));
    }
    if dungeon.strong_monster_scent() {
        println!("You smell something very pungent nearby");
    } else if dungeon.faint_monster_scent() {
        println!("You smell something slightly pungent nearby");
    }
    if dungeon.damp_earth_scent() {
        println!("You smell damp earth nearby");
    }
    let doors: Vec<String> = dungeon
        .valid_directions()
        .iter()
        .map(|d| d.to_string())
        .collect();
    println!("Doors lead to [{}]", doors.join(", "));
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    question: &str,
) -> WarrenResult<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
