//! turn-replay: set up GRAVWELL games and resolve turns from JSON files.
//!
//! Usage:
//!   turn-replay setup --players Alpha,Bravo --seed 7 --output game.json
//!   turn-replay resolve --state game.json --submission turn.json --output next.json
//!   turn-replay replay --state game.json --turns turns.json
//!   turn-replay preview --state game.json --player 1 --weapon railgun

use std::path::{Path, PathBuf};
use std::process;

use serde::Serialize;

use gravwell_core::actions::TurnSubmission;
use gravwell_core::config::RulesConfig;
use gravwell_core::enums::WeaponType;
use gravwell_core::state::GameState;
use gravwell_core::types::{PlayerId, Position};
use gravwell_sim::preview;
use gravwell_sim::world_setup::{setup_game, standard_world};
use gravwell_sim::{SimConfig, TurnResolver, TurnResult};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "setup" => cmd_setup(&args[2..]),
        "resolve" => cmd_resolve(&args[2..]),
        "replay" => cmd_replay(&args[2..]),
        "preview" => cmd_preview(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "turn-replay: GRAVWELL turn resolution tool\n\
         \n\
         Commands:\n\
         \n\
         setup     Create a new game on the standard board\n\
         \n\
           --players <a,b,..> Player names in turn order (ids assigned from 1)\n\
           --seed <N>         RNG seed for starting sectors (default: 42)\n\
           --game-id <id>     Game id (default: game)\n\
           --rules <path>     Rules JSON (optional, defaults otherwise)\n\
           --output <path>    Write the state here instead of stdout\n\
         \n\
         resolve   Resolve one turn submission against a state\n\
         \n\
           --state <path>       Game state JSON\n\
           --submission <path>  Turn submission JSON\n\
           --rules <path>       Rules JSON (optional)\n\
           --output <path>      Write the next state here instead of stdout\n\
         \n\
         replay    Resolve a JSON array of submissions in order\n\
         \n\
           --state <path>     Starting game state JSON\n\
           --turns <path>     Submissions JSON array\n\
           --rules <path>     Rules JSON (optional)\n\
           --output <path>    Write the final state here instead of stdout\n\
         \n\
         preview   Firing solutions from a player's current position\n\
         \n\
           --state <path>     Game state JSON\n\
           --player <id>      Attacking player\n\
           --weapon <name>    laser | railgun\n\
           --rules <path>     Rules JSON (optional)\n\
         \n\
         A rejected turn prints its errors and exits with status 2.\n"
    );
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    parse_flag(args, flag).map(PathBuf::from)
}

fn require_path(args: &[String], flag: &str) -> PathBuf {
    match parse_path(args, flag) {
        Some(p) => p,
        None => {
            eprintln!("Error: {flag} <path> is required");
            process::exit(1);
        }
    }
}

fn load_rules(args: &[String]) -> RulesConfig {
    let Some(path) = parse_path(args, "--rules") else {
        return RulesConfig::default();
    };
    match RulesConfig::load(&path) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error loading rules: {e}");
            process::exit(1);
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> T {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {what} {}: {e}", path.display());
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error parsing {what} {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<PathBuf>) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    };
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("Error writing {}: {e}", path.display());
                process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
}

fn resolve_or_exit(resolver: &TurnResolver, state: &GameState, submission: &TurnSubmission) -> TurnResult {
    match resolver.resolve_submission(state, submission) {
        Ok(result) => result,
        Err(fault) => {
            eprintln!("Fault: {fault}");
            process::exit(1);
        }
    }
}

// --- Setup command ---

fn cmd_setup(args: &[String]) {
    let names: Vec<String> = match parse_flag(args, "--players") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect(),
        None => {
            eprintln!("Error: --players <a,b,..> is required");
            process::exit(1);
        }
    };
    let seed = parse_flag(args, "--seed")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(SimConfig::default().seed);
    let game_id = parse_flag(args, "--game-id").unwrap_or("game");

    let config = SimConfig {
        seed,
        rules: load_rules(args),
    };
    let players: Vec<(PlayerId, String)> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (i as PlayerId + 1, name))
        .collect();

    let world = standard_world();
    let state = match setup_game(&world, &config, game_id, &players) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error setting up game: {e}");
            process::exit(1);
        }
    };
    log::info!("game {game_id} set up with {} player(s), seed {seed}", players.len());
    write_json(&state, parse_path(args, "--output"));
}

// --- Resolve command ---

fn cmd_resolve(args: &[String]) {
    let state: GameState = read_json(&require_path(args, "--state"), "state");
    let submission: TurnSubmission = read_json(&require_path(args, "--submission"), "submission");
    let resolver = TurnResolver::standard(load_rules(args));

    match resolve_or_exit(&resolver, &state, &submission) {
        TurnResult::Resolved(turn) => {
            for event in &turn.events {
                eprintln!("  {event:?}");
            }
            write_json(&turn.state, parse_path(args, "--output"));
        }
        TurnResult::Rejected(turn) => {
            eprintln!("Turn rejected:");
            for error in &turn.errors {
                eprintln!("  {error}");
            }
            process::exit(2);
        }
    }
}

// --- Replay command ---

fn cmd_replay(args: &[String]) {
    let mut state: GameState = read_json(&require_path(args, "--state"), "state");
    let turns: Vec<TurnSubmission> = read_json(&require_path(args, "--turns"), "turns");
    let resolver = TurnResolver::standard(load_rules(args));

    for (i, submission) in turns.iter().enumerate() {
        match resolve_or_exit(&resolver, &state, submission) {
            TurnResult::Resolved(turn) => {
                eprintln!(
                    "#{:<3} player {} -> {} event(s)",
                    i + 1,
                    submission.player_id,
                    turn.events.len()
                );
                state = turn.state;
            }
            TurnResult::Rejected(turn) => {
                eprintln!("#{:<3} player {} rejected:", i + 1, submission.player_id);
                for error in &turn.errors {
                    eprintln!("  {error}");
                }
                write_json(&state, parse_path(args, "--output"));
                process::exit(2);
            }
        }
    }
    write_json(&state, parse_path(args, "--output"));
}

// --- Preview command ---

#[derive(Serialize)]
struct PreviewRow {
    target_id: PlayerId,
    target_position: Position,
    in_range: bool,
    wrong_facing: bool,
    requires_engines: bool,
    ring_distance: u32,
    sector_distance: u32,
}

fn cmd_preview(args: &[String]) {
    let state: GameState = read_json(&require_path(args, "--state"), "state");
    let player_id = match parse_flag(args, "--player").and_then(|s| s.parse::<PlayerId>().ok()) {
        Some(id) => id,
        None => {
            eprintln!("Error: --player <id> is required");
            process::exit(1);
        }
    };
    let weapon = match parse_flag(args, "--weapon") {
        Some("laser") => WeaponType::Laser,
        Some("railgun") => WeaponType::Railgun,
        Some(other) => {
            eprintln!("Error: unknown weapon {other} (laser | railgun)");
            process::exit(1);
        }
        None => {
            eprintln!("Error: --weapon <name> is required");
            process::exit(1);
        }
    };
    let resolver = TurnResolver::standard(load_rules(args));

    let solutions = preview::projected_posture(resolver.world(), resolver.rules(), &state, player_id, &[], 0)
        .and_then(|posture| {
            preview::range_preview(resolver.world(), resolver.rules(), &state, player_id, weapon, &posture)
        });
    let solutions = match solutions {
        Ok(s) => s,
        Err(fault) => {
            eprintln!("Fault: {fault}");
            process::exit(1);
        }
    };

    let rows: Vec<PreviewRow> = solutions
        .iter()
        .filter_map(|s| {
            let target = state.ship(s.target_id)?;
            Some(PreviewRow {
                target_id: s.target_id,
                target_position: target.position,
                in_range: s.in_range,
                wrong_facing: s.wrong_facing,
                requires_engines: s.requires_engines,
                ring_distance: s.ring_distance,
                sector_distance: s.sector_distance,
            })
        })
        .collect();
    write_json(&rows, None);
}
