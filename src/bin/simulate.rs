use std::error::Error;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use okeyscore::logging::init_tracing;
use okeyscore::{
    Color, Config, GameSession, LoserEntry, MAX_TILE_SCORE, MemoryStore, PLAYER_COUNT,
    RoundInput, describe_round, load_or_default, render_results,
    render_scoreboard, save_session,
};

const DEFAULT_SEED: u64 = 0x0CE7_5EED_0CE7_5EED;
const TABLE: [&str; PLAYER_COUNT] = ["Ayşe", "Mehmet", "Zeynep", "Can"];

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play random Saddam okey games through the score sheet."
)]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// RNG seed for round outcomes
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print every round and the score sheet
    #[arg(long = "visualize")]
    visualize: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::resolve(None, args.verbose);
    init_tracing(&config.log_filter);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut wins = [0usize; PLAYER_COUNT];
    for game in 0..args.games {
        let mut store = MemoryStore::new();
        let mut session = load_or_default(&store);
        session.start_game(TABLE.map(String::from));
        save_session(&mut store, &session)?;

        while !session.is_finished() {
            let round = session.current_round();
            let input = random_round(&mut rng);
            input.validate()?;
            let deltas = session.log_round(&input)?;
            save_session(&mut store, &session)?;
            if args.visualize {
                println!("{}", describe_round(&session, round, &input, &deltas));
            }
        }

        // Whatever was persisted must rehydrate to the same sheet.
        let reloaded: GameSession = load_or_default(&store);
        if reloaded != session {
            return Err(format!("game {game}: stored session does not match").into());
        }
        if args.visualize {
            print!("{}", render_scoreboard(&session));
        }
        print!("{}", render_results(&session));
        if let Some(winner) = session.winner() {
            wins[winner] += 1;
        }
        debug!(game, totals = ?session.totals(), "game complete");
    }

    if args.games > 1 {
        println!("\nWins by seat over {} games:", args.games);
        for (seat, count) in wins.iter().enumerate() {
            println!("  {:<8} {count}", TABLE[seat]);
        }
    }
    Ok(())
}

/// Random but valid round outcome.
fn random_round(rng: &mut StdRng) -> RoundInput {
    let winner = rng.gen_range(0..PLAYER_COUNT);
    let color = *Color::ALL.choose(rng).unwrap_or(&Color::Blue);
    let mut input = RoundInput::new(winner, color);
    input.winner_is_double = rng.gen_bool(0.15);
    input.winner_threw_joker = rng.gen_bool(0.1);
    for seat in (0..PLAYER_COUNT).filter(|&s| s != winner) {
        let mut entry = LoserEntry::new(rng.gen_range(0..=MAX_TILE_SCORE / 4));
        entry.is_double = rng.gen_bool(0.1);
        entry.returns_to_okey = rng.gen_bool(0.05);
        input = input.with_loser_entry(seat, entry);
    }
    input
}
