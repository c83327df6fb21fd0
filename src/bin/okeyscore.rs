use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use plotters::prelude::*;
use plotters::style::Color as _;
use tracing::info;

use okeyscore::logging::init_tracing;
use okeyscore::visualize::render_scoreboard_with_options;
use okeyscore::{
    Color, Config, FileStore, GameSession, GameStatus, PLAYER_COUNT, RoundDraft, RoundInput,
    SessionStore, TOTAL_ROUNDS, VisualOptions, describe_round, load_or_default,
    parse_loser_spec, render_results, render_scoreboard, running_totals, save_session,
    validate_player_names,
};

#[derive(Parser, Debug)]
#[command(name = "okeyscore", about = "Score sheet for four-player Saddam okey.")]
struct Args {
    /// Session file (defaults to $OKEYSCORE_STATE, then ./skor-arkadasi-storage.json)
    #[arg(long = "state", global = true)]
    state: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game with four player names (seat order)
    Start { names: Vec<String> },
    /// Record the current round
    Log {
        /// Seat (0-3) of the player who finished
        #[arg(short = 'w', long = "winner")]
        winner: usize,
        /// Round color: blue, red, yellow, black or star (or its coefficient)
        #[arg(short = 'c', long = "color")]
        color: Color,
        /// Winner finished with doubles
        #[arg(long = "winner-double")]
        winner_double: bool,
        /// Winner finished by throwing the joker
        #[arg(long = "winner-joker")]
        winner_joker: bool,
        /// Loser entry: seat=score[,double][,okey]; repeat for every loser
        #[arg(short = 'l', long = "loser")]
        losers: Vec<String>,
    },
    /// Print the score sheet
    Show {
        /// Include running totals next to each round
        #[arg(long = "running")]
        running: bool,
    },
    /// Print the results table
    Results,
    /// Clear the session back to setup
    Reset,
    /// Plot cumulative totals per round to a PNG file
    Chart {
        #[arg(short = 'o', long = "out", default_value = "standings.png")]
        out: PathBuf,
    },
    /// Interactive prompt (default when no command is given)
    Play,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::resolve(args.state, args.verbose);
    init_tracing(&config.log_filter);
    info!(path = %config.state_path.display(), "using session file");

    let mut store = FileStore::new(&config.state_path);
    let mut session = load_or_default(&store);

    match args.command.unwrap_or(Command::Play) {
        Command::Start { names } => {
            let names = validate_player_names(&names[..])?;
            session.start_game(names);
            save_session(&mut store, &session)?;
            println!("Game started. Good luck!");
            print!("{}", render_scoreboard(&session));
        }
        Command::Log {
            winner,
            color,
            winner_double,
            winner_joker,
            losers,
        } => {
            let mut draft = RoundDraft {
                winner: Some(winner),
                color: Some(color),
                winner_is_double: winner_double,
                winner_threw_joker: winner_joker,
                ..RoundDraft::default()
            };
            for spec in &losers {
                let (seat, entry) = parse_loser_spec(spec)?;
                let slot = draft
                    .losers
                    .get_mut(seat)
                    .ok_or_else(|| format!("seat {seat} is not at the table"))?;
                *slot = Some(entry);
            }
            let input = draft.finish()?;
            log_and_save(&mut session, &mut store, &input)?;
        }
        Command::Show { running } => {
            let options = VisualOptions {
                show_running_totals: running,
                ..VisualOptions::default()
            };
            print!("{}", render_scoreboard_with_options(&session, options));
        }
        Command::Results => print!("{}", render_results(&session)),
        Command::Reset => {
            session.reset_game();
            save_session(&mut store, &session)?;
            println!("Game reset.");
        }
        Command::Chart { out } => {
            if session.rounds_played() == 0 {
                return Err("no rounds recorded yet".into());
            }
            render_progress_chart(&out, &session)?;
            println!("Chart written to {}", out.display());
        }
        Command::Play => play(&mut session, &mut store)?,
    }
    Ok(())
}

fn log_and_save(
    session: &mut GameSession,
    store: &mut impl SessionStore,
    input: &RoundInput,
) -> Result<(), Box<dyn Error>> {
    let round = session.current_round();
    let deltas = session.log_round(input)?;
    save_session(store, session)?;
    println!("{}", describe_round(session, round, input, &deltas));
    if session.is_finished() {
        print!("{}", render_results(session));
    }
    Ok(())
}

/// Prompt loop that follows the session through setup, play and results.
fn play(session: &mut GameSession, store: &mut impl SessionStore) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("Type 'q' at any prompt to quit, 'reset' to start over.");
    loop {
        let step = match session.status() {
            GameStatus::Setup => prompt_names(&mut lines)?.map(|names| {
                session.start_game(names);
                println!("Game started. Good luck!");
            }),
            GameStatus::Playing => {
                println!("\n{}", render_scoreboard(session));
                match prompt_round(&mut lines, session)? {
                    Some(Prompted::Round(input)) => {
                        if let Err(err) = log_and_save(session, store, &input) {
                            println!("Could not save round: {err}");
                        }
                        continue;
                    }
                    Some(Prompted::Reset) => {
                        session.reset_game();
                        println!("Game reset.");
                        Some(())
                    }
                    None => None,
                }
            }
            GameStatus::Finished => {
                print!("{}", render_results(session));
                match ask(&mut lines, "Start a new game? [y/N]: ")? {
                    Some(answer) if is_yes(&answer) => {
                        session.reset_game();
                        Some(())
                    }
                    _ => None,
                }
            }
        };
        if step.is_none() {
            println!("Bye.");
            return Ok(());
        }
        save_session(store, session)?;
    }
}

enum Prompted {
    Round(RoundInput),
    Reset,
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn ask(lines: &mut Lines<'_>, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes" | "e" | "evet")
}

fn prompt_names(lines: &mut Lines<'_>) -> io::Result<Option<[String; PLAYER_COUNT]>> {
    loop {
        let mut names = Vec::with_capacity(PLAYER_COUNT);
        for seat in 0..PLAYER_COUNT {
            let Some(name) = ask(lines, &format!("Player {} name: ", seat + 1))? else {
                return Ok(None);
            };
            names.push(name);
        }
        match validate_player_names(&names[..]) {
            Ok(valid) => return Ok(Some(valid)),
            Err(err) => println!("{err}. Please try again."),
        }
    }
}

fn prompt_round(lines: &mut Lines<'_>, session: &GameSession) -> io::Result<Option<Prompted>> {
    loop {
        for (seat, name) in session.players().iter().enumerate() {
            println!("  [{seat}] {name}");
        }
        let Some(answer) = ask(lines, "Winner seat: ")? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("reset") {
            return Ok(Some(Prompted::Reset));
        }
        let mut draft = RoundDraft::new();
        draft.winner = answer.parse().ok();

        let colors = Color::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let Some(answer) = ask(lines, &format!("Color [{colors}]: "))? else {
            return Ok(None);
        };
        draft.color = answer.parse().ok();

        let Some(answer) = ask(lines, "Winner finished double? [y/N]: ")? else {
            return Ok(None);
        };
        draft.winner_is_double = is_yes(&answer);
        let Some(answer) = ask(lines, "Winner threw the joker? [y/N]: ")? else {
            return Ok(None);
        };
        draft.winner_threw_joker = is_yes(&answer);

        if let Some(winner) = draft.winner.filter(|&w| w < PLAYER_COUNT) {
            for seat in (0..PLAYER_COUNT).filter(|&s| s != winner) {
                let name = session.player_name(seat).unwrap_or("?");
                let Some(answer) = ask(
                    lines,
                    &format!("{name}: penalty[,double][,okey]: "),
                )?
                else {
                    return Ok(None);
                };
                match parse_loser_spec(&format!("{seat}={answer}")) {
                    Ok((_, entry)) => draft.losers[seat] = Some(entry),
                    Err(err) => println!("  {err}"),
                }
            }
        }

        match draft.finish() {
            Ok(input) => return Ok(Some(Prompted::Round(input))),
            Err(err) => println!("Round not saved: {err}. Please enter it again."),
        }
    }
}

fn render_progress_chart(out: &Path, session: &GameSession) -> Result<(), Box<dyn Error>> {
    let running = running_totals(session);
    let (min, max) = running
        .iter()
        .flatten()
        .fold((0i64, 0i64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let pad = ((max - min) / 10).max(10);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Running totals (lower is better)", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0usize..TOTAL_ROUNDS, (min - pad)..(max + pad))
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .x_desc("Round")
        .y_desc("Points")
        .x_labels(TOTAL_ROUNDS + 1)
        .draw()
        .map_err(|e| format!("{e}"))?;

    let palette = [BLUE, RED, GREEN, BLACK];
    for (seat, name) in session.players().iter().enumerate() {
        let color = palette[seat % palette.len()];
        let points = std::iter::once((0usize, 0i64))
            .chain(running.iter().enumerate().map(|(idx, row)| (idx + 1, row[seat])));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(|e| format!("{e}"))?
            .label(name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| format!("{e}"))?;

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
