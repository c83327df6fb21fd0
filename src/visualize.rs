use std::fmt::Write;

use crate::color::{PLAYER_COUNT, TOTAL_ROUNDS};
use crate::game::GameSession;
use crate::round::{RoundInput, ScoreVector};
use crate::score::round_multiplier;
use crate::state::GameStatus;

/// Customize scoreboard rendering for the CLI.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Show rows for rounds that have not been played yet.
    pub show_pending_rounds: bool,
    /// Add a running total column per player.
    pub show_running_totals: bool,
    pub column_width: usize,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_pending_rounds: true,
            show_running_totals: false,
            column_width: 10,
        }
    }
}

/// Cumulative totals after each played round.
pub fn running_totals(session: &GameSession) -> Vec<ScoreVector> {
    let mut acc = [0i64; PLAYER_COUNT];
    session
        .scores()
        .iter()
        .take(session.rounds_played())
        .map(|row| {
            for (sum, delta) in acc.iter_mut().zip(row) {
                *sum = sum.saturating_add(*delta);
            }
            acc
        })
        .collect()
}

pub fn render_scoreboard(session: &GameSession) -> String {
    render_scoreboard_with_options(session, VisualOptions::default())
}

pub fn render_scoreboard_with_options(session: &GameSession, options: VisualOptions) -> String {
    let mut out = String::new();
    let width = options.column_width.max(4);
    match session.status() {
        GameStatus::Setup => {
            let _ = writeln!(out, "No game in progress. Enter four player names to start.");
            return out;
        }
        GameStatus::Playing => {
            let _ = writeln!(
                out,
                "Round {} of {}{}",
                session.current_round(),
                TOTAL_ROUNDS,
                if session.current_round() == TOTAL_ROUNDS {
                    " (final round, x10)"
                } else {
                    ""
                }
            );
        }
        GameStatus::Finished => {
            let _ = writeln!(out, "Game over after {TOTAL_ROUNDS} rounds");
        }
    }

    let _ = write!(out, "{:<7}", "Round");
    for name in session.players() {
        let _ = write!(out, "{:>width$}", truncate(name, width - 1));
    }
    let _ = writeln!(out);

    let running = running_totals(session);
    let played = session.rounds_played();
    for (idx, row) in session.scores().iter().enumerate() {
        let round = idx + 1;
        if round > played && !options.show_pending_rounds {
            break;
        }
        let marker = if session.status() == GameStatus::Playing && round == session.current_round()
        {
            ">"
        } else {
            " "
        };
        let _ = write!(out, "{marker}{round:<6}");
        for (player, delta) in row.iter().enumerate() {
            if round > played {
                let _ = write!(out, "{:>width$}", "-");
            } else if options.show_running_totals {
                let cell = format!("{delta} ({})", running[idx][player]);
                let _ = write!(out, "{cell:>width$}");
            } else {
                let _ = write!(out, "{delta:>width$}");
            }
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "{:<7}", "Total");
    for total in session.totals() {
        let _ = write!(out, "{total:>width$}");
    }
    let _ = writeln!(out);
    out
}

/// One-line confirmation shown after a round is saved.
pub fn describe_round(
    session: &GameSession,
    round: usize,
    input: &RoundInput,
    deltas: &ScoreVector,
) -> String {
    let winner = session
        .player_name(input.winner)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Player {}", input.winner));
    let mut flags = Vec::new();
    if input.winner_is_double {
        flags.push("double");
    }
    if input.winner_threw_joker {
        flags.push("threw the joker");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    };
    let mult = round_multiplier(round);
    let boost = if mult > 1 {
        format!(", x{mult} final round")
    } else {
        String::new()
    };
    let deltas = deltas
        .iter()
        .enumerate()
        .map(|(player, delta)| {
            let name = session.player_name(player).unwrap_or("?");
            format!("{name} {delta:+}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Round {round} saved: {winner} won this hand{flags} with {}{boost}. {deltas}",
        input.color
    )
}

/// Final results screen: winner first, then everyone by total.
pub fn render_results(session: &GameSession) -> String {
    let mut out = String::new();
    let Some(winner) = session.winner() else {
        let _ = writeln!(out, "No results yet.");
        return out;
    };
    if !session.is_finished() {
        let _ = writeln!(
            out,
            "Game still running ({} of {} rounds played). Current standings:",
            session.rounds_played(),
            TOTAL_ROUNDS
        );
    } else {
        let name = session.player_name(winner).unwrap_or("?");
        let _ = writeln!(out, "Game over! Winner: {name}");
        let _ = writeln!(out, "  {} points", session.total_score(winner));
    }
    for (rank, row) in session.standings().iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<20} {:>8}", rank + 1, row.name, row.total);
    }
    out
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max).collect()
    }
}
