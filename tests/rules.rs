use okeyscore::{
    Color, GameError, GameSession, GameStatus, LoserEntry, PLAYER_COUNT, PlayerId, RoundInput,
    TOTAL_ROUNDS,
};

fn table() -> [String; PLAYER_COUNT] {
    ["Ayşe", "Mehmet", "Zeynep", "Can"].map(String::from)
}

fn round_with_scores(winner: PlayerId, color: Color, scores: [i64; PLAYER_COUNT]) -> RoundInput {
    let mut input = RoundInput::new(winner, color);
    for (seat, score) in scores.iter().enumerate() {
        if seat != winner {
            input = input.with_loser(seat, *score);
        }
    }
    input
}

fn column_sums(session: &GameSession) -> Vec<i64> {
    (0..PLAYER_COUNT)
        .map(|p| session.scores().iter().map(|row| row[p]).sum())
        .collect()
}

#[test]
fn full_game_finishes_on_round_eleven() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    for played in 0..TOTAL_ROUNDS {
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.current_round(), played + 1);
        session.log_round(&round_with_scores(played % PLAYER_COUNT, Color::Red, [7; 4]))?;
    }
    assert_eq!(session.status(), GameStatus::Finished);
    assert_eq!(session.current_round(), TOTAL_ROUNDS);
    assert_eq!(session.rounds_played(), TOTAL_ROUNDS);
    Ok(())
}

#[test]
fn finished_game_rejects_more_rounds() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    for _ in 0..TOTAL_ROUNDS {
        session.log_round(&round_with_scores(0, Color::Blue, [0; 4]))?;
    }
    let before = session.clone();
    let err = session
        .log_round(&round_with_scores(0, Color::Blue, [0; 4]))
        .unwrap_err();
    assert!(matches!(err, GameError::NotPlaying));
    assert_eq!(session, before);
    Ok(())
}

#[test]
fn totals_match_column_sums_every_round() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    assert_eq!(session.totals(), vec![0; PLAYER_COUNT]);
    let colors = Color::ALL;
    for round in 0..TOTAL_ROUNDS {
        let winner = (round * 3) % PLAYER_COUNT;
        let scores = [
            (round as i64 * 13) % 90,
            (round as i64 * 7) % 60,
            (round as i64 * 29) % 120,
            (round as i64 * 5) % 40,
        ];
        let mut input = round_with_scores(winner, colors[round % colors.len()], scores);
        if round % 4 == 1 {
            input = input.winner_double();
        }
        session.log_round(&input)?;
        let sums = column_sums(&session);
        for player in 0..PLAYER_COUNT {
            assert_eq!(session.total_score(player), sums[player]);
        }
        assert_eq!(session.totals(), sums);
    }
    Ok(())
}

#[test]
fn final_round_is_worth_ten_times() -> Result<(), GameError> {
    let input = RoundInput::new(1, Color::Black)
        .with_loser(0, 12)
        .with_loser_entry(2, LoserEntry::new(40).double())
        .with_loser_entry(3, LoserEntry::default().returning_to_okey())
        .winner_joker();

    let mut session = GameSession::new();
    session.start_game(table());
    let first = session.log_round(&input)?;
    for _ in 1..TOTAL_ROUNDS - 1 {
        session.log_round(&input)?;
    }
    let last = session.log_round(&input)?;
    for seat in 0..PLAYER_COUNT {
        assert_eq!(last[seat], first[seat] * 10);
    }
    assert_eq!(session.scores()[TOTAL_ROUNDS - 1], last);
    Ok(())
}

#[test]
fn reset_matches_fresh_session() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    session.log_round(&round_with_scores(2, Color::Star, [30, 40, 0, 50]))?;
    session.reset_game();
    assert_eq!(session, GameSession::new());
    assert_eq!(session.state(), GameSession::new().state());
    assert!(session.players().is_empty());
    assert!(session.scores().is_empty());
    assert_eq!(session.current_round(), 1);
    assert_eq!(session.winner(), None);
    Ok(())
}

#[test]
fn restarting_clears_previous_scores() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    session.log_round(&round_with_scores(0, Color::Yellow, [0, 80, 80, 80]))?;
    session.start_game(["W", "X", "Y", "Z"].map(String::from));
    assert_eq!(session.current_round(), 1);
    assert_eq!(session.totals(), vec![0; PLAYER_COUNT]);
    assert_eq!(session.players()[0], "W");
    Ok(())
}

#[test]
fn lowest_total_wins_the_game() -> Result<(), GameError> {
    let mut session = GameSession::new();
    session.start_game(table());
    // Seat 3 wins most rounds; seat 1 wins only the final one.
    for _ in 0..TOTAL_ROUNDS - 1 {
        session.log_round(&round_with_scores(3, Color::Blue, [20, 20, 20, 0]))?;
    }
    session.log_round(&round_with_scores(1, Color::Blue, [20, 0, 20, 20]))?;
    // Seat 3: 10 * -100 + 20*5*10 = 0; seat 1: 10 * 100 - 1000 = 0; seat 0: 10*100 + 1000
    assert_eq!(session.total_score(3), 0);
    assert_eq!(session.total_score(1), 0);
    assert_eq!(session.winner(), Some(1));
    let standings = session.standings();
    assert_eq!(standings[0].name, "Mehmet");
    assert_eq!(standings[1].name, "Can");
    Ok(())
}
