use proptest::prelude::*;

use okeyscore::score::{round_multiplier, winner_finish_multiplier};
use okeyscore::{
    Color, GameSession, LoserEntry, MAX_TILE_SCORE, PLAYER_COUNT, RoundInput, TOTAL_ROUNDS,
    score_round,
};

fn any_color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn loser_entry() -> impl Strategy<Value = LoserEntry> {
    (0..=MAX_TILE_SCORE, any::<bool>(), any::<bool>()).prop_map(
        |(score, is_double, returns_to_okey)| LoserEntry {
            score,
            is_double,
            returns_to_okey,
        },
    )
}

fn round_input() -> impl Strategy<Value = RoundInput> {
    (
        0..PLAYER_COUNT,
        any_color(),
        prop::array::uniform4(loser_entry()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(winner, color, entries, double, joker)| {
            let mut input = RoundInput::new(winner, color);
            for (seat, entry) in entries.into_iter().enumerate() {
                if seat != winner {
                    input = input.with_loser_entry(seat, entry);
                }
            }
            input.winner_is_double = double;
            input.winner_threw_joker = joker;
            input
        })
}

proptest! {
    #[test]
    fn scoring_is_deterministic(input in round_input(), round in 1..=TOTAL_ROUNDS) {
        prop_assert_eq!(score_round(round, &input), score_round(round, &input.clone()));
    }

    #[test]
    fn winner_gains_and_losers_pay(input in round_input(), round in 1..=TOTAL_ROUNDS) {
        let deltas = score_round(round, &input);
        prop_assert!(deltas[input.winner] < 0);
        for seat in input.loser_ids() {
            prop_assert!(deltas[seat] >= 0);
        }
    }

    #[test]
    fn final_round_is_ten_times_any_other(input in round_input(), round in 1..TOTAL_ROUNDS) {
        let normal = score_round(round, &input);
        let last = score_round(TOTAL_ROUNDS, &input);
        for seat in 0..PLAYER_COUNT {
            prop_assert_eq!(last[seat], normal[seat] * 10);
        }
    }

    #[test]
    fn empty_racks_cost_nothing(
        winner in 0..PLAYER_COUNT,
        color in any_color(),
        double in any::<bool>(),
        joker in any::<bool>(),
        round in 1..=TOTAL_ROUNDS,
    ) {
        let mut input = RoundInput::new(winner, color);
        input.winner_is_double = double;
        input.winner_threw_joker = joker;
        let deltas = score_round(round, &input);

        let base = if joker { -200 } else { -100 };
        let base = if double { base * color.coefficient() } else { base };
        prop_assert_eq!(deltas[winner], base * round_multiplier(round));
        for seat in input.loser_ids() {
            prop_assert_eq!(deltas[seat], 0);
        }
    }

    #[test]
    fn loser_penalty_scales_with_winner_finish(
        entry in loser_entry(),
        color in any_color(),
        double in any::<bool>(),
        joker in any::<bool>(),
    ) {
        let plain = score_round(1, &RoundInput::new(0, color).with_loser_entry(1, entry));
        let mut flagged = RoundInput::new(0, color).with_loser_entry(1, entry);
        flagged.winner_is_double = double;
        flagged.winner_threw_joker = joker;
        let flagged = score_round(1, &flagged);
        prop_assert_eq!(flagged[1], plain[1] * winner_finish_multiplier(double, joker));
    }

    #[test]
    fn totals_are_column_sums(rounds in prop::collection::vec(round_input(), 0..=TOTAL_ROUNDS)) {
        let mut session = GameSession::new();
        session.start_game(["a", "b", "c", "d"].map(String::from));
        for input in &rounds {
            session.log_round(input).unwrap();
        }
        prop_assert_eq!(session.rounds_played(), rounds.len());
        for seat in 0..PLAYER_COUNT {
            let sum: i64 = session.scores().iter().map(|row| row[seat]).sum();
            prop_assert_eq!(session.total_score(seat), sum);
        }
        session.reset_game();
        prop_assert_eq!(session, GameSession::new());
    }
}
