//! Tournament flow: seating, turns, scoring and restarts.

use parlor_tictactoe::{
    Controller, Marker, Phase, Player, PlayerId, RoundOutcome, Scripted, StartOrder, Strategy,
    Tournament, TournamentSettings, TurnOrder, Unattended,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn computer(name: &str, glyph: char) -> Player {
    Player::new(name.into(), Marker::from_glyph(glyph), Controller::Computer)
}

fn human(name: &str, glyph: char) -> Player {
    Player::new(name.into(), Marker::from_glyph(glyph), Controller::Human)
}

fn tournament(
    players: Vec<Player>,
    score_limit: u32,
    strategy: Strategy,
) -> Tournament<ChaCha8Rng> {
    let settings = TournamentSettings::new(3, score_limit, strategy);
    Tournament::new(players, settings, ChaCha8Rng::seed_from_u64(42)).unwrap()
}

#[test]
fn test_turn_rotation_wraps() {
    let order = TurnOrder::new(vec!['A', 'B', 'C']).unwrap();
    assert_eq!(order.next_after('C'), Some('A'));

    let mut order = order;
    order.advance();
    assert_eq!(order.current(), 'B');
    assert_eq!(order.players_after_current(), vec!['C', 'A']);
}

#[test]
fn test_players_after_current_resolves_players() {
    let mut t = tournament(
        vec![human("A", 'A'), human("B", 'B'), human("C", 'C')],
        3,
        Strategy::Heuristic,
    );
    t.begin(StartOrder::Humans).unwrap();
    t.apply_move(0).unwrap();

    let names: Vec<&str> = t
        .players_after_current()
        .into_iter()
        .map(|p| p.name().as_str())
        .collect();
    assert_eq!(names, vec!["C", "A"]);
    assert_eq!(t.next_player(PlayerId(2)), Some(PlayerId(0)));
    assert_eq!(t.find_player(Marker::from_glyph('C')), Some(PlayerId(2)));
    assert_eq!(t.find_player(Marker::from_glyph('Z')), None);
}

#[test]
fn test_computers_play_to_a_tournament_winner() {
    let mut t = tournament(
        vec![computer("Hal", 'X'), computer("Joshua", 'O'), computer("Ava", 'T')],
        2,
        Strategy::Heuristic,
    );
    t.begin(StartOrder::Random).unwrap();

    for _ in 0..200 {
        t.play_round(&mut Unattended).unwrap();
        if t.phase() == Phase::TournamentComplete {
            break;
        }
        t.next_round().unwrap();
    }

    assert_eq!(t.phase(), Phase::TournamentComplete);
    let winner = t.tournament_winner().unwrap();
    assert_eq!(winner.score(), 2);
    let total: u32 = t.scores_by_player().iter().map(|(_, score)| score).sum();
    assert!(total >= 2);
}

#[test]
fn test_perfect_players_tie() {
    let mut t = tournament(
        vec![computer("Hal", 'X'), computer("Joshua", 'O')],
        1,
        Strategy::Exhaustive { max_nodes: None },
    );
    t.begin(StartOrder::Computers).unwrap();

    assert_eq!(t.play_round(&mut Unattended).unwrap(), RoundOutcome::Tie);
    assert_eq!(t.phase(), Phase::RoundComplete);
    assert!(t.board().is_full());
}

#[test]
fn test_human_moves_come_from_provider() {
    let mut t = tournament(
        vec![human("Ada", 'X'), computer("Hal", 'O')],
        3,
        Strategy::Heuristic,
    );
    t.begin(StartOrder::Humans).unwrap();
    let mut script = Scripted::new([" 4 "]);

    let report = t.play_turn(&mut script).unwrap();
    assert_eq!(*report.key(), 4);
    assert_eq!(t.board().marker_at(4), Some(Marker::from_glyph('X')));
    assert_eq!(script.remaining(), 0);

    // The computer answers without consulting the provider.
    let report = t.play_turn(&mut Unattended).unwrap();
    assert_eq!(*report.player(), PlayerId(1));
    assert_ne!(*report.key(), 4);
}

#[test]
fn test_restart_clears_scores() {
    let mut t = tournament(
        vec![human("Ada", 'X'), human("Bob", 'O')],
        1,
        Strategy::Heuristic,
    );
    t.begin(StartOrder::Humans).unwrap();
    for key in [0, 4, 1, 8, 2] {
        t.apply_move(key).unwrap();
    }
    assert_eq!(t.phase(), Phase::TournamentComplete);
    assert!(t.next_round().is_err());

    t.restart(StartOrder::Humans).unwrap();
    assert_eq!(t.phase(), Phase::RoundInProgress);
    assert!(t.tournament_winner().is_none());
    assert!(t.scores_by_player().iter().all(|(_, score)| *score == 0));
    assert_eq!(t.board().unmarked_keys().len(), 9);
}
