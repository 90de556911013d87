use connectk_mcts::{Board, Coord, MctsError, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn new_board_is_empty_with_x_to_move() {
    let board = Board::new(3, 3).unwrap();
    assert_eq!(board.size(), 3);
    assert_eq!(board.win_len(), 3);
    assert_eq!(board.to_move(), Player::X);
    assert_eq!(board.legal_moves().len(), 9);
    assert!(!board.is_terminal());
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(matches!(
        Board::new(0, 1),
        Err(MctsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Board::new(3, 0),
        Err(MctsError::InvalidConfiguration(_))
    ));
    // run longer than the board side can never be completed
    assert!(matches!(
        Board::new(3, 4),
        Err(MctsError::InvalidConfiguration(_))
    ));
}

#[test]
fn legal_moves_scan_row_major() {
    let board = Board::from_rows(&["X.O", "...", ".X."], 3, Player::O).unwrap();
    let moves = board.legal_moves();
    assert_eq!(
        moves,
        vec![
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(2, 0),
            Coord::new(2, 2),
        ]
    );
}

#[test]
fn apply_places_mark_and_flips_turn() {
    let board = Board::new(3, 3).unwrap();
    let next = board.apply(Coord::new(1, 1)).unwrap();

    assert_eq!(next.cell(Coord::new(1, 1)), Some(Player::X));
    assert_eq!(next.to_move(), Player::O);

    // the original board is untouched
    assert_eq!(board.cell(Coord::new(1, 1)), None);
    assert_eq!(board.to_move(), Player::X);
}

#[test]
fn apply_is_deterministic() {
    let board = Board::from_rows(&["X..", ".O.", "..."], 3, Player::X).unwrap();
    let first = board.apply(Coord::new(2, 2)).unwrap();
    let second = board.apply(Coord::new(2, 2)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn apply_rejects_occupied_and_out_of_range_cells() {
    let board = Board::from_rows(&["X..", "...", "..."], 3, Player::O).unwrap();
    assert!(matches!(
        board.apply(Coord::new(0, 0)),
        Err(MctsError::IllegalMove(_))
    ));
    assert!(matches!(
        board.apply(Coord::new(3, 0)),
        Err(MctsError::IllegalMove(_))
    ));
}

#[test]
fn detects_horizontal_run() {
    let board = Board::from_rows(&["XXXO", "....", "....", "...."], 3, Player::O).unwrap();
    assert!(board.has_run(Player::X));
    assert!(!board.has_run(Player::O));
}

#[test]
fn broken_run_does_not_count() {
    let board = Board::from_rows(&["OXXO", "....", "....", "...."], 3, Player::X).unwrap();
    assert!(!board.has_run(Player::X));
    assert!(!board.has_run(Player::O));
}

#[test]
fn detects_vertical_run_touching_the_edge() {
    let board = Board::from_rows(&["...", "..O", "..O"], 2, Player::X).unwrap();
    assert!(board.has_run(Player::O));
    assert!(!board.has_run(Player::X));
}

#[test]
fn detects_diagonal_run() {
    let board = Board::from_rows(&["X.XO", ".X..", "..X.", "...."], 3, Player::O).unwrap();
    assert!(board.has_run(Player::X));
}

#[test]
fn detects_anti_diagonal_run() {
    let board = Board::from_rows(&["..X", ".X.", "X.."], 3, Player::O).unwrap();
    assert!(board.has_run(Player::X));
}

#[test]
fn run_longer_than_required_counts() {
    let board = Board::from_rows(&["OOOO", "....", "....", "...."], 3, Player::X).unwrap();
    assert!(board.has_run(Player::O));
}

#[test]
fn short_run_does_not_count() {
    // two in a column plus a horizontal run for the opponent
    let board = Board::from_rows(&["XOOO", "X...", "....", "...."], 3, Player::X).unwrap();
    assert!(!board.has_run(Player::X));
    assert!(board.has_run(Player::O));
}

#[test]
fn winner_reports_the_running_player() {
    let board = Board::from_rows(&["OOO", "XX.", "..."], 3, Player::X).unwrap();
    assert_eq!(board.winner(), Some(Player::O));
}

#[test]
fn terminal_iff_won_or_full() {
    let empty = Board::new(3, 3).unwrap();
    assert!(!empty.is_terminal());

    let won = Board::from_rows(&["XXX", "OO.", "..."], 3, Player::O).unwrap();
    assert!(won.is_terminal());
    assert!(!won.is_full());

    let drawn = Board::from_rows(&["XOX", "XXO", "OXO"], 3, Player::O).unwrap();
    assert!(drawn.is_full());
    assert!(drawn.winner().is_none());
    assert!(drawn.is_terminal());
}

#[test]
fn random_move_is_reproducible_with_a_seed() {
    let board = Board::from_rows(&["X.O", "...", ".X."], 3, Player::O).unwrap();

    let mut first = ChaCha20Rng::seed_from_u64(99);
    let mut second = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..20 {
        assert_eq!(
            board.random_move(&mut first).unwrap(),
            board.random_move(&mut second).unwrap()
        );
    }
}

#[test]
fn random_move_always_lands_on_an_empty_cell() {
    let board = Board::from_rows(&["XOX", "O.X", "XO."], 3, Player::O).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    for _ in 0..50 {
        let coord = board.random_move(&mut rng).unwrap();
        assert_eq!(board.cell(coord), None);
    }
}

#[test]
fn random_move_on_a_full_board_fails() {
    let board = Board::from_rows(&["XOX", "XXO", "OXO"], 3, Player::O).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert!(matches!(
        board.random_move(&mut rng),
        Err(MctsError::NoLegalMoves)
    ));
}

#[test]
fn diff_one_recovers_the_applied_move() {
    let board = Board::from_rows(&["X..", ".O.", "..."], 3, Player::X).unwrap();
    let next = board.apply(Coord::new(2, 1)).unwrap();
    assert_eq!(board.diff_one(&next), Some(Coord::new(2, 1)));
    assert_eq!(board.diff_one(&board.clone()), None);
}
