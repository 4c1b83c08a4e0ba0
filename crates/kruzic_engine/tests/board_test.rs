//! Tests for board marking and terminal detection.

use kruzic_engine::{Board, Coord, GameStatus, LineKind, Player, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Visits every board reachable by alternating play from X, stopping at
/// terminal positions.
fn visit_reachable(board: Board, to_move: Player, seen: &mut HashSet<Board>) {
    if !seen.insert(board) {
        return;
    }
    if board.status() != GameStatus::InProgress {
        return;
    }
    for coord in board.empty_cells() {
        let mut next = board;
        next.mark(coord, to_move);
        visit_reachable(next, to_move.opponent(), seen);
    }
}

fn count_lines(board: &Board) -> (usize, usize) {
    let mut x = 0;
    let mut o = 0;
    for kind in LineKind::CHECK_ORDER {
        let [a, b, c] = kind.cells();
        match (board.get(a), board.get(b), board.get(c)) {
            (Square::Marked(p), Square::Marked(q), Square::Marked(r)) if p == q && q == r => {
                match p {
                    Player::X => x += 1,
                    Player::O => o += 1,
                }
            }
            _ => {}
        }
    }
    (x, o)
}

#[test]
fn test_reachable_boards_are_consistent() {
    let mut seen = HashSet::new();
    visit_reachable(Board::new(), Player::X, &mut seen);
    assert_eq!(seen.len(), 5478);

    for board in &seen {
        let non_empty = Coord::ALL
            .iter()
            .filter(|&&coord| !board.is_empty_cell(coord))
            .count();
        assert_eq!(board.marked_count() as usize, non_empty);

        let (x_lines, o_lines) = count_lines(board);
        assert!(x_lines == 0 || o_lines == 0, "both sides won on {board}");

        match board.status() {
            GameStatus::Won(Player::X) => {
                assert!(x_lines > 0);
                assert_eq!(board.terminal_value(), Some(Player::X));
            }
            GameStatus::Won(Player::O) => {
                assert!(o_lines > 0);
                assert_eq!(board.terminal_value(), Some(Player::O));
            }
            GameStatus::Draw => {
                assert!(board.is_full());
                assert_eq!(board.terminal_value(), None);
            }
            GameStatus::InProgress => {
                assert!(!board.is_full());
                assert_eq!(board.terminal_value(), None);
            }
        }
    }
}

#[test]
fn test_known_draw() {
    let board: Board = "XOX/XOO/OXX".parse().unwrap();
    assert!(board.is_full());
    assert_eq!(board.terminal_value(), None);
    assert_eq!(board.winning_line(), None);
    assert_eq!(board.status(), GameStatus::Draw);
}

#[test]
fn test_marked_count_tracks_random_games() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let mut board = Board::new();
        let mut player = Player::X;
        let mut order = Coord::ALL.to_vec();
        order.shuffle(&mut rng);

        for (played, coord) in order.into_iter().enumerate() {
            assert!(board.is_empty_cell(coord));
            board.mark(coord, player);
            player = player.opponent();
            assert_eq!(board.marked_count() as usize, played + 1);
            assert_eq!(
                board.empty_cells().len(),
                9 - board.marked_count() as usize
            );
        }
        assert!(board.is_full());
        assert!(!board.is_empty());
    }
}

#[test]
fn test_first_line_in_check_order_is_reported() {
    // Row 2 and the ascending diagonal are both O; rows come first.
    let board: Board = "XXO/XO./OOO".parse().unwrap();
    let line = board.winning_line().unwrap();
    assert_eq!(line.kind, LineKind::Row(2));
    assert_eq!((line.start, line.end), (Coord::new(2, 0), Coord::new(2, 2)));

    // Descending diagonal is checked before ascending.
    let board: Board = "XOX/OXO/XOX".parse().unwrap();
    assert_eq!(board.winning_line().unwrap().kind, LineKind::Descending);
}

#[test]
fn test_winning_line_display() {
    let board: Board = "X../X../X..".parse().unwrap();
    assert_eq!(
        board.winning_line().unwrap().to_string(),
        "X wins on column 0 from (0, 0) to (2, 0)"
    );
}
