//! Board tests - collision, movement, locking and line clears

use blockfall::core::{Board, ConfigError, Tetromino};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row_except(board: &mut Board, y: i32, gaps: &[i32]) {
    for x in 0..board.width() as i32 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(PieceKind::J));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert!(board.current_piece().is_none());

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_board_rejects_zero_dimensions() {
    assert!(matches!(
        Board::new(0, 20),
        Err(ConfigError::InvalidDimensions { width: 0, height: 20 })
    ));
    assert!(Board::new(10, 0).is_err());
    assert!(Board::new(4, 4).is_ok());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
}

#[test]
fn test_valid_move_walls_floor_and_stack() {
    let mut board = Board::default();
    let i = Tetromino::new(PieceKind::I);

    assert!(board.is_valid_move(&i, 0, 0));
    assert!(board.is_valid_move(&i, 6, 19));
    assert!(!board.is_valid_move(&i, -1, 0));
    assert!(!board.is_valid_move(&i, 7, 0));
    assert!(!board.is_valid_move(&i, 0, 20));

    board.set(4, 10, Some(PieceKind::Z));
    assert!(!board.is_valid_move(&i, 2, 10));
    assert!(board.is_valid_move(&i, 5, 10));
}

#[test]
fn test_overhang_above_top_is_allowed() {
    let mut board = Board::default();
    board.set(3, 0, Some(PieceKind::S));

    let t = Tetromino::new(PieceKind::T);
    // T's bottom row lands on y=0, where column 3 is taken
    assert!(!board.is_valid_move(&t, 3, -1));
    // Only the part above the board overlaps column 3
    assert!(board.is_valid_move(&t, 2, -2));
    // Walls still apply above the board
    assert!(!board.is_valid_move(&t, -1, -2));
}

#[test]
fn test_move_current_piece_bounds() {
    let mut board = Board::default();
    board.set_current_piece(Tetromino::new(PieceKind::O), 0, 0);

    assert!(!board.move_current_piece_left());
    assert_eq!(board.current_piece().unwrap().x, 0);

    for _ in 0..8 {
        assert!(board.move_current_piece_right());
    }
    assert!(!board.move_current_piece_right());
    assert_eq!(board.current_piece().unwrap().x, 8);

    let mut fell = 0;
    while board.move_current_piece_down() {
        fell += 1;
    }
    assert_eq!(fell, 18);
}

#[test]
fn test_moves_without_active_piece_fail() {
    let mut board = Board::default();
    assert!(!board.move_current_piece_left());
    assert!(!board.move_current_piece_down());
    assert!(!board.rotate_current_piece());
    assert_eq!(board.hard_drop_current_piece(), 0);
}

#[test]
fn test_rotation_blocked_by_wall_is_undone() {
    let mut board = Board::default();
    // Vertical I against the right wall
    let mut vertical = Tetromino::new(PieceKind::I);
    vertical.rotate();
    board.set_current_piece(vertical, 9, 5);

    assert!(!board.rotate_current_piece());
    assert_eq!(board.current_piece().unwrap().tetromino, vertical);
    assert_eq!(board.current_piece().unwrap().x, 9);
}

#[test]
fn test_rotation_changes_shape_in_place() {
    let mut board = Board::default();
    board.set_current_piece(Tetromino::new(PieceKind::I), 3, 5);

    assert!(board.rotate_current_piece());
    let active = board.current_piece().unwrap();
    assert_eq!((active.x, active.y), (3, 5));
    assert_eq!(active.tetromino.shape().rows(), 4);
    assert_eq!(active.tetromino.shape().cols(), 1);
}

#[test]
fn test_place_skips_rows_above_board() {
    let mut board = Board::default();
    let mut vertical = Tetromino::new(PieceKind::I);
    vertical.rotate();
    board.set_current_piece(vertical, 0, -2);

    board.place_current_piece();
    assert!(board.current_piece().is_none());
    assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
    assert_eq!(board.get(0, 1), Some(Some(PieceKind::I)));
    assert_eq!(board.get(0, 2), Some(None));
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, &[]);
    board.set(2, 18, Some(PieceKind::T));
    board.set(0, 0, Some(PieceKind::L));

    assert_eq!(board.clear_lines(), 1);
    assert!(!board.is_row_full(19));
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(0, 1), Some(Some(PieceKind::L)));
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_non_adjacent_and_consecutive_lines() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, &[]);
    fill_row_except(&mut board, 18, &[4]);
    fill_row_except(&mut board, 17, &[]);
    fill_row_except(&mut board, 16, &[]);

    assert_eq!(board.clear_lines(), 3);
    // The partial row survives and ends at the bottom
    assert!(board.get(4, 19) == Some(None));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert!(board.row(18).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_hard_drop_o_clears_bottom_row() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, &[8, 9]);
    board.set_current_piece(Tetromino::new(PieceKind::O), 8, 0);

    assert_eq!(board.hard_drop_current_piece(), 1);
    // The top half of the O is now the bottom row
    assert_eq!(board.get(8, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.get(9, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.get(0, 19), Some(None));
}

#[test]
fn test_game_over_and_reset() {
    let mut board = Board::default();
    assert!(!board.is_game_over());
    board.set(5, 0, Some(PieceKind::Z));
    assert!(board.is_game_over());

    board.set_current_piece(Tetromino::new(PieceKind::T), 3, 3);
    board.reset();
    assert!(!board.is_game_over());
    assert!(board.current_piece().is_none());
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_colors_view() {
    let mut board = Board::default();
    board.set(0, 19, Some(PieceKind::I));
    let colors = board.colors();
    assert_eq!(colors.len(), 20);
    assert_eq!(colors[19][0], PieceKind::I.color());
    assert_eq!(colors[0][0], "");
}
