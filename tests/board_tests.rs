//! Board tests - grid, active piece, hold and queue

use tetris_gym::core::features::compute_grid_features;
use tetris_gym::core::Board;
use tetris_gym::types::{GameOverReason, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, holes: &[i8]) {
    for x in 0..board.width() as i8 {
        if !holes.contains(&x) {
            board.set(x, y, Some(PieceKind::I));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in -(board.buffer() as i8)..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.active().is_none());
    assert!(board.queue().is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -5), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::default();
    fill_row(&mut board, 19, &[4]);
    assert!(!board.is_row_full(19));
    board.set(4, 19, Some(PieceKind::O));
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(40));
}

#[test]
fn test_custom_dimensions() {
    let mut board = Board::new(6, 8, 2);
    assert_eq!(board.cells().len(), 6 * 10);
    assert_eq!(board.visible_cells().len(), 6 * 8);

    board.spawn(PieceKind::I).unwrap();
    assert_eq!(board.active().unwrap().x, 1);
    assert_eq!(board.ghost_y(), Some(6));
}

#[test]
fn test_line_clear_scenario() {
    let mut board = Board::default();
    fill_row(&mut board, 19, &[9]);
    board.set(2, 18, Some(PieceKind::Z));

    board.spawn(PieceKind::I).unwrap();
    assert!(board.try_rotate(RotateDirection::Cw));
    while board.try_move(1, 0) {}
    let drop = board.hard_drop().unwrap();

    assert_eq!(drop.lock.lines(), 1);
    assert!(!drop.lock.lock_out);
    assert!(board.is_occupied(2, 19));
    assert!(board.visible_rows()[0].iter().all(|c| c.is_none()));
    assert!(board.can_hold());
}

#[test]
fn test_tetris_clears_four_rows() {
    let mut board = Board::default();
    for y in 16..20 {
        fill_row(&mut board, y, &[0]);
    }
    board.set(3, 15, Some(PieceKind::S));

    board.spawn(PieceKind::I).unwrap();
    assert!(board.try_rotate(RotateDirection::Ccw));
    while board.try_move(-1, 0) {}
    let drop = board.hard_drop().unwrap();

    assert_eq!(drop.lock.cleared_rows.as_slice(), &[19, 18, 17, 16]);
    assert!(board.is_occupied(3, 19));
    assert_eq!(board.visible_cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_failed_moves_leave_board_unchanged() {
    let mut board = Board::default();
    board.spawn(PieceKind::J).unwrap();
    while board.try_move(-1, 0) {}
    while board.soft_drop() {}

    let before = board.clone();
    assert!(!board.try_move(-1, 0));
    assert!(!board.try_move(0, 1));
    assert!(!board.soft_drop());
    assert_eq!(board, before);
}

#[test]
fn test_spawn_block_out() {
    let mut board = Board::default();
    board.set(4, -2, Some(PieceKind::L));
    assert_eq!(board.spawn(PieceKind::T), Err(GameOverReason::BlockOut));
    assert!(board.active().is_none());
}

#[test]
fn test_hold_refused_when_incoming_piece_blocked() {
    let mut board = Board::default();
    board.push_queue(PieceKind::O);
    board.spawn(PieceKind::T).unwrap();
    for _ in 0..4 {
        board.soft_drop();
    }
    // O spawns in columns 4-5 of the top buffer rows.
    board.set(5, -2, Some(PieceKind::Z));

    let before = board.clone();
    assert!(!board.swap_hold());
    assert_eq!(board, before);
}

#[test]
fn test_hold_without_active_piece_is_refused() {
    let mut board = Board::default();
    board.push_queue(PieceKind::O);
    assert!(!board.swap_hold());
    assert_eq!(board.queue().len(), 1);
}

#[test]
fn test_features_ignore_active_piece() {
    let mut board = Board::default();
    fill_row(&mut board, 19, &[0, 1]);
    board.set(1, 18, Some(PieceKind::T));
    board.spawn(PieceKind::O).unwrap();

    let features = compute_grid_features(&board);
    assert_eq!(features.holes, 1);
    assert_eq!(features.max_height, 2);
}
