use flotilla::{Board, CannotPlaceReason, Cell, Coordinate, RawCell, ShipId};

fn raw(col: i32, row: i32) -> RawCell {
    RawCell::new(col, row)
}

fn coord(col: usize, row: usize) -> Coordinate {
    Coordinate::new(col, row)
}

/// Snapshot every cell of the board, row-major.
fn snapshot(board: &Board) -> Vec<Cell> {
    board.iter_rows().flatten().collect()
}

/// The kind of a cell, ignoring which ship owns it.
fn kind(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => 0,
        Cell::Hull(_) => 1,
        Cell::Buffer(_) => 2,
    }
}

#[test]
fn place_in_corner_marks_hull_and_clipped_buffer() {
    let mut board = Board::default();
    let ship = ShipId::new(0);
    let origin = board.place(ship, raw(0, 0), 4).unwrap();
    assert_eq!(origin, coord(0, 0));

    for col in 0..4 {
        assert_eq!(board.get(coord(col, 0)), Some(Cell::Hull(ship)));
    }
    // The row above the footprint is clipped away entirely; what remains is
    // the row below plus the cell past the stern.
    let expected_buffers = [(0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (4, 0)];
    for &(col, row) in &expected_buffers {
        assert_eq!(board.get(coord(col, row)), Some(Cell::Buffer(ship)));
    }
    let occupied = 4 + expected_buffers.len();
    let empty = snapshot(&board).iter().filter(|c| c.is_empty()).count();
    assert_eq!(empty, 100 - occupied);
}

#[test]
fn overlap_is_rejected_and_leaves_grid_unchanged() {
    let mut board = Board::default();
    board.place(ShipId::new(0), raw(3, 3), 2).unwrap();
    let before = snapshot(&board);

    let err = board.place(ShipId::new(1), raw(4, 3), 2).unwrap_err();
    assert_eq!(err.reason(), CannotPlaceReason::Occupied);
    assert_eq!(snapshot(&board), before);
}

#[test]
fn diagonal_adjacency_is_rejected() {
    let mut board = Board::default();
    board.place(ShipId::new(0), raw(6, 6), 1).unwrap();

    let err = board.check(raw(5, 5), 1).unwrap_err();
    assert_eq!(err, CannotPlaceReason::TooClose);
}

#[test]
fn footprint_running_off_the_board_is_rejected() {
    let board = Board::default();
    assert_eq!(board.check(raw(7, 0), 4), Err(CannotPlaceReason::OutOfBounds));
    assert_eq!(board.check(raw(-1, 5), 2), Err(CannotPlaceReason::OutOfBounds));
    assert_eq!(board.check(raw(0, 10), 1), Err(CannotPlaceReason::OutOfBounds));
    assert_eq!(board.check(raw(6, 9), 4), Err(CannotPlaceReason::OutOfBounds));
}

#[test]
fn check_fails_on_own_footprint_after_place() {
    let mut board = Board::default();
    board.place(ShipId::new(0), raw(2, 2), 3).unwrap();
    assert_eq!(board.check(raw(2, 2), 3), Err(CannotPlaceReason::Occupied));
}

#[test]
fn release_keeps_a_neighbor_ships_buffer() {
    // Two ships one empty row apart share the buffer row between them. The
    // first placer owns the shared cells; releasing it must keep them
    // reserved for the remaining ship. Only the recorded owner may change,
    // which placement checks never look at.
    let mut board = Board::default();
    let first = ShipId::new(0);
    let second = ShipId::new(1);
    board.place(first, raw(0, 0), 2).unwrap();
    board.place(second, raw(0, 2), 2).unwrap();
    let before = snapshot(&board);

    for col in 0..=2 {
        assert_eq!(board.get(coord(col, 1)), Some(Cell::Buffer(first)));
    }

    board.release(first);
    for col in 0..=2 {
        // Kind preserved, ownership transferred to the remaining neighbor.
        assert_eq!(board.get(coord(col, 1)), Some(Cell::Buffer(second)));
    }
    for col in 0..=2 {
        assert_eq!(board.get(coord(col, 0)), Some(Cell::Empty));
    }

    // The vacated footprint is immediately reusable, and re-placing restores
    // every cell kind exactly.
    board.place(first, raw(0, 0), 2).unwrap();
    let after: Vec<u8> = snapshot(&board).into_iter().map(kind).collect();
    let expected: Vec<u8> = before.into_iter().map(kind).collect();
    assert_eq!(after, expected);
}

#[test]
fn release_reports_whether_the_ship_owned_cells() {
    let mut board = Board::default();
    let ship = ShipId::new(0);
    assert!(!board.release(ship));
    board.place(ship, raw(5, 5), 2).unwrap();
    assert!(board.release(ship));
    assert!(!board.release(ship));
}

#[test]
fn reset_empties_every_cell() {
    let mut board = Board::default();
    board.place(ShipId::new(0), raw(0, 0), 4).unwrap();
    board.place(ShipId::new(1), raw(0, 2), 3).unwrap();
    board.reset();
    assert!(snapshot(&board).iter().all(|c| c.is_empty()));
}

#[test]
fn placement_next_to_a_buffer_is_allowed() {
    // The spacing rule forbids hull-to-hull adjacency only; sitting next to
    // another ship's buffer is fine.
    let mut board = Board::default();
    board.place(ShipId::new(0), raw(0, 0), 2).unwrap();
    // (0, 2) neighbors the buffer row at row 1 but no hull.
    board.place(ShipId::new(1), raw(0, 2), 2).unwrap();
}
