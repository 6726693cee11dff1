// Test-only helpers for `gridlines-lib` tests
#![allow(dead_code)]
use crate::position::Position;

/// Assert that consecutive cells of `path` are 8-neighbours.
pub fn assert_connected(path: &[Position]) {
    for pair in path.windows(2) {
        assert!(
            pair[0].is_neighbor_of(&pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}

/// The eight cells surrounding `centre`, usable as a wall that seals it off.
pub fn ring_around(centre: Position) -> Vec<Position> {
    centre.neighbors().to_vec()
}

/// A closed square outline with corners `(x0, y0)` and `(x1, y1)`.
pub fn square_outline(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Position> {
    let mut cells = Vec::new();
    for x in x0..=x1 {
        cells.push(Position::new(x, y0));
        cells.push(Position::new(x, y1));
    }
    for y in (y0 + 1)..y1 {
        cells.push(Position::new(x0, y));
        cells.push(Position::new(x1, y));
    }
    cells
}
