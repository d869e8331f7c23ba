mod coords;
mod handicap;

pub use coords::{
    CoordinateError, notation_from_point, point_from_notation, point_from_sgf, sgf_from_notation,
    sgf_from_point,
};
pub use handicap::{HandicapConvention, handicap_points};

/// A board intersection, 1-based. `row` 1 is the top edge, as in SGF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub col: u32,
    pub row: u32,
}

impl Point {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Centre point of the board (rounded towards the top-left on even sizes).
    pub const fn center(board_size: u32) -> Self {
        let mid = board_size.div_ceil(2);
        Self { col: mid, row: mid }
    }

    /// Euclidean distance rounded to the nearest integer.
    pub fn distance(self, other: Point) -> u32 {
        let dx = self.col as f64 - other.col as f64;
        let dy = self.row as f64 - other.row as f64;
        dx.hypot(dy).round() as u32
    }
}
