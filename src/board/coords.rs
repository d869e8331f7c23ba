use thiserror::Error;

use super::Point;

/// Column letters used by human board notation. `I` is skipped.
const COLUMN_LETTERS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

const SGF_MAX: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("invalid coordinate '{text}' for board size {board_size}")]
    InvalidNotation { text: String, board_size: u32 },

    #[error("point ({col}, {row}) is outside the SGF range 1..=26")]
    OutOfSgfRange { col: u32, row: u32 },

    #[error("invalid SGF point '{0}'")]
    InvalidSgf(String),
}

/// "C17" on a 19x19 board becomes (3, 3).
pub fn point_from_notation(text: &str, board_size: u32) -> Result<Point, CoordinateError> {
    let invalid = || CoordinateError::InvalidNotation {
        text: text.to_string(),
        board_size,
    };

    if !(2..=3).contains(&text.len()) || !text.is_ascii() {
        return Err(invalid());
    }

    let (letter, number) = text.split_at(1);
    let letter = letter.to_ascii_uppercase();
    let col = COLUMN_LETTERS
        .find(letter.as_str())
        .map(|idx| idx as u32 + 1)
        .filter(|col| *col <= board_size)
        .ok_or_else(invalid)?;

    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let number: u32 = number.parse().map_err(|_| invalid())?;
    if number == 0 || number > board_size {
        return Err(invalid());
    }

    Ok(Point::new(col, board_size - number + 1))
}

/// (3, 3) becomes "cc".
pub fn sgf_from_point(point: Point) -> Result<String, CoordinateError> {
    let in_range = |v: u32| (1..=SGF_MAX).contains(&v);
    if !in_range(point.col) || !in_range(point.row) {
        return Err(CoordinateError::OutOfSgfRange {
            col: point.col,
            row: point.row,
        });
    }

    let letter = |v: u32| char::from(b'a' + (v - 1) as u8);
    Ok([letter(point.col), letter(point.row)].iter().collect())
}

pub fn sgf_from_notation(text: &str, board_size: u32) -> Result<String, CoordinateError> {
    sgf_from_point(point_from_notation(text, board_size)?)
}

pub fn point_from_sgf(sgf: &str) -> Result<Point, CoordinateError> {
    let bytes = sgf.as_bytes();
    let axis = |b: u8| b.is_ascii_lowercase().then(|| (b - b'a') as u32 + 1);
    match bytes {
        [c, r] => match (axis(*c), axis(*r)) {
            (Some(col), Some(row)) => Ok(Point::new(col, row)),
            _ => Err(CoordinateError::InvalidSgf(sgf.to_string())),
        },
        _ => Err(CoordinateError::InvalidSgf(sgf.to_string())),
    }
}

pub fn notation_from_point(point: Point, board_size: u32) -> Result<String, CoordinateError> {
    let out_of_range = || CoordinateError::InvalidNotation {
        text: format!("({}, {})", point.col, point.row),
        board_size,
    };

    if point.row == 0 || point.row > board_size || point.col == 0 || point.col > board_size {
        return Err(out_of_range());
    }

    let letter = COLUMN_LETTERS
        .chars()
        .nth(point.col as usize - 1)
        .ok_or_else(out_of_range)?;
    Ok(format!("{}{}", letter, board_size - point.row + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_notation_inverts_rows() {
        assert_eq!(point_from_notation("C17", 19), Ok(Point::new(3, 3)));
        assert_eq!(point_from_notation("A1", 19), Ok(Point::new(1, 19)));
        assert_eq!(point_from_notation("T19", 19), Ok(Point::new(19, 1)));
    }

    #[test]
    fn test_point_from_notation_skips_i() {
        assert_eq!(point_from_notation("J10", 19), Ok(Point::new(9, 10)));
        assert!(point_from_notation("I10", 19).is_err());
    }

    #[test]
    fn test_point_from_notation_is_case_insensitive() {
        assert_eq!(
            point_from_notation("k16", 19),
            point_from_notation("K16", 19)
        );
    }

    #[test]
    fn test_point_from_notation_rejects_out_of_board() {
        assert!(point_from_notation("K20", 19).is_err());
        assert!(point_from_notation("K0", 19).is_err());
        assert!(point_from_notation("K10", 9).is_err());
        assert!(point_from_notation("E10", 9).is_err());
        assert!(point_from_notation("K", 19).is_err());
        assert!(point_from_notation("K100", 19).is_err());
        assert!(point_from_notation("K+1", 19).is_err());
        assert!(point_from_notation("1K", 19).is_err());
    }

    #[test]
    fn test_sgf_from_point() {
        assert_eq!(sgf_from_point(Point::new(3, 3)).as_deref(), Ok("cc"));
        assert_eq!(sgf_from_point(Point::new(26, 1)).as_deref(), Ok("za"));
        assert!(sgf_from_point(Point::new(0, 3)).is_err());
        assert!(sgf_from_point(Point::new(3, 27)).is_err());
    }

    #[test]
    fn test_sgf_from_notation_composes() {
        assert_eq!(sgf_from_notation("C17", 19).as_deref(), Ok("cc"));
        assert_eq!(sgf_from_notation("D4", 19).as_deref(), Ok("dp"));
        assert_eq!(sgf_from_notation("E5", 9).as_deref(), Ok("ee"));
    }

    #[test]
    fn test_round_trip_every_point() {
        for board_size in [9, 13, 19, 25] {
            for col in 1..=board_size {
                for row in 1..=board_size {
                    let point = Point::new(col, row);
                    let sgf = sgf_from_point(point).unwrap();
                    assert_eq!(point_from_sgf(&sgf), Ok(point));

                    let notation = notation_from_point(point, board_size).unwrap();
                    assert!(!notation.starts_with('I'));
                    assert_eq!(sgf_from_notation(&notation, board_size), Ok(sgf));
                }
            }
        }
    }

    #[test]
    fn test_point_from_sgf_rejects_garbage() {
        assert!(point_from_sgf("").is_err());
        assert!(point_from_sgf("a").is_err());
        assert!(point_from_sgf("aA").is_err());
        assert!(point_from_sgf("abc").is_err());
    }
}
