use std::collections::BTreeSet;

use super::Point;

const MAX_HANDICAP: u32 = 9;

/// Which corner receives the third handicap stone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandicapConvention {
    /// Third stone bottom-right, fourth top-left.
    #[default]
    Standard,
    /// Third stone top-left, fourth bottom-right (Tygem servers).
    Tygem,
}

/// Canonical handicap points for the given board size.
///
/// Empty below two stones or on boards smaller than 4x4. Requests above nine
/// stones are clamped; even-sized boards stop at the four corner points.
pub fn handicap_points(
    board_size: u32,
    handicap: u32,
    convention: HandicapConvention,
) -> BTreeSet<Point> {
    let mut points = BTreeSet::new();

    if board_size < 4 || handicap < 2 {
        return points;
    }

    let handicap = handicap.min(MAX_HANDICAP);
    let d = if board_size < 13 { 2 } else { 3 };
    let near = 1 + d;
    let far = board_size - d;

    points.insert(Point::new(far, near));
    points.insert(Point::new(near, far));

    let (third, fourth) = match convention {
        HandicapConvention::Standard => (Point::new(far, far), Point::new(near, near)),
        HandicapConvention::Tygem => (Point::new(near, near), Point::new(far, far)),
    };

    if handicap >= 3 {
        points.insert(third);
    }

    if handicap >= 4 {
        points.insert(fourth);
    }

    if board_size % 2 == 0 {
        return points;
    }

    let mid = board_size.div_ceil(2);

    if matches!(handicap, 5 | 7 | 9) {
        points.insert(Point::new(mid, mid));
    }

    if handicap >= 6 {
        points.insert(Point::new(near, mid));
        points.insert(Point::new(far, mid));
    }

    if handicap >= 8 {
        points.insert(Point::new(mid, near));
        points.insert(Point::new(mid, far));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_stones_below_two() {
        assert!(handicap_points(19, 0, HandicapConvention::Standard).is_empty());
        assert!(handicap_points(19, 1, HandicapConvention::Standard).is_empty());
    }

    #[test]
    fn test_no_stones_on_tiny_boards() {
        assert!(handicap_points(3, 4, HandicapConvention::Standard).is_empty());
    }

    #[test]
    fn test_count_matches_handicap_on_odd_boards() {
        for board_size in [13, 15, 19, 21] {
            for handicap in 2..=9 {
                for convention in [HandicapConvention::Standard, HandicapConvention::Tygem] {
                    let points = handicap_points(board_size, handicap, convention);
                    assert_eq!(
                        points.len(),
                        handicap as usize,
                        "size {board_size} ha {handicap}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_center_only_for_odd_counts() {
        let center = Point::center(19);
        for handicap in 2..=9 {
            let points = handicap_points(19, handicap, HandicapConvention::Standard);
            assert_eq!(points.contains(&center), matches!(handicap, 5 | 7 | 9));
        }
    }

    #[test]
    fn test_even_boards_cap_at_four() {
        for board_size in [4, 8, 10, 18, 20] {
            for handicap in 2..=12 {
                let points = handicap_points(board_size, handicap, HandicapConvention::Standard);
                assert!(points.len() <= 4);
                assert_eq!(points.len(), handicap.min(4) as usize);
            }
        }
    }

    #[test]
    fn test_clamped_to_nine() {
        let nine = handicap_points(19, 9, HandicapConvention::Standard);
        assert_eq!(handicap_points(19, 15, HandicapConvention::Standard), nine);
    }

    #[test]
    fn test_star_points_on_19() {
        let points = handicap_points(19, 2, HandicapConvention::Standard);
        let expected: BTreeSet<Point> = [Point::new(16, 4), Point::new(4, 16)].into();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_small_board_uses_third_line() {
        let points = handicap_points(9, 4, HandicapConvention::Standard);
        let expected: BTreeSet<Point> = [
            Point::new(7, 3),
            Point::new(3, 7),
            Point::new(7, 7),
            Point::new(3, 3),
        ]
        .into();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_conventions_differ_only_in_third_stone() {
        let standard = handicap_points(19, 3, HandicapConvention::Standard);
        let tygem = handicap_points(19, 3, HandicapConvention::Tygem);
        assert!(standard.contains(&Point::new(16, 16)));
        assert!(tygem.contains(&Point::new(4, 4)));
        assert_ne!(standard, tygem);

        assert_eq!(
            handicap_points(19, 4, HandicapConvention::Standard),
            handicap_points(19, 4, HandicapConvention::Tygem)
        );
    }
}
