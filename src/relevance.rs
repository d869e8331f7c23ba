use crate::board::Point;

/// Distances are capped here before the threshold lookup.
pub const MAX_DISTANCE: u32 = 15;

/// Minimum decision delta for a suggestion at a given distance, before
/// sensitivity and relation weights are applied. Non-decreasing, flat from 13.
const DISTANCE_THRESHOLDS: [f64; MAX_DISTANCE as usize + 1] = [
    0.030, 0.032, 0.035, 0.039, 0.044, 0.050, 0.056, 0.062, 0.068, 0.073, 0.078, 0.082, 0.086,
    0.088, 0.088, 0.088,
];

pub const CURRENT_MOVE_WEIGHT: f64 = 1.0;
pub const OPPONENT_PREVIOUS_WEIGHT: f64 = 2.0;
pub const OWN_PREVIOUS_WEIGHT: f64 = 3.0;

/// The played move and the two moves before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveHistory {
    pub current: Point,
    pub previous: Point,
    pub before_previous: Point,
}

/// Decides whether an engine suggestion is worth showing.
#[derive(Debug, Clone, Copy)]
pub struct RelevancePolicy {
    sensitivity: f64,
}

impl RelevancePolicy {
    /// Higher sensitivity lowers every threshold.
    pub fn new(sensitivity: f64) -> Self {
        Self { sensitivity }
    }

    pub fn threshold(&self, distance: u32, weight: f64) -> f64 {
        let idx = distance.min(MAX_DISTANCE) as usize;
        DISTANCE_THRESHOLDS[idx] / self.sensitivity * weight
    }

    /// True if `decision_delta` clears the threshold for any of the three
    /// relations between the suggestion and recent play.
    pub fn is_relevant(
        &self,
        decision_delta: f64,
        suggestion: Point,
        history: &MoveHistory,
    ) -> bool {
        [
            (history.current, CURRENT_MOVE_WEIGHT),
            (history.previous, OPPONENT_PREVIOUS_WEIGHT),
            (history.before_previous, OWN_PREVIOUS_WEIGHT),
        ]
        .into_iter()
        .any(|(anchor, weight)| {
            decision_delta >= self.threshold(suggestion.distance(anchor), weight)
        })
    }
}

impl Default for RelevancePolicy {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(current: Point, previous: Point, before_previous: Point) -> MoveHistory {
        MoveHistory {
            current,
            previous,
            before_previous,
        }
    }

    #[test]
    fn test_thresholds_are_non_decreasing() {
        for pair in DISTANCE_THRESHOLDS.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_threshold_caps_distance() {
        let policy = RelevancePolicy::default();
        assert_eq!(
            policy.threshold(100, 1.0),
            policy.threshold(MAX_DISTANCE, 1.0)
        );
    }

    #[test]
    fn test_sensitivity_scales_threshold() {
        let strict = RelevancePolicy::new(1.0);
        let loose = RelevancePolicy::new(2.0);
        assert!(
            (loose.threshold(4, 1.0) * 2.0 - strict.threshold(4, 1.0)).abs() < 1e-12
        );
    }

    #[test]
    fn test_large_delta_always_relevant() {
        let policy = RelevancePolicy::default();
        let bound = policy.threshold(0, OWN_PREVIOUS_WEIGHT);
        let corner = Point::new(1, 1);
        let far = Point::new(19, 19);
        let moves = history(far, Point::new(19, 18), Point::new(18, 19));

        assert!(policy.is_relevant(bound, corner, &moves));
        assert!(policy.is_relevant(bound + 0.01, corner, &moves));
    }

    #[test]
    fn test_small_delta_far_away_is_not_relevant() {
        let policy = RelevancePolicy::default();
        let moves = history(Point::new(16, 16), Point::new(16, 4), Point::new(4, 16));
        assert!(!policy.is_relevant(0.04, Point::new(4, 4), &moves));
    }

    #[test]
    fn test_small_delta_next_to_current_move_is_relevant() {
        let policy = RelevancePolicy::default();
        let moves = history(Point::new(16, 16), Point::new(4, 4), Point::new(4, 16));
        assert!(policy.is_relevant(0.032, Point::new(16, 15), &moves));
        assert!(!policy.is_relevant(0.029, Point::new(16, 15), &moves));
    }

    #[test]
    fn test_any_relation_suffices() {
        let policy = RelevancePolicy::default();
        let suggestion = Point::new(4, 4);
        // far from the current move, on top of the opponent's previous move
        let moves = history(Point::new(16, 16), suggestion, Point::new(16, 4));
        let delta = policy.threshold(0, OPPONENT_PREVIOUS_WEIGHT);

        let distance = suggestion.distance(moves.current);
        assert!(delta < policy.threshold(distance, CURRENT_MOVE_WEIGHT));
        assert!(policy.is_relevant(delta, suggestion, &moves));
    }
}
