use tracing::debug;

use crate::problem::{Objective, Point};

/// Rounding noise allowance for large coordinates, in units of the last place
const SNAP_ULPS: f64 = 16.0;

/// A corner point and the profit earned there
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredVertex {
    pub point: Point,
    pub profit: f64,
}

/// Scores corner points against the objective and picks the best one
pub struct ObjectiveEvaluator<'a> {
    objective: &'a Objective,
    tolerance: f64,
}

impl<'a> ObjectiveEvaluator<'a> {
    pub fn new(objective: &'a Objective, tolerance: f64) -> Self {
        Self { objective, tolerance }
    }

    pub fn score(&self, vertices: &[Point]) -> Vec<ScoredVertex> {
        vertices
            .iter()
            .map(|&point| ScoredVertex {
                point,
                profit: self.objective.value(point),
            })
            .collect()
    }

    /// Picks the most profitable vertex.
    ///
    /// A vertex only displaces the incumbent when it is better by more than
    /// the tolerance, so among tied vertices the earliest one in `scored`
    /// order wins.
    pub fn select(&self, scored: &[ScoredVertex]) -> Option<ScoredVertex> {
        let mut best: Option<ScoredVertex> = None;

        for &vertex in scored {
            let replace = match best {
                Some(incumbent) => self.beats(vertex.profit, incumbent.profit),
                None => true,
            };
            if replace {
                best = Some(vertex);
            }
        }

        if let Some(chosen) = &best {
            debug!(x = chosen.point.x, y = chosen.point.y, profit = chosen.profit, "Selected vertex");
        }
        best
    }

    /// Floors both coordinates to whole units.
    ///
    /// This is deliberately not integer programming: the floored point is
    /// feasible but may be beaten by another integer point.
    pub fn truncate(&self, point: Point) -> (u64, u64) {
        (whole_units(point.x, self.tolerance), whole_units(point.y, self.tolerance))
    }

    fn beats(&self, challenger: f64, incumbent: f64) -> bool {
        challenger > incumbent + self.tolerance * incumbent.abs().max(1.0)
    }
}

/// Floor to a nonnegative integer, snapping values within rounding noise of
/// an integer onto it first so that 79.99999999999999 counts as 80.
///
/// The snap window is `tol` in absolute terms, widened to a few ULPs for
/// values so large that `tol` is below their precision. It never grows to
/// cover a real fractional part.
fn whole_units(value: f64, tol: f64) -> u64 {
    let nearest = value.round();
    let window = tol.max(SNAP_ULPS * f64::EPSILON * value.abs());
    let snapped = if (value - nearest).abs() <= window {
        nearest
    } else {
        value.floor()
    };
    snapped.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::DEFAULT_TOLERANCE;

    #[test]
    fn test_selects_highest_profit() {
        let objective = Objective::new(3.0, 2.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        let scored = evaluator.score(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 3.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 0.0),
        ]);

        let best = evaluator.select(&scored).unwrap();
        assert_eq!(best.point, Point::new(3.0, 1.0));
        assert!((best.profit - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_in_order() {
        // x + y is 4 at both (0, 4) and (4, 0)
        let objective = Objective::new(1.0, 1.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        let scored = evaluator.score(&[Point::new(0.0, 0.0), Point::new(0.0, 4.0), Point::new(4.0, 0.0)]);

        assert_eq!(evaluator.select(&scored).unwrap().point, Point::new(0.0, 4.0));
    }

    #[test]
    fn test_rounding_noise_does_not_break_ties() {
        let objective = Objective::new(0.1, 0.1);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        let scored = [
            ScoredVertex { point: Point::new(0.0, 3.0), profit: 0.30000000000000004 },
            ScoredVertex { point: Point::new(3.0, 0.0), profit: 0.30000000000000010 },
        ];
        assert_eq!(evaluator.select(&scored).unwrap().point, Point::new(0.0, 3.0));
    }

    #[test]
    fn test_zero_objective_picks_first_vertex() {
        let objective = Objective::new(0.0, 0.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        let scored = evaluator.score(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert_eq!(evaluator.select(&scored).unwrap().point, Point::ORIGIN);
    }

    #[test]
    fn test_empty_selection() {
        let objective = Objective::new(1.0, 1.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        assert!(evaluator.select(&[]).is_none());
    }

    #[test]
    fn test_truncation_floors() {
        let objective = Objective::new(1.0, 1.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        assert_eq!(evaluator.truncate(Point::new(12.7, 9.3)), (12, 9));
        assert_eq!(evaluator.truncate(Point::new(0.999, 0.0)), (0, 0));
    }

    #[test]
    fn test_truncation_snaps_float_noise() {
        let objective = Objective::new(1.0, 1.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        assert_eq!(evaluator.truncate(Point::new(79.99999999999999, 29.999999999999996)), (80, 30));
    }

    #[test]
    fn test_truncation_floors_large_fractions() {
        let objective = Objective::new(1.0, 0.0);
        let evaluator = ObjectiveEvaluator::new(&objective, DEFAULT_TOLERANCE);
        assert_eq!(evaluator.truncate(Point::new(123_456_789.9, 0.0)), (123_456_789, 0));
        assert_eq!(evaluator.truncate(Point::new(0.0, 5_000_000.5)), (0, 5_000_000));

        // One ULP below a large integer is still noise
        let below = f64::from_bits(123_456_790.0f64.to_bits() - 1);
        assert_eq!(evaluator.truncate(Point::new(below, 0.0)), (123_456_790, 0));
    }
}
