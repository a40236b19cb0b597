use crate::problem::{Constraint, ConstraintSystem, Point};

/// The set of plans satisfying both constraints and nonnegativity.
///
/// Never materialized; it answers membership queries and produces chart
/// samples of its upper boundary.
pub struct FeasibleRegion<'a> {
    system: &'a ConstraintSystem,
}

/// One column of the region chart at a given `x`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierSample {
    pub x: f64,
    /// Height of each constraint line, `None` for lines parallel to the y axis
    pub lines: [Option<f64>; 2],
    /// Top of the feasible region, `None` when no line caps it
    pub upper: Option<f64>,
}

impl<'a> FeasibleRegion<'a> {
    pub fn new(system: &'a ConstraintSystem) -> Self {
        Self { system }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.system.is_feasible(point)
    }

    /// Right edge of the chart: 10% past the furthest x intercept, or 1 when
    /// some constraint never meets the x axis.
    pub fn chart_width(&self) -> f64 {
        let tol = self.system.tolerance();
        let intercepts: Option<Vec<f64>> = self
            .system
            .constraints()
            .iter()
            .map(|c| c.x_intercept(tol))
            .collect();

        match intercepts {
            Some(xs) => {
                let furthest = xs.into_iter().fold(0.0, f64::max);
                if furthest > 0.0 { furthest * 1.1 } else { 1.0 }
            }
            None => 1.0,
        }
    }

    /// Evenly spaced samples of both constraint lines and the region's upper
    /// boundary across [`chart_width`](Self::chart_width).
    pub fn frontier(&self, samples: usize) -> Vec<FrontierSample> {
        let tol = self.system.tolerance();
        let width = self.chart_width();
        let samples = samples.max(2);
        let [first, second] = self.system.constraints();

        (0..samples)
            .map(|i| {
                let x = width * i as f64 / (samples - 1) as f64;
                let line = |c: &Constraint| c.limits_y(tol).then(|| (c.c() - c.a() * x) / c.b());
                let lines = [line(first), line(second)];

                // Vertical constraints cut the region off even where no line caps it
                let upper = if self.system.is_feasible(Point::new(x, 0.0)) {
                    lines.iter().flatten().copied().reduce(f64::min).map(|y| y.max(0.0))
                } else {
                    Some(0.0)
                };

                FrontierSample { x, lines, upper }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Objective, DEFAULT_TOLERANCE};

    fn furniture() -> ConstraintSystem {
        ConstraintSystem::new(
            [
                Constraint::new("hours", 6.0, 2.0, 240.0),
                Constraint::new("wood", 4.0, 1.5, 120.0),
            ],
            Objective::new(750_000.0, 300_000.0),
            DEFAULT_TOLERANCE,
        )
        .unwrap()
    }

    #[test]
    fn test_contains() {
        let system = furniture();
        let region = system.region();
        assert!(region.contains(Point::new(10.0, 10.0)));
        assert!(region.contains(Point::new(0.0, 80.0)));
        assert!(!region.contains(Point::new(0.0, 81.0)));
        assert!(!region.contains(Point::new(-0.5, 1.0)));
    }

    #[test]
    fn test_frontier_spans_past_furthest_intercept() {
        let system = furniture();
        let samples = system.region().frontier(5);

        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].x, 0.0);
        assert!((samples[4].x - 44.0).abs() < 1e-9);

        let start = samples[0];
        assert!((start.lines[0].unwrap() - 120.0).abs() < 1e-9);
        assert!((start.lines[1].unwrap() - 80.0).abs() < 1e-9);
        assert!((start.upper.unwrap() - 80.0).abs() < 1e-9);

        // Past x = 30 the wood line is below zero
        assert_eq!(samples[4].upper, Some(0.0));
    }

    #[test]
    fn test_frontier_without_x_intercept() {
        let system = ConstraintSystem::new(
            [
                Constraint::new("y_cap", 0.0, 1.0, 5.0),
                Constraint::new("wood", 4.0, 1.5, 120.0),
            ],
            Objective::new(1.0, 1.0),
            DEFAULT_TOLERANCE,
        )
        .unwrap();
        let samples = system.region().frontier(3);
        assert!((samples[2].x - 1.0).abs() < 1e-9);
        assert!((samples[0].upper.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_frontier_vertical_constraints_only() {
        let system = ConstraintSystem::new(
            [
                Constraint::new("press", 2.0, 0.0, 10.0),
                Constraint::new("oven", 1.0, 0.0, 4.0),
            ],
            Objective::new(1.0, 1.0),
            DEFAULT_TOLERANCE,
        )
        .unwrap();
        let samples = system.region().frontier(3);
        // width 5.5: x = 0, 2.75, 5.5; only the first two are inside x <= 4
        assert_eq!(samples[0].upper, None);
        assert_eq!(samples[1].upper, None);
        assert_eq!(samples[2].upper, Some(0.0));
    }

    #[test]
    fn test_frontier_minimum_two_samples() {
        let system = furniture();
        assert_eq!(system.region().frontier(0).len(), 2);
    }
}
