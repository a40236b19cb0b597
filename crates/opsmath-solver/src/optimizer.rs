use tracing::{debug, warn};

use crate::evaluate::{ObjectiveEvaluator, ScoredVertex};
use crate::problem::{Constraint, ConstraintSystem, Objective, Point, SolveError, DEFAULT_TOLERANCE};
use crate::solution::{ResourceUsage, SolveResult};
use crate::vertex::VertexEnumerator;

/// Production planner for two products sharing two limited resources
#[derive(Debug, Clone, Copy)]
pub struct ProductionOptimizer {
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for ProductionOptimizer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ProductionOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comparison tolerance. A non-finite value is rejected when
    /// the system is validated.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol.abs();
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validate, enumerate corner points, pick the best and report resource
    /// usage at the truncated plan.
    pub fn solve(&self, constraints: &[Constraint; 2], objective: &Objective) -> Result<SolveResult, SolveError> {
        let system = ConstraintSystem::new(constraints.clone(), *objective, self.tolerance)?;
        Ok(self.solve_system(&system))
    }

    /// Solve an already validated system. Never fails: degenerate geometry
    /// falls back to the remaining corners, and at worst to the origin.
    pub fn solve_system(&self, system: &ConstraintSystem) -> SolveResult {
        let objective = system.objective();
        let vertices = VertexEnumerator::new(system).vertices();

        let evaluator = ObjectiveEvaluator::new(objective, self.tolerance);
        let scored = evaluator.score(&vertices);
        let continuous = evaluator.select(&scored).unwrap_or(ScoredVertex {
            point: Point::ORIGIN,
            profit: 0.0,
        });

        let (x, y) = evaluator.truncate(continuous.point);
        let plan = Point::new(x as f64, y as f64);

        let usage = system
            .constraints()
            .iter()
            .map(|c| ResourceUsage::new(c.name(), c.lhs(plan), c.c()))
            .collect();

        let bounded = system.is_bounded();
        if !system.is_bounded_x() && objective.px > self.tolerance {
            warn!("No constraint limits x; reporting the best finite corner");
        }
        if !system.is_bounded_y() && objective.py > self.tolerance {
            warn!("No constraint limits y; reporting the best finite corner");
        }

        let result = SolveResult {
            x,
            y,
            profit: objective.value(plan),
            continuous,
            vertices: scored,
            usage,
            bounded,
        };
        debug!(x = result.x, y = result.y, profit = result.profit, "Solved production plan");
        result
    }
}

/// Solve with the default tolerance
pub fn solve(first: Constraint, second: Constraint, objective: Objective) -> Result<SolveResult, SolveError> {
    ProductionOptimizer::new().solve(&[first, second], &objective)
}
