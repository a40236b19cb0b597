use thiserror::Error;
use tracing::debug;

use crate::problem::{Constraint, ConstraintSystem, Point};

/// Where a candidate corner point came from
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Origin,
    /// Axis intercept `y = 0` of the constraint at this index
    XIntercept(usize),
    /// Axis intercept `x = 0` of the constraint at this index
    YIntercept(usize),
    /// Crossing of the two constraint lines
    Intersection,
}

/// A candidate corner point, tagged with whether it lies in the feasible region
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub point: Point,
    pub source: CandidateSource,
    pub feasible: bool,
}

/// The two constraint lines are parallel or coincident, so they have no
/// unique crossing point.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("constraint lines are parallel or coincident (determinant {determinant:e})")]
pub struct DegenerateSystem {
    pub determinant: f64,
}

/// Solves `a₁x + b₁y = c₁`, `a₂x + b₂y = c₂` by Cramer's rule.
///
/// The determinant is compared against `tol` scaled by the size of its two
/// products, so the verdict does not change when every coefficient is scaled.
pub fn intersect(first: &Constraint, second: &Constraint, tol: f64) -> Result<Point, DegenerateSystem> {
    let ad = first.a() * second.b();
    let bc = second.a() * first.b();
    let determinant = ad - bc;

    if determinant.abs() <= tol * ad.abs().max(bc.abs()) {
        return Err(DegenerateSystem { determinant });
    }

    let x = (first.c() * second.b() - second.c() * first.b()) / determinant;
    let y = (first.a() * second.c() - second.a() * first.c()) / determinant;
    Ok(Point::new(x, y))
}

/// Generates the corner points of the feasible region of a [`ConstraintSystem`]
pub struct VertexEnumerator<'a> {
    system: &'a ConstraintSystem,
}

impl<'a> VertexEnumerator<'a> {
    pub fn new(system: &'a ConstraintSystem) -> Self {
        Self { system }
    }

    /// Every candidate considered, in generation order, including the ones
    /// rejected as infeasible.
    ///
    /// Intercepts along an axis the constraint never reaches are not
    /// generated, and neither is the intersection of a degenerate system.
    pub fn candidates(&self) -> Vec<Candidate> {
        let tol = self.system.tolerance();
        let mut candidates = vec![Candidate {
            point: Point::ORIGIN,
            source: CandidateSource::Origin,
            feasible: true,
        }];

        for (index, constraint) in self.system.constraints().iter().enumerate() {
            let other = self.system.other(index);

            if let Some(x) = constraint.x_intercept(tol) {
                let point = Point::new(x, 0.0);
                candidates.push(Candidate {
                    point,
                    source: CandidateSource::XIntercept(index),
                    feasible: other.holds(point, tol),
                });
            }

            if let Some(y) = constraint.y_intercept(tol) {
                let point = Point::new(0.0, y);
                candidates.push(Candidate {
                    point,
                    source: CandidateSource::YIntercept(index),
                    feasible: other.holds(point, tol),
                });
            }
        }

        let [first, second] = self.system.constraints();
        match intersect(first, second, tol) {
            Ok(point) => {
                let feasible = point.x >= -tol && point.y >= -tol;
                candidates.push(Candidate {
                    point: if feasible { point.clamp_to_quadrant() } else { point },
                    source: CandidateSource::Intersection,
                    feasible,
                });
            }
            Err(degenerate) => {
                debug!(
                    first = first.name(),
                    second = second.name(),
                    determinant = degenerate.determinant,
                    "Skipping intersection candidate: {}",
                    degenerate
                );
            }
        }

        for candidate in &candidates {
            debug!(
                x = candidate.point.x,
                y = candidate.point.y,
                source = ?candidate.source,
                feasible = candidate.feasible,
                "Candidate corner point"
            );
        }

        candidates
    }

    /// Feasible corner points, deduplicated within tolerance and sorted
    /// lexicographically by (x, y).
    pub fn vertices(&self) -> Vec<Point> {
        let tol = self.system.tolerance();
        let mut vertices: Vec<Point> = Vec::with_capacity(6);

        for candidate in self.candidates().into_iter().filter(|c| c.feasible) {
            let point = candidate.point.clamp_to_quadrant();
            if !vertices.iter().any(|v| v.approx_eq(&point, tol)) {
                vertices.push(point);
            }
        }

        vertices.sort_by(Point::lexicographic);
        vertices
    }
}
