use thiserror::Error;

use crate::region::FeasibleRegion;

/// Default tolerance for floating point comparisons
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid parameter {parameter}: {value} {reason}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        reason: &'static str,
    },
}

/// A point in the (x, y) production plane
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Equality within `tol`, scaled by coordinate magnitude
    pub fn approx_eq(&self, other: &Point, tol: f64) -> bool {
        approx_eq(self.x, other.x, tol) && approx_eq(self.y, other.y, tol)
    }

    /// Lexicographic total order on (x, y)
    pub fn lexicographic(&self, other: &Point) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }

    /// Snaps non-positive coordinates (including `-0.0`) to `0.0`.
    pub(crate) fn clamp_to_quadrant(self) -> Self {
        let clamp = |v: f64| if v <= 0.0 { 0.0 } else { v };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }
}

/// A resource constraint `a·x + b·y ≤ c`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name of the limited resource (for reporting and diagnostics)
    name: String,
    /// Usage of the resource per unit of x
    a: f64,
    /// Usage of the resource per unit of y
    b: f64,
    /// Available amount of the resource
    c: f64,
}

impl Constraint {
    pub fn new(name: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self {
            name: name.into(),
            a,
            b,
            c,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Resource consumed at `point`
    pub fn lhs(&self, point: Point) -> f64 {
        self.a * point.x + self.b * point.y
    }

    /// Whether `point` respects this constraint within `tol`
    pub fn holds(&self, point: Point, tol: f64) -> bool {
        approx_le(self.lhs(point), self.c, tol)
    }

    /// Whether producing x consumes this resource. A coefficient counts as
    /// zero when it is within `tol` of the constraint's larger coefficient.
    pub fn limits_x(&self, tol: f64) -> bool {
        self.a > tol * self.a.max(self.b)
    }

    /// Whether producing y consumes this resource
    pub fn limits_y(&self, tol: f64) -> bool {
        self.b > tol * self.a.max(self.b)
    }

    /// Where the constraint line meets the x axis, `None` when it never does.
    pub fn x_intercept(&self, tol: f64) -> Option<f64> {
        self.limits_x(tol).then(|| self.c / self.a)
    }

    /// Where the constraint line meets the y axis, `None` when it never does.
    pub fn y_intercept(&self, tol: f64) -> Option<f64> {
        self.limits_y(tol).then(|| self.c / self.b)
    }

    fn validate(&self) -> Result<(), SolveError> {
        check_nonnegative(|| format!("{}.a", self.name), self.a)?;
        check_nonnegative(|| format!("{}.b", self.name), self.b)?;
        check_nonnegative(|| format!("{}.c", self.name), self.c)
    }
}

/// Per-unit profit of each product
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    pub px: f64,
    pub py: f64,
}

impl Objective {
    pub fn new(px: f64, py: f64) -> Self {
        Self { px, py }
    }

    pub fn value(&self, point: Point) -> f64 {
        self.px * point.x + self.py * point.y
    }

    fn validate(&self) -> Result<(), SolveError> {
        check_nonnegative(|| "objective.px".to_string(), self.px)?;
        check_nonnegative(|| "objective.py".to_string(), self.py)
    }
}

/// Two validated resource constraints over the nonnegative quadrant plus the
/// profit objective.
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    constraints: [Constraint; 2],
    objective: Objective,
    tolerance: f64,
}

impl ConstraintSystem {
    /// Validates every coefficient before anything is computed. The first
    /// offending parameter is reported by name.
    pub fn new(
        constraints: [Constraint; 2],
        objective: Objective,
        tolerance: f64,
    ) -> Result<Self, SolveError> {
        check_nonnegative(|| "tolerance".to_string(), tolerance)?;
        for constraint in &constraints {
            constraint.validate()?;
        }
        objective.validate()?;

        Ok(Self {
            constraints,
            objective,
            tolerance,
        })
    }

    pub fn constraints(&self) -> &[Constraint; 2] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The constraint that is not `index`
    pub fn other(&self, index: usize) -> &Constraint {
        &self.constraints[1 - index]
    }

    pub fn is_feasible(&self, point: Point) -> bool {
        point.x >= -self.tolerance
            && point.y >= -self.tolerance
            && self.constraints.iter().all(|c| c.holds(point, self.tolerance))
    }

    /// Some constraint limits x
    pub fn is_bounded_x(&self) -> bool {
        self.constraints.iter().any(|c| c.limits_x(self.tolerance))
    }

    /// Some constraint limits y
    pub fn is_bounded_y(&self) -> bool {
        self.constraints.iter().any(|c| c.limits_y(self.tolerance))
    }

    pub fn is_bounded(&self) -> bool {
        self.is_bounded_x() && self.is_bounded_y()
    }

    pub fn region(&self) -> FeasibleRegion<'_> {
        FeasibleRegion::new(self)
    }
}

fn check_nonnegative(parameter: impl FnOnce() -> String, value: f64) -> Result<(), SolveError> {
    let reason = if !value.is_finite() {
        "must be a finite number"
    } else if value < 0.0 {
        "must not be negative"
    } else {
        return Ok(());
    };
    Err(SolveError::InvalidParameter {
        parameter: parameter(),
        value,
        reason,
    })
}

fn scale(a: f64, b: f64) -> f64 {
    a.abs().max(b.abs()).max(1.0)
}

pub(crate) fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * scale(a, b)
}

pub(crate) fn approx_le(lhs: f64, rhs: f64, tol: f64) -> bool {
    lhs <= rhs + tol * scale(lhs, rhs)
}
