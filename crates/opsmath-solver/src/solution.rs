use crate::evaluate::ScoredVertex;

/// The recommended production plan
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Whole units of the first product
    pub x: u64,
    /// Whole units of the second product
    pub y: u64,
    /// Objective value at `(x, y)`, not at the continuous optimum
    pub profit: f64,
    /// The optimal corner point before truncation
    pub continuous: ScoredVertex,
    /// Every feasible corner point in evaluation order
    pub vertices: Vec<ScoredVertex>,
    /// Resource usage at `(x, y)`, one entry per constraint
    pub usage: Vec<ResourceUsage>,
    /// False when some axis is limited by neither constraint. The result is
    /// then only the best finite corner.
    pub bounded: bool,
}

/// How much of a limited resource the plan consumes
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    /// Constraint name
    pub name: String,
    /// Amount consumed (`a·x + b·y`)
    pub used: f64,
    /// Amount available
    pub bound: f64,
    /// `used / bound`, clamped to [0, 1]
    pub utilization: f64,
    /// Amount left over
    pub slack: f64,
}

impl ResourceUsage {
    /// A resource with nothing available reports zero utilization.
    pub fn new(name: impl Into<String>, used: f64, bound: f64) -> Self {
        let utilization = if bound > 0.0 {
            (used / bound).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            name: name.into(),
            used,
            bound,
            utilization,
            slack: bound - used,
        }
    }

    /// Whether the resource is used up
    pub fn is_binding(&self, tol: f64) -> bool {
        self.slack.abs() <= tol * self.bound.abs().max(1.0)
    }
}

impl SolveResult {
    /// Names of the resources with no slack left at the plan
    pub fn binding_constraints(&self, tol: f64) -> Vec<&str> {
        self.usage
            .iter()
            .filter(|u| u.is_binding(tol))
            .map(|u| u.name.as_str())
            .collect()
    }
}
