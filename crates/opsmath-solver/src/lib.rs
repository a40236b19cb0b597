mod evaluate;
mod optimizer;
mod problem;
mod region;
mod solution;
mod vertex;

pub use evaluate::{ObjectiveEvaluator, ScoredVertex};
pub use optimizer::{solve, ProductionOptimizer};
pub use problem::{Constraint, ConstraintSystem, Objective, Point, SolveError, DEFAULT_TOLERANCE};
pub use region::{FeasibleRegion, FrontierSample};
pub use solution::{ResourceUsage, SolveResult};
pub use vertex::{intersect, Candidate, CandidateSource, DegenerateSystem, VertexEnumerator};
