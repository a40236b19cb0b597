//! Closed-form operations models that sit next to the production solver:
//! EOQ inventory policy, the M/M/1 queue and series-system reliability.

pub mod inventory;
pub mod queue;
pub mod reliability;

pub use inventory::{CostSample, InventoryError, InventoryParams, InventoryPolicy};
pub use queue::{QueueError, QueueMetrics, SingleServerQueue};
pub use reliability::{Component, ReliabilityError, SeriesReliability};
