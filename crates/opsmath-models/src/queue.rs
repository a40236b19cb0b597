//! M/M/1 queue: Poisson arrivals, exponential service, one server.

use thiserror::Error;
use tracing::debug;

/// Utilization above which queues grow long enough to hurt service
pub const CONGESTION_THRESHOLD: f64 = 0.85;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueueError {
    #[error("Invalid parameter {parameter}: {value} must be a nonnegative number")]
    InvalidParameter { parameter: &'static str, value: f64 },
    #[error("Unstable queue: service rate {service_rate} must exceed arrival rate {arrival_rate}")]
    UnstableSystem { arrival_rate: f64, service_rate: f64 },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleServerQueue {
    /// Arrivals per unit time (λ)
    pub arrival_rate: f64,
    /// Services per unit time (μ)
    pub service_rate: f64,
}

/// Steady-state performance of the queue. Times are in the unit of the rates.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueMetrics {
    /// ρ = λ/μ
    pub utilization: f64,
    /// L, mean number in the system
    pub in_system: f64,
    /// Lq, mean number waiting
    pub in_queue: f64,
    /// W, mean time in the system
    pub time_in_system: f64,
    /// Wq, mean time waiting
    pub time_in_queue: f64,
    /// P₀, probability the server is idle
    pub idle_probability: f64,
    /// 1/μ
    pub service_time: f64,
}

impl SingleServerQueue {
    pub fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
        }
    }

    /// Steady-state metrics, defined only while service outpaces arrivals.
    pub fn metrics(&self) -> Result<QueueMetrics, QueueError> {
        let lambda = self.arrival_rate;
        let mu = self.service_rate;
        for (parameter, value) in [("arrival_rate", lambda), ("service_rate", mu)] {
            if !value.is_finite() || value < 0.0 {
                return Err(QueueError::InvalidParameter { parameter, value });
            }
        }
        if mu <= lambda {
            return Err(QueueError::UnstableSystem {
                arrival_rate: lambda,
                service_rate: mu,
            });
        }

        let rho = lambda / mu;
        let service_time = 1.0 / mu;
        let time_in_system = service_time / (1.0 - rho);
        let metrics = QueueMetrics {
            utilization: rho,
            in_system: rho / (1.0 - rho),
            in_queue: rho * rho / (1.0 - rho),
            time_in_system,
            time_in_queue: time_in_system - service_time,
            idle_probability: 1.0 - rho,
            service_time,
        };
        debug!(rho, l = metrics.in_system, w = metrics.time_in_system, "Computed queue metrics");
        Ok(metrics)
    }
}

impl QueueMetrics {
    pub fn is_congested(&self) -> bool {
        self.utilization > CONGESTION_THRESHOLD
    }

    /// Share of a customer's time in the system spent waiting rather than
    /// being served, as `(waiting, service)`.
    pub fn time_split(&self) -> (f64, f64) {
        if self.time_in_system <= 0.0 {
            return (0.0, 1.0);
        }
        let waiting = self.time_in_queue / self.time_in_system;
        (waiting, 1.0 - waiting)
    }
}
