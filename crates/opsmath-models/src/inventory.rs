//! Economic order quantity with a reorder point.

use thiserror::Error;
use tracing::debug;

/// Operating days per year when none are given
pub const DEFAULT_OPERATING_DAYS: f64 = 360.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Invalid parameter {parameter}: {value} {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryParams {
    /// Units demanded per year (D)
    pub annual_demand: f64,
    /// Cost of placing one order (S)
    pub order_cost: f64,
    /// Cost of holding one unit for a year (H)
    pub holding_cost: f64,
    /// Days between placing an order and receiving it
    pub lead_time_days: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_operating_days"))]
    pub operating_days: f64,
}

#[cfg(feature = "serde")]
fn default_operating_days() -> f64 {
    DEFAULT_OPERATING_DAYS
}

/// Order policy minimizing annual ordering plus holding cost
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryPolicy {
    /// Economic order quantity
    pub eoq: f64,
    pub orders_per_year: f64,
    /// Annual cost of placing orders
    pub ordering_cost: f64,
    /// Annual cost of holding the average stock
    pub holding_cost: f64,
    pub total_cost: f64,
    pub daily_demand: f64,
    /// Stock level at which to place the next order
    pub reorder_point: f64,
    /// Days between consecutive orders
    pub cycle_days: f64,
}

/// Annual costs when ordering `quantity` at a time
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSample {
    pub quantity: f64,
    pub holding: f64,
    pub ordering: f64,
    pub total: f64,
}

impl InventoryParams {
    pub fn new(annual_demand: f64, order_cost: f64, holding_cost: f64, lead_time_days: f64) -> Self {
        Self {
            annual_demand,
            order_cost,
            holding_cost,
            lead_time_days,
            operating_days: DEFAULT_OPERATING_DAYS,
        }
    }

    pub fn with_operating_days(mut self, days: f64) -> Self {
        self.operating_days = days;
        self
    }

    /// Computes the EOQ policy.
    ///
    /// Zero demand, zero ordering cost or zero holding cost leave no
    /// trade-off to optimize, and the policy is all zeros.
    pub fn policy(&self) -> Result<InventoryPolicy, InventoryError> {
        self.validate()?;

        let d = self.annual_demand;
        let s = self.order_cost;
        let h = self.holding_cost;
        if d <= 0.0 || s <= 0.0 || h <= 0.0 {
            debug!(d, s, h, "No ordering trade-off, returning empty policy");
            return Ok(InventoryPolicy::default());
        }

        let eoq = (2.0 * d * s / h).sqrt();
        let orders_per_year = d / eoq;
        let ordering_cost = orders_per_year * s;
        let holding_cost = eoq / 2.0 * h;
        let daily_demand = d / self.operating_days;

        let policy = InventoryPolicy {
            eoq,
            orders_per_year,
            ordering_cost,
            holding_cost,
            total_cost: ordering_cost + holding_cost,
            daily_demand,
            reorder_point: daily_demand * self.lead_time_days,
            cycle_days: self.operating_days / orders_per_year,
        };
        debug!(eoq = policy.eoq, reorder_point = policy.reorder_point, "Computed inventory policy");
        Ok(policy)
    }

    /// Cost curve from a tenth of the EOQ to twice the EOQ (1 to 2 units
    /// when there is no EOQ).
    pub fn cost_curve(&self, samples: usize) -> Result<Vec<CostSample>, InventoryError> {
        let eoq = self.policy()?.eoq;
        let (start, end) = if eoq > 0.0 { (eoq * 0.1, eoq * 2.0) } else { (1.0, 2.0) };
        let samples = samples.max(2);

        Ok((0..samples)
            .map(|i| {
                let quantity = start + (end - start) * i as f64 / (samples - 1) as f64;
                let holding = quantity / 2.0 * self.holding_cost;
                let ordering = self.annual_demand / quantity * self.order_cost;
                CostSample {
                    quantity,
                    holding,
                    ordering,
                    total: holding + ordering,
                }
            })
            .collect())
    }

    fn validate(&self) -> Result<(), InventoryError> {
        let fields = [
            ("annual_demand", self.annual_demand),
            ("order_cost", self.order_cost),
            ("holding_cost", self.holding_cost),
            ("lead_time_days", self.lead_time_days),
        ];
        for (parameter, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(InventoryError::InvalidParameter {
                    parameter,
                    value,
                    reason: "must be a nonnegative number",
                });
            }
        }
        if !self.operating_days.is_finite() || self.operating_days <= 0.0 {
            return Err(InventoryError::InvalidParameter {
                parameter: "operating_days",
                value: self.operating_days,
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> InventoryParams {
        InventoryParams::new(1200.0, 500_000.0, 25_000.0, 14.0)
    }

    #[test]
    fn test_coffee_shop_policy() {
        let policy = coffee().policy().unwrap();

        // sqrt(2 * 1200 * 500000 / 25000) = sqrt(48000)
        assert!((policy.eoq - 219.089023).abs() < 1e-5, "eoq = {}", policy.eoq);
        assert!((policy.reorder_point - 46.666667).abs() < 1e-5, "rop = {}", policy.reorder_point);
        assert!((policy.daily_demand - 10.0 / 3.0).abs() < 1e-9);
        // At the EOQ ordering and holding costs balance
        assert!((policy.ordering_cost - policy.holding_cost).abs() < 1e-6);
        assert!((policy.total_cost - 2.0 * policy.holding_cost).abs() < 1e-6);
        assert!((policy.cycle_days - 360.0 / policy.orders_per_year).abs() < 1e-9);
    }

    #[test]
    fn test_zero_holding_cost_is_empty_policy() {
        let params = InventoryParams::new(1200.0, 500_000.0, 0.0, 14.0);
        assert_eq!(params.policy().unwrap(), InventoryPolicy::default());

        let params = InventoryParams::new(1200.0, 0.0, 25_000.0, 14.0);
        assert_eq!(params.policy().unwrap(), InventoryPolicy::default());
    }

    #[test]
    fn test_invalid_parameters() {
        let err = InventoryParams::new(-1.0, 1.0, 1.0, 1.0).policy().unwrap_err();
        assert!(err.to_string().contains("annual_demand"), "message: {}", err);

        let err = coffee().with_operating_days(0.0).policy().unwrap_err();
        assert!(err.to_string().contains("operating_days"), "message: {}", err);
    }

    #[test]
    fn test_cost_curve_minimum_near_eoq() {
        let params = coffee();
        let eoq = params.policy().unwrap().eoq;
        let curve = params.cost_curve(100).unwrap();

        assert_eq!(curve.len(), 100);
        assert!((curve[0].quantity - eoq * 0.1).abs() < 1e-9);
        assert!((curve[99].quantity - eoq * 2.0).abs() < 1e-9);

        let cheapest = curve
            .iter()
            .min_by(|a, b| a.total.total_cmp(&b.total))
            .unwrap();
        assert!((cheapest.quantity - eoq).abs() < eoq * 0.05, "cheapest at {}", cheapest.quantity);
    }

    #[test]
    fn test_cost_curve_without_eoq() {
        let params = InventoryParams::new(0.0, 500_000.0, 25_000.0, 14.0);
        let curve = params.cost_curve(2).unwrap();
        assert_eq!(curve[0].quantity, 1.0);
        assert_eq!(curve[1].quantity, 2.0);
        assert_eq!(curve[0].ordering, 0.0);
    }
}
