//! Reliability of components in series: the line stops when any one fails.

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    #[error("A series system needs at least one component")]
    NoComponents,
    #[error("Reliability of {component} must be between 0 and 1, got {value}")]
    InvalidReliability { component: String, value: f64 },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    /// Probability the component works through the period
    pub reliability: f64,
}

impl Component {
    pub fn new(name: impl Into<String>, reliability: f64) -> Self {
        Self {
            name: name.into(),
            reliability,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReliability {
    /// Product of all component reliabilities
    pub system: f64,
    pub failure_probability: f64,
    /// Index of the least reliable component (first one on ties)
    pub weakest_index: usize,
    pub weakest_name: String,
}

impl SeriesReliability {
    pub fn evaluate(components: &[Component]) -> Result<Self, ReliabilityError> {
        if components.is_empty() {
            return Err(ReliabilityError::NoComponents);
        }

        let mut system = 1.0;
        let mut weakest = 0;
        for (index, component) in components.iter().enumerate() {
            let r = component.reliability;
            if !(0.0..=1.0).contains(&r) {
                return Err(ReliabilityError::InvalidReliability {
                    component: component.name.clone(),
                    value: r,
                });
            }
            system *= r;
            if r < components[weakest].reliability {
                weakest = index;
            }
        }

        debug!(system, weakest = components[weakest].name.as_str(), "Evaluated series system");
        Ok(Self {
            system,
            failure_probability: 1.0 - system,
            weakest_index: weakest,
            weakest_name: components[weakest].name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembly_line() -> Vec<Component> {
        vec![
            Component::new("Stamping", 0.98),
            Component::new("Welding", 0.99),
            Component::new("Painting", 0.96),
            Component::new("Assembly", 0.97),
        ]
    }

    #[test]
    fn test_assembly_line() {
        let result = SeriesReliability::evaluate(&assembly_line()).unwrap();

        let expected = 0.98 * 0.99 * 0.96 * 0.97;
        assert!((result.system - expected).abs() < 1e-12);
        assert!((result.system - 0.9035).abs() < 1e-4, "system = {}", result.system);
        assert!((result.failure_probability - (1.0 - expected)).abs() < 1e-12);
        assert_eq!(result.weakest_index, 2);
        assert_eq!(result.weakest_name, "Painting");
    }

    #[test]
    fn test_weakest_tie_picks_first() {
        let components = vec![Component::new("a", 0.9), Component::new("b", 0.8), Component::new("c", 0.8)];
        let result = SeriesReliability::evaluate(&components).unwrap();
        assert_eq!(result.weakest_index, 1);
    }

    #[test]
    fn test_system_never_exceeds_weakest() {
        let result = SeriesReliability::evaluate(&assembly_line()).unwrap();
        assert!(result.system <= 0.96);
    }

    #[test]
    fn test_errors() {
        assert_eq!(SeriesReliability::evaluate(&[]), Err(ReliabilityError::NoComponents));

        let err = SeriesReliability::evaluate(&[Component::new("Welding", 1.2)]).unwrap_err();
        assert!(err.to_string().contains("Welding"), "message: {}", err);
        assert!(SeriesReliability::evaluate(&[Component::new("x", f64::NAN)]).is_err());
    }
}
