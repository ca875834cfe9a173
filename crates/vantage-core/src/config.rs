//! Analytics configuration
//!
//! Every weight and threshold feeding the analytics engine lives here, as an
//! explicit immutable value passed into each computation. Nothing reads module
//! globals, so computations stay pure and independently testable.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit TOML file passed via `--config`
//! 2. Built-in defaults (documented on each field)

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weights must sum to 1.0 within this tolerance
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Direction in which a KPI metric improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    /// Larger values are better (accuracy, adoption, revenue)
    #[default]
    HigherIsBetter,
    /// Smaller values are better (error rate, latency, cost per call)
    LowerIsBetter,
}

/// How to score a health dimension that has no underlying records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoDataPolicy {
    /// Missing data scores the dimension at 100 (absence is not penalized)
    #[default]
    Neutral,
    /// Missing data scores the dimension at 0
    Penalize,
}

impl NoDataPolicy {
    /// Dimension score to substitute when no records exist
    pub fn dimension_score(&self) -> f64 {
        match self {
            Self::Neutral => 100.0,
            Self::Penalize => 0.0,
        }
    }
}

/// Weights for the four health score dimensions
///
/// Must sum to 1.0; rejected by `validate()` otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthWeights {
    pub status: f64,
    pub risk: f64,
    pub budget: f64,
    pub kpi: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            status: 0.25,
            risk: 0.25,
            budget: 0.25,
            kpi: 0.25,
        }
    }
}

impl HealthWeights {
    pub fn sum(&self) -> f64 {
        self.status + self.risk + self.budget + self.kpi
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("status", self.status),
            ("risk", self.risk),
            ("budget", self.budget),
            ("kpi", self.kpi),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(Error::Config(format!(
                    "health weight '{}' must be within [0, 1], got {}",
                    name, w
                )));
            }
        }
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(Error::Config(format!(
                "health weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// Configuration for the analytics engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Health score dimension weights
    pub weights: HealthWeights,
    /// Relative change within which a KPI series counts as stable (default 0.05)
    pub trend_tolerance: f64,
    /// Variance ratio at which the budget dimension bottoms out at 0 (default 0.5)
    pub budget_saturation: f64,
    /// Achievement percentage below which a KPI is underperforming (default 70)
    pub underperformance_threshold: f64,
    /// Scoring policy for dimensions with no records
    pub no_data_policy: NoDataPolicy,
    /// Per-metric improvement direction, keyed by metric name
    pub metric_directions: HashMap<String, MetricDirection>,
    /// Monetary value per unit of a KPI metric, keyed by metric name.
    /// When present, ROI value generation uses these instead of the
    /// achievement-rate proxy.
    pub kpi_unit_values: HashMap<String, f64>,
    /// Estimated monthly return per project, keyed by project name.
    /// Enables payback-period estimates in ROI output.
    pub monthly_return_estimates: HashMap<String, f64>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weights: HealthWeights::default(),
            trend_tolerance: 0.05,
            budget_saturation: 0.5,
            underperformance_threshold: 70.0,
            no_data_policy: NoDataPolicy::default(),
            metric_directions: HashMap::new(),
            kpi_unit_values: HashMap::new(),
            monthly_return_estimates: HashMap::new(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                let config: AnalyticsConfig = toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("{}: {}", p.display(), e)))?;
                tracing::debug!(path = %p.display(), "Loaded analytics config");
                config
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all weights and thresholds before any computation runs
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.trend_tolerance < 0.0 {
            return Err(Error::Config(format!(
                "trend_tolerance must be non-negative, got {}",
                self.trend_tolerance
            )));
        }
        if self.budget_saturation <= 0.0 {
            return Err(Error::Config(format!(
                "budget_saturation must be positive, got {}",
                self.budget_saturation
            )));
        }
        if self.underperformance_threshold < 0.0 {
            return Err(Error::Config(format!(
                "underperformance_threshold must be non-negative, got {}",
                self.underperformance_threshold
            )));
        }
        Ok(())
    }

    /// Improvement direction for a metric (case-insensitive lookup)
    pub fn direction_for(&self, metric_name: &str) -> MetricDirection {
        self.metric_directions
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(metric_name))
            .map(|(_, d)| *d)
            .unwrap_or_default()
    }

    /// Monetary value per unit for a metric, if configured
    pub fn unit_value_for(&self, metric_name: &str) -> Option<f64> {
        self.kpi_unit_values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(metric_name))
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = HealthWeights {
            status: 0.3,
            risk: 0.3,
            budget: 0.3,
            kpi: 0.3,
        };
        assert!(weights.validate().is_err());

        let weights = HealthWeights {
            status: 0.3,
            risk: 0.3,
            budget: 0.2,
            kpi: 0.2,
        };
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_reject_out_of_range() {
        let weights = HealthWeights {
            status: 1.5,
            risk: -0.5,
            budget: 0.0,
            kpi: 0.0,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
trend_tolerance = 0.1

[weights]
status = 0.3
risk = 0.3
budget = 0.2
kpi = 0.2

[metric_directions]
"Error Rate" = "lower_is_better"

[kpi_unit_values]
"Tickets Deflected" = 4.5
"#
        )
        .unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.weights.status, 0.3);
        assert_eq!(config.trend_tolerance, 0.1);
        assert_eq!(
            config.direction_for("error rate"),
            MetricDirection::LowerIsBetter
        );
        assert_eq!(config.unit_value_for("tickets deflected"), Some(4.5));
        // Unlisted metrics fall back to defaults
        assert_eq!(
            config.direction_for("Accuracy"),
            MetricDirection::HigherIsBetter
        );
        assert_eq!(config.unit_value_for("Accuracy"), None);
    }

    #[test]
    fn test_load_rejects_invalid_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[weights]
status = 0.5
risk = 0.5
budget = 0.5
kpi = 0.5
"#
        )
        .unwrap();
        assert!(AnalyticsConfig::load(Some(file.path())).is_err());
    }
}
