//! KPI trend classification
//!
//! Compares the first and last observation of a metric's time series and
//! classifies the direction, honoring per-metric improvement direction
//! (an error rate going down is improving, not declining).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{AnalyticsConfig, MetricDirection};
use crate::models::KpiEntry;

use super::PortfolioSnapshot;

/// Classified direction of a KPI series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    /// Fewer than two observations
    InsufficientData,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend classification with the numbers behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub project_id: i64,
    pub metric_name: String,
    pub direction: TrendDirection,
    /// Last observed value minus first observed value
    pub delta: f64,
    /// Delta relative to the first value, None when the series starts at zero
    pub relative_change: Option<f64>,
    pub observations: usize,
}

/// Classify the trend of one metric's observations
///
/// Entries are ordered by recorded date (ties broken by id) before the first
/// and last values are compared; callers need not pre-sort.
pub fn analyze_series(
    project_id: i64,
    metric_name: &str,
    entries: &[&KpiEntry],
    config: &AnalyticsConfig,
) -> TrendAnalysis {
    let mut series: Vec<&KpiEntry> = entries.to_vec();
    series.sort_by(|a, b| {
        a.recorded_date
            .cmp(&b.recorded_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    if series.len() < 2 {
        return TrendAnalysis {
            project_id,
            metric_name: metric_name.to_string(),
            direction: TrendDirection::InsufficientData,
            delta: 0.0,
            relative_change: None,
            observations: series.len(),
        };
    }

    let first = series[0].actual_value;
    let last = series[series.len() - 1].actual_value;
    let delta = last - first;
    let relative_change = if first != 0.0 {
        Some(delta / first.abs())
    } else {
        None
    };

    let stable = match relative_change {
        Some(r) => r.abs() <= config.trend_tolerance,
        // Series starting at zero: any movement is a directional change
        None => delta == 0.0,
    };

    let direction = if stable {
        TrendDirection::Stable
    } else {
        let raised = delta > 0.0;
        match config.direction_for(metric_name) {
            MetricDirection::HigherIsBetter if raised => TrendDirection::Improving,
            MetricDirection::HigherIsBetter => TrendDirection::Declining,
            MetricDirection::LowerIsBetter if raised => TrendDirection::Declining,
            MetricDirection::LowerIsBetter => TrendDirection::Improving,
        }
    };

    TrendAnalysis {
        project_id,
        metric_name: metric_name.to_string(),
        direction,
        delta,
        relative_change,
        observations: series.len(),
    }
}

/// Classify every (project, metric) series in the snapshot,
/// in deterministic key order
pub fn analyze_all(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Vec<TrendAnalysis> {
    let mut series: BTreeMap<(i64, String), Vec<&KpiEntry>> = BTreeMap::new();
    for kpi in &snapshot.kpis {
        series
            .entry((kpi.project_id, kpi.metric_name.clone()))
            .or_default()
            .push(kpi);
    }

    series
        .into_iter()
        .map(|((project_id, metric), entries)| {
            analyze_series(project_id, &metric, &entries, config)
        })
        .collect()
}

/// Count of series per trend direction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrendSummary {
    pub improving: usize,
    pub declining: usize,
    pub stable: usize,
    pub insufficient: usize,
}

pub fn summarize(analyses: &[TrendAnalysis]) -> TrendSummary {
    let mut summary = TrendSummary::default();
    for a in analyses {
        match a.direction {
            TrendDirection::Improving => summary.improving += 1,
            TrendDirection::Declining => summary.declining += 1,
            TrendDirection::Stable => summary.stable += 1,
            TrendDirection::InsufficientData => summary.insufficient += 1,
        }
    }
    summary
}

/// The most recent observation of each (project, metric) series
pub fn latest_observations(snapshot: &PortfolioSnapshot) -> Vec<&KpiEntry> {
    let mut latest: BTreeMap<(i64, String), &KpiEntry> = BTreeMap::new();
    for kpi in &snapshot.kpis {
        let key = (kpi.project_id, kpi.metric_name.clone());
        match latest.get(&key) {
            Some(existing)
                if (existing.recorded_date, existing.id) >= (kpi.recorded_date, kpi.id) => {}
            _ => {
                latest.insert(key, kpi);
            }
        }
    }
    latest.into_values().collect()
}

/// KPIs whose latest achievement rate is below the configured threshold,
/// worst first
pub fn underperforming_kpis<'a>(
    snapshot: &'a PortfolioSnapshot,
    config: &AnalyticsConfig,
) -> Vec<&'a KpiEntry> {
    let mut below: Vec<&KpiEntry> = latest_observations(snapshot)
        .into_iter()
        .filter(|k| {
            k.achievement_rate()
                .map(|r| r < config.underperformance_threshold)
                .unwrap_or(false)
        })
        .collect();
    below.sort_by(|a, b| {
        a.achievement_rate()
            .partial_cmp(&b.achievement_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    below
}

/// Top KPIs by latest achievement rate, best first
pub fn top_performers<'a>(snapshot: &'a PortfolioSnapshot, limit: usize) -> Vec<&'a KpiEntry> {
    let mut latest: Vec<&KpiEntry> = latest_observations(snapshot)
        .into_iter()
        .filter(|k| k.achievement_rate().is_some())
        .collect();
    latest.sort_by(|a, b| {
        b.achievement_rate()
            .partial_cmp(&a.achievement_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    latest.truncate(limit);
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::*;

    fn series(values: &[f64]) -> Vec<KpiEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                kpi(
                    i as i64 + 1,
                    1,
                    "Accuracy",
                    100.0,
                    *v,
                    date(2025, 1, i as u32 + 1),
                )
            })
            .collect()
    }

    fn analyze(values: &[f64], config: &AnalyticsConfig) -> TrendAnalysis {
        let entries = series(values);
        let refs: Vec<&KpiEntry> = entries.iter().collect();
        analyze_series(1, "Accuracy", &refs, config)
    }

    #[test]
    fn test_insufficient_data() {
        let config = AnalyticsConfig::default();
        assert_eq!(
            analyze(&[], &config).direction,
            TrendDirection::InsufficientData
        );
        assert_eq!(
            analyze(&[42.0], &config).direction,
            TrendDirection::InsufficientData
        );
    }

    #[test]
    fn test_stable_within_tolerance() {
        let config = AnalyticsConfig::default();
        let analysis = analyze(&[100.0, 101.0], &config);
        assert_eq!(analysis.direction, TrendDirection::Stable);
        assert_eq!(analysis.delta, 1.0);
        assert_eq!(analysis.relative_change, Some(0.01));
    }

    #[test]
    fn test_improving_beyond_tolerance() {
        let config = AnalyticsConfig::default();
        let analysis = analyze(&[100.0, 130.0], &config);
        assert_eq!(analysis.direction, TrendDirection::Improving);
        assert_eq!(analysis.delta, 30.0);
        assert_eq!(analysis.relative_change, Some(0.3));
    }

    #[test]
    fn test_lower_is_better_flips_direction() {
        let mut config = AnalyticsConfig::default();
        config
            .metric_directions
            .insert("Accuracy".to_string(), crate::config::MetricDirection::LowerIsBetter);

        assert_eq!(
            analyze(&[100.0, 130.0], &config).direction,
            TrendDirection::Declining
        );
        assert_eq!(
            analyze(&[130.0, 100.0], &config).direction,
            TrendDirection::Improving
        );
    }

    #[test]
    fn test_declining_series() {
        let config = AnalyticsConfig::default();
        assert_eq!(
            analyze(&[100.0, 80.0], &config).direction,
            TrendDirection::Declining
        );
    }

    #[test]
    fn test_zero_start_series() {
        let config = AnalyticsConfig::default();
        let analysis = analyze(&[0.0, 10.0], &config);
        assert_eq!(analysis.direction, TrendDirection::Improving);
        assert_eq!(analysis.relative_change, None);

        assert_eq!(
            analyze(&[0.0, 0.0], &config).direction,
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_date() {
        let config = AnalyticsConfig::default();
        let entries = vec![
            kpi(2, 1, "Accuracy", 100.0, 130.0, date(2025, 3, 1)),
            kpi(1, 1, "Accuracy", 100.0, 100.0, date(2025, 1, 1)),
        ];
        let refs: Vec<&KpiEntry> = entries.iter().collect();
        let analysis = analyze_series(1, "Accuracy", &refs, &config);
        assert_eq!(analysis.direction, TrendDirection::Improving);
        assert_eq!(analysis.delta, 30.0);
    }

    #[test]
    fn test_analyze_all_groups_by_project_and_metric() {
        let mut snapshot = empty_snapshot();
        snapshot.kpis = vec![
            kpi(1, 1, "Accuracy", 100.0, 100.0, date(2025, 1, 1)),
            kpi(2, 1, "Accuracy", 100.0, 130.0, date(2025, 2, 1)),
            kpi(3, 2, "Accuracy", 100.0, 90.0, date(2025, 1, 1)),
        ];

        let analyses = analyze_all(&snapshot, &AnalyticsConfig::default());
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].project_id, 1);
        assert_eq!(analyses[0].direction, TrendDirection::Improving);
        assert_eq!(analyses[1].direction, TrendDirection::InsufficientData);

        let summary = summarize(&analyses);
        assert_eq!(summary.improving, 1);
        assert_eq!(summary.insufficient, 1);
    }

    #[test]
    fn test_underperforming_and_top_performers() {
        let mut snapshot = empty_snapshot();
        snapshot.kpis = vec![
            // Two observations; only the latest (60%) counts
            kpi(1, 1, "Accuracy", 100.0, 95.0, date(2025, 1, 1)),
            kpi(2, 1, "Accuracy", 100.0, 60.0, date(2025, 2, 1)),
            kpi(3, 1, "Adoption", 100.0, 90.0, date(2025, 2, 1)),
            kpi(4, 2, "CTR", 100.0, 30.0, date(2025, 2, 1)),
        ];
        let config = AnalyticsConfig::default();

        let under = underperforming_kpis(&snapshot, &config);
        let rates: Vec<f64> = under
            .iter()
            .map(|k| k.achievement_rate().unwrap())
            .collect();
        assert_eq!(rates, vec![30.0, 60.0]);

        let top = top_performers(&snapshot, 2);
        let rates: Vec<f64> = top.iter().map(|k| k.achievement_rate().unwrap()).collect();
        assert_eq!(rates, vec![90.0, 60.0]);
    }
}
