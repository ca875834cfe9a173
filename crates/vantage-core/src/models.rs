//! Domain models for Vantage

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle status of an AI project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Development,
    Testing,
    Production,
    Retired,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
            Self::Retired => "retired",
        }
    }

    /// All statuses in lifecycle order
    pub fn all() -> &'static [ProjectStatus] {
        &[
            Self::Planning,
            Self::Development,
            Self::Testing,
            Self::Production,
            Self::Retired,
        ]
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "development" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            "production" => Ok(Self::Production),
            "retired" => Ok(Self::Retired),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority level for an AI project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An AI project in the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub owner: String,
    pub department: String,
    /// AI model powering the project (e.g., "claude-sonnet-4")
    pub model_used: String,
    pub use_case: String,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Whether the project is in an active lifecycle stage
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ProjectStatus::Development | ProjectStatus::Testing | ProjectStatus::Production
        )
    }

    /// Days remaining until the target date, negative if past it
    pub fn days_until_target(&self, as_of: NaiveDate) -> Option<i64> {
        self.target_date.map(|t| (t - as_of).num_days())
    }
}

/// A new project before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Priority,
    pub owner: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub use_case: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

impl NewProject {
    /// Validate invariants before insertion
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidData("project name must not be empty".into()));
        }
        if self.owner.trim().is_empty() {
            return Err(Error::InvalidData("project owner must not be empty".into()));
        }
        if let Some(target) = self.target_date {
            if target < self.start_date {
                return Err(Error::InvalidData(format!(
                    "target_date {} is before start_date {}",
                    target, self.start_date
                )));
            }
        }
        Ok(())
    }
}

/// A recorded KPI observation for a project metric
///
/// Observations for the same (project, metric) pair form a time series
/// ordered by recorded_date; the trend analyzer consumes them in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiEntry {
    pub id: i64,
    pub project_id: i64,
    pub metric_name: String,
    pub target_value: f64,
    pub actual_value: f64,
    pub unit: String,
    pub recorded_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl KpiEntry {
    /// Percentage of target achieved, None when the target is zero
    pub fn achievement_rate(&self) -> Option<f64> {
        if self.target_value == 0.0 {
            None
        } else {
            Some((self.actual_value / self.target_value) * 100.0)
        }
    }

    /// Whether the actual value meets or exceeds the target
    pub fn is_on_target(&self) -> bool {
        self.actual_value >= self.target_value
    }
}

/// A new KPI observation before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewKpiEntry {
    pub metric_name: String,
    pub target_value: f64,
    pub actual_value: f64,
    #[serde(default)]
    pub unit: String,
    pub recorded_date: NaiveDate,
}

impl NewKpiEntry {
    pub fn validate(&self) -> Result<()> {
        if self.metric_name.trim().is_empty() {
            return Err(Error::InvalidData("KPI metric name must not be empty".into()));
        }
        Ok(())
    }
}

/// Budget allocation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Compute,
    ApiCalls,
    Personnel,
    Infrastructure,
    #[default]
    Other,
}

impl BudgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::ApiCalls => "api_calls",
            Self::Personnel => "personnel",
            Self::Infrastructure => "infrastructure",
            Self::Other => "other",
        }
    }

    /// Display label with spacing instead of underscores
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::ApiCalls => "API Calls",
            Self::Personnel => "Personnel",
            Self::Infrastructure => "Infrastructure",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for BudgetCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compute" => Ok(Self::Compute),
            "api_calls" => Ok(Self::ApiCalls),
            "personnel" => Ok(Self::Personnel),
            "infrastructure" => Ok(Self::Infrastructure),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown budget category: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget line item for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: i64,
    pub project_id: i64,
    pub category: BudgetCategory,
    pub planned_amount: f64,
    pub actual_amount: f64,
    pub currency: String,
    /// Accounting period label (e.g., "2025-Q3")
    pub period: String,
    pub created_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Budget variance (actual - planned). Positive means over budget.
    pub fn variance(&self) -> f64 {
        self.actual_amount - self.planned_amount
    }

    /// Variance as a percentage of planned amount, None when planned is zero
    pub fn variance_percentage(&self) -> Option<f64> {
        if self.planned_amount == 0.0 {
            None
        } else {
            Some((self.variance() / self.planned_amount) * 100.0)
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual_amount > self.planned_amount
    }
}

/// A new budget line item before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudgetEntry {
    pub category: BudgetCategory,
    pub planned_amount: f64,
    #[serde(default)]
    pub actual_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub period: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl NewBudgetEntry {
    pub fn validate(&self) -> Result<()> {
        if self.planned_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "planned_amount must be non-negative, got {}",
                self.planned_amount
            )));
        }
        if self.actual_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "actual_amount must be non-negative, got {}",
                self.actual_amount
            )));
        }
        Ok(())
    }
}

/// Aggregated planned/actual totals across budget entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTotals {
    pub total_planned: f64,
    pub total_actual: f64,
    pub total_variance: f64,
}

/// Current status of a risk entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    #[default]
    Open,
    Mitigating,
    Resolved,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Mitigating => "mitigating",
            Self::Resolved => "resolved",
        }
    }
}

impl std::str::FromStr for RiskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "mitigating" => Ok(Self::Mitigating),
            "resolved" => Ok(Self::Resolved),
            _ => Err(format!("Unknown risk status: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative risk level derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A risk register entry for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub id: i64,
    pub project_id: i64,
    pub description: String,
    /// Probability score, ordinal 1-5
    pub probability: u8,
    /// Impact score, ordinal 1-5
    pub impact: u8,
    pub mitigation: String,
    pub status: RiskStatus,
    pub created_at: DateTime<Utc>,
}

impl RiskEntry {
    /// Combined risk score (probability x impact), range 1-25
    pub fn score(&self) -> u8 {
        self.probability * self.impact
    }

    /// Risk score normalized to [0, 1]: score 1 maps to 0, score 25 maps to 1
    pub fn normalized_score(&self) -> f64 {
        (self.score() as f64 - 1.0) / 24.0
    }

    /// Whether the risk still needs attention
    pub fn is_open(&self) -> bool {
        self.status != RiskStatus::Resolved
    }

    pub fn level(&self) -> RiskLevel {
        match self.score() {
            s if s >= 15 => RiskLevel::Critical,
            s if s >= 10 => RiskLevel::High,
            s if s >= 5 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// A new risk entry before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskEntry {
    pub description: String,
    pub probability: u8,
    pub impact: u8,
    #[serde(default)]
    pub mitigation: String,
    #[serde(default)]
    pub status: RiskStatus,
}

impl NewRiskEntry {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidData("risk description must not be empty".into()));
        }
        if !(1..=5).contains(&self.probability) {
            return Err(Error::InvalidData(format!(
                "risk probability must be 1-5, got {}",
                self.probability
            )));
        }
        if !(1..=5).contains(&self.impact) {
            return Err(Error::InvalidData(format!(
                "risk impact must be 1-5, got {}",
                self.impact
            )));
        }
        Ok(())
    }
}
