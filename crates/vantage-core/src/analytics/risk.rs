//! Risk matrix and profile scoring

use serde::{Deserialize, Serialize};

use crate::models::{RiskEntry, RiskLevel, RiskStatus};

/// 5x5 probability x impact grid of active (non-resolved) risk counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskMatrix {
    /// cells[probability - 1][impact - 1]
    cells: [[usize; 5]; 5],
}

impl RiskMatrix {
    /// Count of active risks at the given probability and impact (both 1-5)
    pub fn count(&self, probability: u8, impact: u8) -> usize {
        self.cells[probability as usize - 1][impact as usize - 1]
    }
}

/// Build the risk matrix from active risks
pub fn risk_matrix(risks: &[RiskEntry]) -> RiskMatrix {
    let mut matrix = RiskMatrix::default();
    for risk in risks.iter().filter(|r| r.is_open()) {
        // Probability/impact are validated 1-5 at construction
        matrix.cells[risk.probability as usize - 1][risk.impact as usize - 1] += 1;
    }
    matrix
}

/// Aggregate counts over a set of risk entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub total: usize,
    pub open: usize,
    pub mitigating: usize,
    pub resolved: usize,
    /// Open risks at critical level (score >= 15)
    pub critical_open: usize,
    /// Mean raw score (1-25) across non-resolved risks, None when there are none
    pub average_open_score: Option<f64>,
}

pub fn profile(risks: &[RiskEntry]) -> RiskProfile {
    let open = risks.iter().filter(|r| r.status == RiskStatus::Open).count();
    let mitigating = risks
        .iter()
        .filter(|r| r.status == RiskStatus::Mitigating)
        .count();
    let resolved = risks
        .iter()
        .filter(|r| r.status == RiskStatus::Resolved)
        .count();
    let critical_open = risks
        .iter()
        .filter(|r| r.is_open() && r.level() == RiskLevel::Critical)
        .count();

    let active: Vec<&RiskEntry> = risks.iter().filter(|r| r.is_open()).collect();
    let average_open_score = if active.is_empty() {
        None
    } else {
        Some(active.iter().map(|r| r.score() as f64).sum::<f64>() / active.len() as f64)
    };

    RiskProfile {
        total: risks.len(),
        open,
        mitigating,
        resolved,
        critical_open,
        average_open_score,
    }
}

/// All risks ordered for register listings: highest score first, stable by id
pub fn register_order(risks: &[RiskEntry]) -> Vec<&RiskEntry> {
    let mut ordered: Vec<&RiskEntry> = risks.iter().collect();
    ordered.sort_by(|a, b| b.score().cmp(&a.score()).then_with(|| a.id.cmp(&b.id)));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::*;
    use crate::models::RiskStatus;

    #[test]
    fn test_matrix_counts_active_only() {
        let risks = vec![
            risk(1, 1, 3, 4, RiskStatus::Open),
            risk(2, 1, 3, 4, RiskStatus::Mitigating),
            risk(3, 1, 3, 4, RiskStatus::Resolved),
            risk(4, 2, 5, 5, RiskStatus::Open),
        ];
        let matrix = risk_matrix(&risks);
        assert_eq!(matrix.count(3, 4), 2);
        assert_eq!(matrix.count(5, 5), 1);
        assert_eq!(matrix.count(1, 1), 0);
    }

    #[test]
    fn test_profile_counts() {
        let risks = vec![
            risk(1, 1, 4, 5, RiskStatus::Open),
            risk(2, 1, 2, 2, RiskStatus::Mitigating),
            risk(3, 1, 1, 1, RiskStatus::Resolved),
        ];
        let p = profile(&risks);
        assert_eq!(p.total, 3);
        assert_eq!(p.open, 1);
        assert_eq!(p.mitigating, 1);
        assert_eq!(p.resolved, 1);
        assert_eq!(p.critical_open, 1);
        assert_eq!(p.average_open_score, Some(12.0));
    }

    #[test]
    fn test_profile_empty() {
        let p = profile(&[]);
        assert_eq!(p.total, 0);
        assert_eq!(p.average_open_score, None);
    }

    #[test]
    fn test_register_order() {
        let risks = vec![
            risk(1, 1, 2, 2, RiskStatus::Open),
            risk(2, 1, 5, 5, RiskStatus::Open),
            risk(3, 1, 3, 3, RiskStatus::Resolved),
        ];
        let ordered = register_order(&risks);
        let scores: Vec<u8> = ordered.iter().map(|r| r.score()).collect();
        assert_eq!(scores, vec![25, 9, 4]);
    }
}
