//! Drift reporting between source and target trees

use serde::{Deserialize, Serialize};

/// Status of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Target matches source exactly
    InSync,
    /// Target differs from source
    Drifted,
}

/// One path that differs between source and target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftItem {
    /// Path relative to the tree roots, forward-slash form
    pub path: String,
    /// Human-readable description of the difference
    pub description: String,
}

/// Report from a drift check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Overall status of the check
    pub status: CheckStatus,
    /// Present in source, absent from target
    pub missing: Vec<DriftItem>,
    /// Present in target, absent from source
    pub extraneous: Vec<DriftItem>,
    /// Present in both with differing content or kind
    pub mismatched: Vec<DriftItem>,
}

impl CheckReport {
    /// Create an in-sync report with no differences
    pub fn in_sync() -> Self {
        Self {
            status: CheckStatus::InSync,
            missing: Vec::new(),
            extraneous: Vec::new(),
            mismatched: Vec::new(),
        }
    }

    /// Build a report from difference lists, deriving the status
    pub fn from_items(
        missing: Vec<DriftItem>,
        extraneous: Vec<DriftItem>,
        mismatched: Vec<DriftItem>,
    ) -> Self {
        let status = if missing.is_empty() && extraneous.is_empty() && mismatched.is_empty() {
            CheckStatus::InSync
        } else {
            CheckStatus::Drifted
        };
        Self {
            status,
            missing,
            extraneous,
            mismatched,
        }
    }

    /// Total number of differing paths
    pub fn drift_count(&self) -> usize {
        self.missing.len() + self.extraneous.len() + self.mismatched.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_items_are_in_sync() {
        let report = CheckReport::from_items(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(report.status, CheckStatus::InSync);
        assert_eq!(report.drift_count(), 0);
    }

    #[test]
    fn any_item_drifts() {
        let item = DriftItem {
            path: "a.txt".to_string(),
            description: "Missing from target".to_string(),
        };
        let report = CheckReport::from_items(vec![item], Vec::new(), Vec::new());
        assert_eq!(report.status, CheckStatus::Drifted);
        assert_eq!(report.drift_count(), 1);
    }
}
