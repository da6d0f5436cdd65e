use serde::{Deserialize, Serialize};

use crate::transaction::EntryId;

/// Spending limit attached to a category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }
}

/// A savings target with accumulated progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub id: EntryId,
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub progress: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, target: f64) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            target,
            progress: 0.0,
        }
    }

    /// Completion percentage, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.progress / self.target * 100.0).min(100.0)
    }
}
