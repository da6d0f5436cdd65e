use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    month::MonthKey,
    planning::{Budget, Goal},
    transaction::{EntryId, RecurringRule, Transaction},
};

pub const DEFAULT_PROFILE: &str = "Me";

pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "General",
    "Food",
    "Transport",
    "Salary",
    "Shopping",
    "Bills",
    "Savings",
];

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Everything tracked for one named user: transactions plus planning data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub last_recurring_month: Option<MonthKey>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            budgets: Vec::new(),
            goals: Vec::new(),
            recurring: Vec::new(),
            last_recurring_month: None,
        }
    }
}

impl Profile {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: &EntryId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| &txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: &EntryId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| &txn.id == id)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn budget(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    current_profile: Option<String>,
}

/// The single persisted document holding every profile and the active selection.
///
/// The active profile always exists in `profiles`; every constructor and
/// mutator preserves that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocument", into = "RawDocument")]
pub struct AppDocument {
    profiles: BTreeMap<String, Profile>,
    current_profile: String,
}

impl From<RawDocument> for AppDocument {
    fn from(raw: RawDocument) -> Self {
        let current = raw
            .current_profile
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let mut profiles = raw.profiles;
        profiles.entry(current.clone()).or_default();
        Self {
            profiles,
            current_profile: current,
        }
    }
}

impl From<AppDocument> for RawDocument {
    fn from(doc: AppDocument) -> Self {
        Self {
            profiles: doc.profiles,
            current_profile: Some(doc.current_profile),
        }
    }
}

impl Default for AppDocument {
    fn default() -> Self {
        Self::with_profile(DEFAULT_PROFILE)
    }
}

impl AppDocument {
    pub fn with_profile(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut profiles = BTreeMap::new();
        profiles.insert(name.clone(), Profile::default());
        Self {
            profiles,
            current_profile: name,
        }
    }

    pub fn current_name(&self) -> &str {
        &self.current_profile
    }

    pub fn current(&self) -> &Profile {
        &self.profiles[&self.current_profile]
    }

    pub fn current_mut(&mut self) -> &mut Profile {
        self.profiles.entry(self.current_profile.clone()).or_default()
    }

    /// Makes `name` the active profile, creating an empty one when missing.
    /// Returns `true` when a new profile was created.
    pub fn select(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let created = !self.profiles.contains_key(&name);
        self.profiles.entry(name.clone()).or_default();
        self.current_profile = name;
        created
    }

    /// Replaces the active profile with a fresh initial state.
    pub fn reset_current(&mut self) {
        self.profiles
            .insert(self.current_profile.clone(), Profile::default());
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_me_profile_with_seed_categories() {
        let doc = AppDocument::default();
        assert_eq!(doc.current_name(), DEFAULT_PROFILE);
        assert_eq!(doc.current().categories.len(), DEFAULT_CATEGORIES.len());
        assert!(doc.current().transactions().is_empty());
    }

    #[test]
    fn missing_current_profile_is_repaired_on_load() {
        let json = r#"{"profiles":{"Work":{"transactions":[]}},"currentProfile":"Home"}"#;
        let doc: AppDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.current_name(), "Home");
        assert!(doc.profile("Work").is_some());
        assert!(doc.profile("Home").is_some());
    }

    #[test]
    fn document_round_trips_with_camel_case_fields() {
        let mut doc = AppDocument::default();
        doc.current_mut().last_recurring_month = Some(MonthKey::new(2025, 2).unwrap());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"currentProfile\":\"Me\""));
        assert!(json.contains("\"lastRecurringMonth\":\"2025-02\""));
        let back: AppDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn select_creates_profiles_on_demand() {
        let mut doc = AppDocument::default();
        assert!(doc.select("Partner"));
        assert!(!doc.select("Me"));
        assert_eq!(doc.profile_names().collect::<Vec<_>>(), vec!["Me", "Partner"]);
    }
}
