use serde::Serialize;
use tracing::info;
use tracker_domain::{EntryId, Goal, Profile};

use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub target: f64,
    pub progress: f64,
    pub percent: f64,
}

pub struct GoalService;

impl GoalService {
    pub fn add(profile: &mut Profile, name: &str, target: f64) -> Result<EntryId, CoreError> {
        let name = name.trim();
        if name.is_empty() || !target.is_finite() || target <= 0.0 {
            return Err(CoreError::Validation("Enter valid goal".into()));
        }
        let goal = Goal::new(name, target);
        let id = goal.id.clone();
        profile.goals.push(goal);
        info!(name, target, "goal added");
        Ok(id)
    }

    pub fn progress(profile: &Profile) -> Vec<GoalProgress> {
        profile
            .goals
            .iter()
            .map(|goal| GoalProgress {
                name: goal.name.clone(),
                target: goal.target,
                progress: goal.progress,
                percent: goal.percent(),
            })
            .collect()
    }
}
