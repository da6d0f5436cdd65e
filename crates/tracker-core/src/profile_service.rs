//! Helper functions for switching and resetting profiles inside the app document.

use tracing::info;
use tracker_domain::{AppDocument, Profile};

use crate::CoreError;

/// Provides selection and reset helpers for [`AppDocument`] profiles.
pub struct ProfileService;

impl ProfileService {
    /// Activates `name`, creating the profile when it does not exist yet.
    pub fn switch(doc: &mut AppDocument, name: &str) -> Result<(), CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Profile name must not be empty".into()));
        }
        if doc.select(name) {
            info!(profile = name, "profile created");
        }
        Ok(())
    }

    /// Wipes all data of the active profile.
    pub fn clear(doc: &mut AppDocument) {
        info!(profile = doc.current_name(), "profile cleared");
        doc.reset_current();
    }

    pub fn current(doc: &AppDocument) -> &Profile {
        doc.current()
    }

    pub fn current_mut(doc: &mut AppDocument) -> &mut Profile {
        doc.current_mut()
    }

    pub fn names(doc: &AppDocument) -> Vec<String> {
        doc.profile_names().map(str::to_string).collect()
    }
}
