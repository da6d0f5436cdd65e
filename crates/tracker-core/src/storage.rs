use tracker_domain::AppDocument;

use crate::CoreError;

/// Key under which the app document is stored by default.
pub const DEFAULT_DOCUMENT_KEY: &str = "expense_tracker_multi_v1";

/// Opaque key-value persistence for the app document.
pub trait DocumentStore: Send + Sync {
    /// Loads the document stored under `key`, or a fresh default when nothing is stored.
    fn load(&self, key: &str) -> Result<AppDocument, CoreError>;
    fn save(&self, key: &str, document: &AppDocument) -> Result<(), CoreError>;
}
