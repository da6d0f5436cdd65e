use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::{debug, info, warn};
use tracker_core::{storage::DocumentStore, CoreError};
use tracker_domain::AppDocument;

const DOCUMENT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const BACKUPS_DIR: &str = "backups";
const TMP_SUFFIX: &str = "tmp";
const PRESERVED_EXTENSION: &str = "corrupt";
pub const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for app documents and their backups.
///
/// Each key maps to `<root>/<key>.json`. Overwriting a document first copies
/// the previous version into `<root>/backups/<key>/`.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

/// What [`JsonDocumentStore::load_or_recover`] found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(AppDocument),
    Missing,
    /// The stored file could not be parsed and was moved to `preserved`.
    Recovered { preserved: PathBuf, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    /// File name inside the key's backup directory.
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl JsonDocumentStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self, CoreError> {
        let backups_dir = root.join(BACKUPS_DIR);
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), DOCUMENT_EXTENSION))
    }

    /// Backups for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_key(key);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            entries.push(BackupInfo {
                key: slug.clone(),
                name: name.to_string(),
                path: path.clone(),
                size_bytes,
            });
        }
        // Fixed-width timestamps make the file names sort chronologically.
        entries.sort_by_key(|info| Reverse(info.name.clone()));
        Ok(entries)
    }

    /// Replaces the document under `key` with the named backup and returns it.
    ///
    /// `backup` must be a bare file name as reported by [`Self::list_backups`].
    pub fn restore_backup(&self, key: &str, backup: &str) -> Result<AppDocument, CoreError> {
        if !is_plain_file_name(backup) {
            return Err(CoreError::Storage(format!("invalid backup name `{backup}`")));
        }
        let source = self.backup_dir(key).join(backup);
        if !source.is_file() {
            return Err(CoreError::Storage(format!("backup `{backup}` not found")));
        }
        let data = fs::read_to_string(&source)?;
        let document: AppDocument = serde_json::from_str(&data)
            .map_err(|err| CoreError::Storage(format!("backup `{backup}` is unreadable: {err}")))?;
        let target = self.document_path(key);
        let tmp = tmp_path(&target);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &target)?;
        info!(key, backup, "document restored from backup");
        Ok(document)
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_key(key))
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!(
            "{}_{}.{}",
            canonical_key(key),
            timestamp,
            DOCUMENT_EXTENSION
        );
        fs::copy(path, dir.join(&file_name))?;
        debug!(key, backup = %file_name, "previous document backed up");
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        for entry in self.list_backups(key)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl JsonDocumentStore {
    /// Reads the document under `key`.
    ///
    /// A file that does not parse is renamed to `<key>_<timestamp>.corrupt`
    /// next to the document, so later saves and backup pruning cannot lose it.
    pub fn load_or_recover(&self, key: &str) -> Result<LoadOutcome, CoreError> {
        let path = self.document_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(key, "no stored document, starting fresh");
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&data) {
            Ok(document) => Ok(LoadOutcome::Loaded(document)),
            Err(err) => {
                let preserved = self.root.join(format!(
                    "{}_{}.{}",
                    canonical_key(key),
                    Utc::now().format(BACKUP_TIMESTAMP_FORMAT),
                    PRESERVED_EXTENSION
                ));
                fs::rename(&path, &preserved)?;
                warn!(
                    key,
                    path = %path.display(),
                    preserved = %preserved.display(),
                    error = %err,
                    "stored document is malformed, starting fresh"
                );
                Ok(LoadOutcome::Recovered {
                    preserved,
                    error: err.to_string(),
                })
            }
        }
    }
}

impl DocumentStore for JsonDocumentStore {
    fn load(&self, key: &str) -> Result<AppDocument, CoreError> {
        match self.load_or_recover(key)? {
            LoadOutcome::Loaded(document) => Ok(document),
            LoadOutcome::Missing | LoadOutcome::Recovered { .. } => Ok(AppDocument::default()),
        }
    }

    fn save(&self, key: &str, document: &AppDocument) -> Result<(), CoreError> {
        let path = self.document_path(key);
        self.backup_existing_file(key, &path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_document(document)?)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "document saved");
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "document".into()
    } else {
        sanitized
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains("..")
        && !name.contains(['/', '\\'])
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_document(document: &AppDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(document).map_err(|err| CoreError::Storage(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_keeps_default_key_and_replaces_separators() {
        assert_eq!(canonical_key("expense_tracker_multi_v1"), "expense_tracker_multi_v1");
        assert_eq!(canonical_key(" My Data/2025 "), "my_data_2025");
        assert_eq!(canonical_key("///"), "document");
    }

    #[test]
    fn backup_names_must_stay_inside_the_backup_directory() {
        assert!(is_plain_file_name("expense_tracker_multi_v1_20250101_120000_000.json"));
        for name in ["", "..", "../doc.json", "a/b.json", "a\\b.json", "..json"] {
            assert!(!is_plain_file_name(name), "{name}");
        }
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/doc.json"));
        assert_eq!(tmp, PathBuf::from("/data/doc.json.tmp"));
    }
}
