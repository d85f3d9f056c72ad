//! In-memory store for the uploads of the active session.
//!
//! Each file keeps its parsed [`RawTable`] for its whole lifetime; all
//! derived views (profiles, previews, analyses) are recomputed per request
//! against whichever table the caller addresses. Nothing survives a process
//! restart, which is intentional.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::AppError;
use crate::services::benford::RawTable;

struct StoredCsv {
    table: Arc<RawTable>,
    uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct SessionStore {
    files: RwLock<HashMap<String, StoredCsv>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an already-parsed table under a unique filename. A parse
    /// failure upstream means nothing reaches this point, so a bad upload
    /// never disturbs the files already held.
    pub fn insert(&self, filename: &str, table: RawTable) -> Result<(), AppError> {
        let mut files = self.files.write();
        if files.contains_key(filename) {
            return Err(AppError::DuplicateFile(filename.to_string()));
        }
        files.insert(
            filename.to_string(),
            StoredCsv {
                table: Arc::new(table),
                uploaded_at: Utc::now(),
            },
        );
        Ok(())
    }

    pub fn get(&self, filename: &str) -> Option<Arc<RawTable>> {
        self.files.read().get(filename).map(|f| Arc::clone(&f.table))
    }

    pub fn remove(&self, filename: &str) -> bool {
        self.files.write().remove(filename).is_some()
    }

    /// Uploaded files in upload order.
    pub fn list(&self) -> Vec<UploadedFile> {
        let files = self.files.read();
        let mut listed: Vec<UploadedFile> = files
            .iter()
            .map(|(filename, stored)| UploadedFile {
                filename: filename.clone(),
                uploaded_at: stored.uploaded_at,
            })
            .collect();
        listed.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.filename.cmp(&b.filename)));
        listed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::benford::BenfordAnalyzer;

    fn sample_table() -> RawTable {
        BenfordAnalyzer::new().parse(b"v\n1\n2\n3\n").unwrap()
    }

    #[test]
    fn stores_and_fetches_by_filename() {
        let store = SessionStore::new();
        store.insert("a.csv", sample_table()).unwrap();
        assert!(store.get("a.csv").is_some());
        assert!(store.get("b.csv").is_none());
    }

    #[test]
    fn rejects_duplicate_filenames() {
        let store = SessionStore::new();
        store.insert("a.csv", sample_table()).unwrap();
        let err = store.insert("a.csv", sample_table()).unwrap_err();
        assert!(matches!(err, AppError::DuplicateFile(_)));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn removal_frees_the_name() {
        let store = SessionStore::new();
        store.insert("a.csv", sample_table()).unwrap();
        assert!(store.remove("a.csv"));
        assert!(!store.remove("a.csv"));
        store.insert("a.csv", sample_table()).unwrap();
    }

    #[test]
    fn lists_files_in_upload_order() {
        let store = SessionStore::new();
        store.insert("first.csv", sample_table()).unwrap();
        store.insert("second.csv", sample_table()).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].filename, "first.csv");
        assert_eq!(listed[1].filename, "second.csv");
    }

    #[test]
    fn files_are_independent() {
        let store = SessionStore::new();
        let analyzer = BenfordAnalyzer::new();
        store.insert("nums.csv", sample_table()).unwrap();
        store
            .insert("text.csv", analyzer.parse(b"a,b\nx,y\n").unwrap())
            .unwrap();

        let nums = store.get("nums.csv").unwrap();
        let text = store.get("text.csv").unwrap();
        assert!(analyzer.preview(&nums, false).has_usable_data());
        assert!(!analyzer.preview(&text, true).has_usable_data());
    }
}
