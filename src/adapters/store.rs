use crate::domain::model::{SubmissionDocument, SubmissionPage};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Document store backed by one append-only JSON-Lines file per collection.
#[derive(Debug)]
pub struct JsonlStore {
    base_path: PathBuf,
    // Serializes appends so concurrent handlers never interleave lines
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", collection))
    }
}

impl DocumentStore for JsonlStore {
    async fn insert(&self, collection: &str, document: &SubmissionDocument) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        std::fs::create_dir_all(&self.base_path)?;
        let mut line = serde_json::to_string(document)?;
        line.push('\n');

        use std::io::Write;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    async fn list(&self, collection: &str, limit: usize, offset: usize) -> Result<SubmissionPage> {
        let content = match std::fs::read_to_string(self.collection_path(collection)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut documents: Vec<SubmissionDocument> = Vec::new();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            documents.push(serde_json::from_str(line)?);
        }

        let total = documents.len();
        // File order is oldest first; listings serve newest first
        documents.reverse();
        let items = documents.into_iter().skip(offset).take(limit).collect();

        Ok(SubmissionPage {
            items,
            total,
            limit,
            offset,
        })
    }
}

/// In-process store for tests and `--in-memory` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<SubmissionDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: &SubmissionDocument) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(())
    }

    async fn list(&self, collection: &str, limit: usize, offset: usize) -> Result<SubmissionPage> {
        let collections = self.collections.lock().await;
        let documents = collections.get(collection).cloned().unwrap_or_default();

        let total = documents.len();
        let items = documents
            .into_iter()
            .rev()
            .skip(offset)
            .take(limit)
            .collect();

        Ok(SubmissionPage {
            items,
            total,
            limit,
            offset,
        })
    }
}
