//! The tracker state engine.
//!
//! Owns the in-memory collection, answers progress queries and mirrors every
//! change into storage. Storage writes are fire-and-forget: a failed write
//! is logged and the in-memory collection stays authoritative.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use syllabus_core::{
    Catalog, Collection, Course, FilterMode, ImportError, Origin, PyqYear, SortMode,
};
use syllabus_storage::{Storage, DEFAULT_KEY};
use crate::snapshot::ProgressSnapshot;
use crate::transfer::{export_file_name, ImportReport};

/// Errors from exporting tracker state.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the tracker engine.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Storage key holding the serialized collection
    pub storage_key: String,
    /// Whether changes are written to storage at all; `false` gives a
    /// read-only session
    pub persist_on_mutation: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_KEY.to_string(),
            persist_on_mutation: true,
        }
    }
}

/// A tracker shared between tasks; the mutex serializes swaps.
pub type SharedTracker<S> = Arc<Mutex<TrackerEngine<S>>>;

/// The tracker state engine.
pub struct TrackerEngine<S: Storage> {
    storage: S,
    catalog: Catalog,
    collection: Collection,
    config: TrackerConfig,
}

impl<S: Storage> TrackerEngine<S> {
    /// Open with the default configuration.
    pub async fn open(storage: S, catalog: Catalog) -> Self {
        Self::open_with_config(storage, catalog, TrackerConfig::default()).await
    }

    /// Restore persisted state or seed from `catalog`.
    ///
    /// A missing or corrupt entry yields a fresh seed, which is written back.
    /// A storage read error also seeds, but leaves storage alone.
    pub async fn open_with_config(storage: S, catalog: Catalog, config: TrackerConfig) -> Self {
        let (persisted, read_failed) = match storage.get(&config.storage_key).await {
            Ok(value) => (value, false),
            Err(e) => {
                warn!("Failed to read '{}': {}", config.storage_key, e);
                (None, true)
            }
        };

        let (collection, origin) = Collection::restore(persisted.as_deref(), &catalog);

        let mut engine = Self {
            storage,
            catalog,
            collection,
            config,
        };

        info!("Tracker opened with {} courses", engine.collection.len());
        if origin == Origin::Seeded && !read_failed {
            engine.persist().await;
        }
        engine
    }

    /// Current configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The authoritative in-memory collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The seed catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Wrap for use from several tasks.
    pub fn into_shared(self) -> SharedTracker<S> {
        Arc::new(Mutex::new(self))
    }

    /// Completion of the course with `code`.
    pub fn course_completion(&self, code: &str) -> Option<f64> {
        self.collection.course(code).map(Course::completion)
    }

    /// Mean completion across all courses.
    pub fn global_completion(&self) -> f64 {
        self.collection.global_completion()
    }

    /// Filtered and sorted view; canonical order is untouched.
    pub fn view(&self, filter: FilterMode, sort: SortMode) -> Vec<&Course> {
        self.collection.view(filter, sort)
    }

    /// Take a progress snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::capture(&self.collection)
    }

    /// Flip a module's completed flag. Returns `false` if the target is unknown.
    pub async fn toggle_module_completion(&mut self, code: &str, module_id: &str) -> bool {
        let applied = self.collection.toggle_module_completion(code, module_id);
        self.after_mutation(applied, code, Some(module_id)).await
    }

    /// Replace a module's notes. Returns `false` if the target is unknown.
    pub async fn set_module_notes(
        &mut self,
        code: &str,
        module_id: &str,
        notes: impl Into<String>,
    ) -> bool {
        let applied = self.collection.set_module_notes(code, module_id, notes);
        self.after_mutation(applied, code, Some(module_id)).await
    }

    /// Flip a PYQ flag. Returns `false` if the course is unknown.
    pub async fn toggle_pyq(&mut self, code: &str, year: PyqYear) -> bool {
        let applied = self.collection.toggle_pyq(code, year);
        self.after_mutation(applied, code, None).await
    }

    /// Discard all progress and reseed from the catalog.
    pub async fn reset(&mut self) {
        self.collection = Collection::seed(&self.catalog);
        info!("Reset tracker to catalog seed");
        self.persist().await;
    }

    /// Pretty-printed JSON dump of the collection.
    pub fn export(&self) -> Result<Vec<u8>, TrackerError> {
        Ok(self.collection.to_json_pretty()?.into_bytes())
    }

    /// Write an export into `dir`, named after today's date. Returns the path.
    pub async fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, TrackerError> {
        let path = dir
            .as_ref()
            .join(export_file_name(chrono::Utc::now().date_naive()));
        tokio::fs::write(&path, self.export()?).await?;
        info!("Exported {} courses to {}", self.collection.len(), path.display());
        Ok(path)
    }

    /// Replace the collection with an exported dump.
    ///
    /// The payload is fully validated before the swap; on error neither the
    /// collection nor storage is touched.
    pub async fn import(&mut self, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let imported = match Collection::parse_import(bytes) {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Import rejected: {}", e);
                return Err(e);
            }
        };

        let report = ImportReport::of(&imported);
        self.collection = imported;
        info!(
            "Imported {} courses ({} modules)",
            report.course_codes.len(),
            report.module_count
        );
        self.persist().await;
        Ok(report)
    }

    /// Read a file and import it.
    pub async fn import_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ImportReport, ImportError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        self.import(&bytes).await
    }

    async fn after_mutation(&mut self, applied: bool, code: &str, module_id: Option<&str>) -> bool {
        if applied {
            self.persist().await;
        } else {
            debug!("Ignoring mutation of unknown target {}/{:?}", code, module_id);
        }
        applied
    }

    async fn persist(&mut self) {
        if !self.config.persist_on_mutation {
            return;
        }
        let json = match self.collection.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize collection: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.config.storage_key, &json).await {
            warn!("Failed to persist '{}': {}", self.config.storage_key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{CatalogCourse, CatalogModule};
    use syllabus_storage::{JsonStorage, MemoryStorage};

    fn catalog() -> Catalog {
        let module = |name: &str, lectures| CatalogModule {
            name: name.to_string(),
            lectures,
            topics: format!("{} topics", name),
        };
        Catalog::new(vec![
            CatalogCourse {
                code: "C1".to_string(),
                name: "First".to_string(),
                modules: vec![module("a", 3), module("b", 5)],
            },
            CatalogCourse {
                code: "C2".to_string(),
                name: "Second".to_string(),
                modules: vec![module("c", 10)],
            },
        ])
    }

    #[tokio::test]
    async fn test_open_seeds_and_persists_when_empty() {
        let engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;

        assert_eq!(engine.collection(), &Collection::seed(&catalog()));
        assert_eq!(engine.storage().writes(), 1);
        let stored = engine.storage().peek(DEFAULT_KEY).unwrap();
        assert_eq!(Collection::parse(stored).unwrap(), *engine.collection());
    }

    #[tokio::test]
    async fn test_open_trusts_persisted_state() {
        let mut saved = Collection::seed(&catalog());
        saved.toggle_pyq("C2", PyqYear::Y2024);
        let storage = MemoryStorage::with_entry(DEFAULT_KEY, saved.to_json().unwrap());

        let engine = TrackerEngine::open(storage, catalog()).await;
        assert_eq!(engine.collection(), &saved);
        assert_eq!(engine.storage().writes(), 0);
    }

    #[tokio::test]
    async fn test_open_reseeds_corrupt_state() {
        let storage = MemoryStorage::with_entry(DEFAULT_KEY, "{{ definitely not json");
        let engine = TrackerEngine::open(storage, catalog()).await;

        assert_eq!(engine.collection(), &Collection::seed(&catalog()));
        assert_eq!(engine.storage().writes(), 1);
    }

    #[tokio::test]
    async fn test_open_after_read_error_seeds_without_writing() {
        let mut storage = MemoryStorage::with_entry(DEFAULT_KEY, "[]");
        storage.set_fail_reads(true);

        let engine = TrackerEngine::open(storage, catalog()).await;

        assert_eq!(engine.collection(), &Collection::seed(&catalog()));
        assert_eq!(engine.storage().writes(), 0);
        assert_eq!(engine.storage().peek(DEFAULT_KEY), Some("[]"));
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let config = TrackerConfig {
            storage_key: "semester5".to_string(),
            ..Default::default()
        };
        let engine = TrackerEngine::open_with_config(MemoryStorage::new(), catalog(), config).await;
        assert!(engine.storage().peek("semester5").is_some());
        assert!(engine.storage().peek(DEFAULT_KEY).is_none());
    }

    #[tokio::test]
    async fn test_scenario_completion_after_mutations() {
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;

        assert!(engine.toggle_module_completion("C1", "C1-0").await);
        assert!(engine.toggle_pyq("C1", PyqYear::Y2023).await);
        assert_eq!(engine.course_completion("C1"), Some(50.0));
        assert_eq!(engine.global_completion(), 25.0);

        let codes: Vec<&str> = engine
            .view(FilterMode::All, SortMode::Lectures)
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, ["C2", "C1"]);
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() {
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        let base = engine.storage().writes();

        engine.toggle_module_completion("C1", "C1-1").await;
        engine.set_module_notes("C2", "C2-0", "ask about LDPC").await;
        engine.toggle_pyq("C2", PyqYear::Y2023).await;
        assert_eq!(engine.storage().writes(), base + 3);

        let stored = Collection::parse(engine.storage().peek(DEFAULT_KEY).unwrap()).unwrap();
        assert_eq!(&stored, engine.collection());
        assert_eq!(stored.course("C2").unwrap().modules[0].notes, "ask about LDPC");
    }

    #[tokio::test]
    async fn test_unknown_target_changes_nothing() {
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        let before = engine.export().unwrap();
        let writes = engine.storage().writes();

        assert!(!engine.toggle_module_completion("C1", "C1-9").await);
        assert!(!engine.set_module_notes("C9", "C1-0", "x").await);
        assert!(!engine.toggle_pyq("C9", PyqYear::Y2023).await);

        assert_eq!(engine.export().unwrap(), before);
        assert_eq!(engine.storage().writes(), writes);
    }

    #[tokio::test]
    async fn test_write_failure_does_not_break_mutations() {
        let mut engine = TrackerEngine::open(MemoryStorage::failing(), catalog()).await;

        assert!(engine.toggle_module_completion("C1", "C1-0").await);
        assert!(engine.collection().course("C1").unwrap().modules[0].completed);
        assert_eq!(engine.storage().writes(), 0);
    }

    #[tokio::test]
    async fn test_read_only_session_never_writes() {
        let config = TrackerConfig {
            persist_on_mutation: false,
            ..Default::default()
        };
        let mut engine =
            TrackerEngine::open_with_config(MemoryStorage::new(), catalog(), config).await;
        engine.toggle_pyq("C1", PyqYear::Y2024).await;
        engine.reset().await;

        assert_eq!(engine.storage().writes(), 0);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let mut source = TrackerEngine::open(MemoryStorage::new(), Catalog::builtin()).await;
        source.toggle_module_completion("IT3103", "IT3103-7").await;
        source.set_module_notes("IT3101", "IT3101-2", "MVI, LXI\nrevisit timing").await;
        source.toggle_pyq("IT3102", PyqYear::Y2023).await;
        let dump = source.export().unwrap();

        let mut target = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        let report = target.import(&dump).await.unwrap();

        assert_eq!(target.collection(), source.collection());
        assert_eq!(report.course_codes, ["IT3101", "IT3102", "IT3103", "IT3104", "IT3105"]);
        assert_eq!(report.module_count, source.collection().module_count());
        let stored = Collection::parse(target.storage().peek(DEFAULT_KEY).unwrap()).unwrap();
        assert_eq!(&stored, source.collection());
    }

    #[tokio::test]
    async fn test_failed_import_leaves_state_untouched() {
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        engine.toggle_module_completion("C1", "C1-0").await;
        let collection = engine.collection().clone();
        let stored = engine.storage().peek(DEFAULT_KEY).unwrap().to_string();
        let writes = engine.storage().writes();

        let rejected: [&[u8]; 3] = [
            b"not json",
            br#"{"code":"C1"}"#,
            br#"[{"code":"C1","name":"x"}]"#,
        ];
        for bad in rejected {
            assert!(engine.import(bad).await.is_err());
        }

        assert_eq!(engine.collection(), &collection);
        assert_eq!(engine.storage().peek(DEFAULT_KEY), Some(stored.as_str()));
        assert_eq!(engine.storage().writes(), writes);
    }

    #[tokio::test]
    async fn test_import_file_and_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        engine.toggle_pyq("C1", PyqYear::Y2023).await;

        let path = engine.export_to_dir(dir.path()).await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("syllabus-") && name.ends_with(".json"));

        let mut other = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        other.import_file(&path).await.unwrap();
        assert_eq!(other.collection(), engine.collection());

        let missing = other.import_file(dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(ImportError::Io(_))));
    }

    #[tokio::test]
    async fn test_reset_reseeds() {
        let mut engine = TrackerEngine::open(MemoryStorage::new(), catalog()).await;
        engine.toggle_module_completion("C2", "C2-0").await;
        engine.reset().await;

        assert_eq!(engine.collection(), &Collection::seed(&catalog()));
    }

    #[tokio::test]
    async fn test_state_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        let mut engine = TrackerEngine::open(storage, catalog()).await;
        engine.toggle_module_completion("C1", "C1-1").await;
        engine.set_module_notes("C1", "C1-1", "done twice").await;
        let expected = engine.collection().clone();
        drop(engine);

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        let reopened = TrackerEngine::open(storage, catalog()).await;
        assert_eq!(reopened.collection(), &expected);
    }

    #[tokio::test]
    async fn test_shared_imports_serialize() {
        let shared = TrackerEngine::open(MemoryStorage::new(), catalog()).await.into_shared();

        let mut first = Collection::seed(&catalog());
        first.toggle_pyq("C1", PyqYear::Y2023);
        let mut second = Collection::seed(&catalog());
        second.toggle_pyq("C2", PyqYear::Y2024);

        let a = {
            let shared = shared.clone();
            let dump = first.to_json().unwrap();
            tokio::spawn(async move { shared.lock().await.import(dump.as_bytes()).await.is_ok() })
        };
        assert!(a.await.unwrap());

        let b = {
            let shared = shared.clone();
            let dump = second.to_json().unwrap();
            tokio::spawn(async move { shared.lock().await.import(dump.as_bytes()).await.is_ok() })
        };
        assert!(b.await.unwrap());

        let engine = shared.lock().await;
        assert_eq!(engine.collection(), &second);
        let stored = Collection::parse(engine.storage().peek(DEFAULT_KEY).unwrap()).unwrap();
        assert_eq!(stored, second);
    }
}
