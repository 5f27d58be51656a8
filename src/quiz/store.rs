use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::quiz::{QuizError, QuizQuestion};

/// JSON file holding every question persisted by the current run,
/// plus whatever an earlier run failed to clean up.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Everything currently on disk, or nothing if the file does not exist yet.
    pub fn load(&self) -> Result<Vec<QuizQuestion>, QuizError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    /// Layers `batch` onto the stored questions and rewrites the whole file.
    pub fn append(&self, batch: &[QuizQuestion]) -> Result<Vec<QuizQuestion>, QuizError> {
        let mut questions = self.load()?;
        if !questions.is_empty() {
            log::warn!(
                "{} already holds {} questions from an earlier run, keeping them",
                self.path.display(),
                questions.len()
            );
        }
        questions.extend_from_slice(batch);

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        questions.serialize(&mut serializer)?;

        std::fs::write(&self.path, buf)?;
        log::info!(
            "Saved {} questions to {}",
            questions.len(),
            self.path.display()
        );
        Ok(questions)
    }

    /// Deletes the file. A missing file is not an error.
    pub fn purge(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Removed {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// Purges the store when dropped, so the file goes away on every way out of
/// the game that unwinds the stack.
pub struct StoreGuard {
    store: QuestionStore,
}

impl StoreGuard {
    pub fn new(store: QuestionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        if let Err(err) = self.store.purge() {
            log::warn!("Failed to remove {}: {}", self.store.path.display(), err);
        }
    }
}
