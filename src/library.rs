// The local library: a durable, title-keyed collection of saved books.
// The storage engine is a JSON file rewritten atomically on every add;
// the `LibraryStore` trait is the contract, the file format is not.

use crate::book::Book;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// The persistence layer could not read or write the library file.
/// Fatal to the current operation; previously stored entries stay
/// intact because writes go through a temp file and a rename.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("library file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Contract of the local library, independent of the storage engine.
pub trait LibraryStore {
    /// Insert or overwrite the entry keyed by the book's title. The
    /// store is durable once this returns.
    fn add(&mut self, book: Book) -> Result<(), StorageError>;

    /// Every entry as `(title, book)`, in insertion order.
    fn list(&self) -> Vec<(&str, &Book)>;

    fn count(&self) -> usize;
}

/// A library persisted as a JSON array of books, in insertion order.
/// Titles are unique: adding a known title replaces the entry in place.
#[derive(Debug)]
pub struct JsonFileLibrary {
    path: PathBuf,
    books: Vec<Book>,
}

impl JsonFileLibrary {
    /// Open a library file, treating a missing file as an empty
    /// library. The file itself is only created on the first add.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let books = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(JsonFileLibrary { path, books })
    }

    /// Default location under the platform data directory, falling
    /// back to the current directory.
    pub fn default_path() -> PathBuf {
        let dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join("bibshelf").join("library.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole file through a temp file in the same
    /// directory plus a rename, so an interrupted write never leaves a
    /// half-written library behind.
    fn persist(&self) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), &self.books)?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl LibraryStore for JsonFileLibrary {
    fn add(&mut self, book: Book) -> Result<(), StorageError> {
        match self.books.iter_mut().find(|b| b.title == book.title) {
            Some(slot) => *slot = book,
            None => self.books.push(book),
        }
        self.persist()
    }

    fn list(&self) -> Vec<(&str, &Book)> {
        self.books.iter().map(|b| (b.title.as_str(), b)).collect()
    }

    fn count(&self) -> usize {
        self.books.len()
    }
}
