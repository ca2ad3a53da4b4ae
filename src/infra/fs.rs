//! File I/O for dated notes with atomic writes.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

/// How far back `find_most_recent_note` looks, in days.
pub const SEARCH_WINDOW_DAYS: i64 = 30;

static DATED_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}\.md$").expect("dated note regex is valid")
});

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Returns the file name of the note for `date`, e.g. `2024-03-04.md`.
pub fn note_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m-%d"))
}

/// Returns the path of the note for exactly `date` in `dir`.
pub fn note_path_for_date(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(note_file_name(date))
}

/// Reads a note file as UTF-8 text.
///
/// A UTF-8 byte order mark is stripped.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::PermissionDenied` if access is denied.
/// Returns `FsError::InvalidEncoding` if the file is not valid UTF-8.
pub fn read_note_text(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;

    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 byte order mark detected; convert to UTF-8".into(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    Ok(match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Writes note text to a file path atomically.
///
/// Uses a temporary file in the same directory and an atomic rename, so a
/// reader never sees a half-written note.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the atomic rename fails.
pub fn write_note_text(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(FsError::NotFound { path: path.into() }),
    };

    if !parent.is_dir() {
        return Err(FsError::NotFound {
            path: parent.into(),
        });
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(content.as_bytes())
        .map_err(|e| FsError::Io {
            path: path.into(),
            source: e,
        })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Finds the newest `YYYY-MM-DD.md` note in `dir` dated within the
/// [`SEARCH_WINDOW_DAYS`] days ending on `end` (inclusive of `end`).
///
/// Only the top level of `dir` is searched. Names that look dated but aren't
/// real calendar dates are ignored.
///
/// Returns the file name, or `None` if no note falls in the window.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn find_most_recent_note(dir: &Path, end: NaiveDate) -> Result<Option<String>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let window_start = end - Duration::days(SEARCH_WINDOW_DAYS);
    let mut most_recent: Option<(NaiveDate, String)> = None;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => FsError::from_io(&path, io),
                None => FsError::Io {
                    path,
                    source: io::Error::other("filesystem loop detected"),
                },
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(date) = date_from_file_name(name) else {
            continue;
        };

        let in_window = date > window_start && date <= end;
        let newer = most_recent.as_ref().is_none_or(|(best, _)| date > *best);
        if in_window && newer {
            most_recent = Some((date, name.to_string()));
        }
    }

    Ok(most_recent.map(|(_, name)| name))
}

/// Parses the date out of a `YYYY-MM-DD.md` file name.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    if !DATED_NOTE.is_match(name) {
        return None;
    }
    NaiveDate::parse_from_str(&name[..10], "%Y-%m-%d").ok()
}
