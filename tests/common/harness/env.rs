//! Isolated test environment with temp journal and standup directories.

#![allow(dead_code)]

use super::{NotesCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment.
///
/// Creates `journal/` and `standup/` directories plus a `config.toml`
/// pointing at them inside a temp directory that is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
    journal_dir: PathBuf,
    standup_dir: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with the default config.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Creates a test environment whose config has `extra_journal` appended to the
    /// `[journal]` table.
    pub fn with_config(extra_journal: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let journal_dir = root.join("journal");
        let standup_dir = root.join("standup");
        std::fs::create_dir_all(&journal_dir).expect("Failed to create journal dir");
        std::fs::create_dir_all(&standup_dir).expect("Failed to create standup dir");

        let config = format!(
            "[journal]\n\
             dir = '{}'\n\
             work_done_sections = [\"Done\"]\n\
             skip_text = [\"What did I do?\"]\n\
             {}\n\
             \n\
             [standup]\n\
             dir = '{}'\n\
             work_done_section = \"Worked on yesterday\"\n",
            journal_dir.display(),
            extra_journal,
            standup_dir.display()
        );
        let config_path = root.join("config.toml");
        std::fs::write(&config_path, config).expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            root,
            journal_dir,
            standup_dir,
            config_path,
        }
    }

    /// Returns the path to the journal directory.
    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// Returns the path to the standup directory.
    pub fn standup_dir(&self) -> &Path {
        &self.standup_dir
    }

    /// Returns the path to the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Adds a journal note and returns its path.
    pub fn add_journal(&self, note: &TestNote) -> PathBuf {
        Self::write_note(&self.journal_dir, note)
    }

    /// Adds a standup note and returns its path.
    pub fn add_standup(&self, note: &TestNote) -> PathBuf {
        Self::write_note(&self.standup_dir, note)
    }

    fn write_note(dir: &Path, note: &TestNote) -> PathBuf {
        let path = dir.join(note.file_name());
        std::fs::write(&path, note.render()).expect("Failed to write test note");
        path
    }

    /// Reads a file from the test environment.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }

    /// Writes a file under the environment root and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a NotesCommand configured for this test environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new().config(&self.config_path)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_note_directories() {
        let env = TestEnv::new();
        assert!(env.journal_dir().is_dir());
        assert!(env.standup_dir().is_dir());
        assert!(env.config_path().is_file());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.journal_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_journal_uses_dated_name() {
        let env = TestEnv::new();
        let path = env.add_journal(&TestNote::new("2024-03-04").section("Done", &["a"]));
        assert_eq!(path, env.journal_dir().join("2024-03-04.md"));
        assert!(env.read(&path).contains("# Done"));
    }
}
