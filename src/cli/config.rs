//! Configuration file support.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Cli;

/// Default standup section that receives work done.
pub const DEFAULT_STANDUP_WORK_DONE_SECTION: &str = "Worked on yesterday";

/// Default titles of links pointing at the previous journal.
pub const DEFAULT_LINK_PREVIOUS_TITLES: &[&str] = &["Yesterday", "Previous"];

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "STANDUP";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub journal: JournalConfig,
    pub standup: StandupConfig,
}

/// The `[journal]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Directory holding `YYYY-MM-DD.md` journals
    pub dir: Option<PathBuf>,

    /// Sections whose content counts as work done
    pub work_done_sections: Vec<String>,

    /// Text to drop from section content
    pub skip_text: Vec<String>,

    /// Titles of links that point at the previous journal
    pub link_previous_titles: Vec<String>,

    /// Command that creates today's journal and prints its path
    pub create_cmd: Option<String>,
}

/// The `[standup]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StandupConfig {
    /// Directory holding `YYYY-MM-DD.md` standups
    pub dir: Option<PathBuf>,

    /// Section that receives work done from the journal
    pub work_done_section: Option<String>,

    /// Text to drop from section content
    pub skip_text: Vec<String>,

    /// Command that creates today's standup and prints its path
    pub create_cmd: Option<String>,
}

impl Config {
    /// Load configuration, then apply `STANDUP_*` environment overrides.
    ///
    /// An explicit path must exist. Otherwise the first existing file of
    /// `./.standupnotes.toml` and [`Config::config_path`] is used, and the
    /// defaults apply if neither exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Self::from_file(path)?
            }
            None => match Self::candidate_paths().into_iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the user-level config file.
    ///
    /// Default: `~/.config/standupnotes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("standupnotes")
            .join("config.toml")
    }

    fn candidate_paths() -> Vec<PathBuf> {
        vec![PathBuf::from(".standupnotes.toml"), Self::config_path()]
    }

    /// Overrides scalar settings from the environment.
    ///
    /// Recognized: `STANDUP_JOURNAL_DIR`, `STANDUP_STANDUP_DIR`,
    /// `STANDUP_JOURNAL_CREATE_CMD`, `STANDUP_STANDUP_CREATE_CMD`,
    /// `STANDUP_STANDUP_WORK_DONE_SECTION`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}")).filter(|v| !v.trim().is_empty())
        };

        if let Some(dir) = var("JOURNAL_DIR") {
            self.journal.dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = var("STANDUP_DIR") {
            self.standup.dir = Some(PathBuf::from(dir));
        }
        if let Some(cmd) = var("JOURNAL_CREATE_CMD") {
            self.journal.create_cmd = Some(cmd);
        }
        if let Some(cmd) = var("STANDUP_CREATE_CMD") {
            self.standup.create_cmd = Some(cmd);
        }
        if let Some(section) = var("STANDUP_WORK_DONE_SECTION") {
            self.standup.work_done_section = Some(section);
        }
    }
}

/// Effective settings after merging CLI flags over configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub journal_dir: PathBuf,
    pub standup_dir: PathBuf,
    pub journal_work_done_sections: Vec<String>,
    pub standup_work_done_section: String,
    pub journal_skip_text: Vec<String>,
    pub standup_skip_text: Vec<String>,
    pub journal_link_previous_titles: Vec<String>,
    pub journal_create_cmd: Option<String>,
    pub standup_create_cmd: Option<String>,
}

impl Settings {
    /// Resolve settings. Precedence for each value:
    /// 1. CLI flag
    /// 2. Environment / config file (already merged by [`Config::load`])
    /// 3. Built-in default
    ///
    /// Directories are made absolute.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let journal_dir = pick_dir(cli.journal_dir.as_ref(), config.journal.dir.as_ref())?;
        let standup_dir = pick_dir(cli.standup_dir.as_ref(), config.standup.dir.as_ref())?;

        let journal_link_previous_titles = pick_list(
            &cli.journal_link_previous_titles,
            &config.journal.link_previous_titles,
        );
        let journal_link_previous_titles = if journal_link_previous_titles.is_empty() {
            DEFAULT_LINK_PREVIOUS_TITLES
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            journal_link_previous_titles
        };

        Ok(Self {
            journal_dir,
            standup_dir,
            journal_work_done_sections: pick_list(
                &cli.journal_work_done_sections,
                &config.journal.work_done_sections,
            ),
            standup_work_done_section: cli
                .standup_work_done_section
                .clone()
                .or_else(|| config.standup.work_done_section.clone())
                .unwrap_or_else(|| DEFAULT_STANDUP_WORK_DONE_SECTION.to_string()),
            journal_skip_text: pick_list(&cli.journal_skip_text, &config.journal.skip_text),
            standup_skip_text: pick_list(&cli.standup_skip_text, &config.standup.skip_text),
            journal_link_previous_titles,
            journal_create_cmd: config.journal.create_cmd.clone(),
            standup_create_cmd: config.standup.create_cmd.clone(),
        })
    }
}

fn pick_dir(cli: Option<&PathBuf>, config: Option<&PathBuf>) -> Result<PathBuf> {
    let dir = cli
        .or(config)
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    std::path::absolute(&dir)
        .with_context(|| format!("failed to resolve directory: {}", dir.display()))
}

fn pick_list(cli: &[String], config: &[String]) -> Vec<String> {
    if cli.is_empty() {
        config.to_vec()
    } else {
        cli.to_vec()
    }
}
