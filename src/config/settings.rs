use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Participant;

fn default_a_name() -> String {
    "Faizal".to_string()
}
fn default_b_name() -> String {
    "Ainun".to_string()
}
fn default_tick_rate_ms() -> u64 {
    1000
}

/// Display names only; storage always uses the fixed participant keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsConfig {
    #[serde(default = "default_a_name")]
    pub a_name: String,
    #[serde(default = "default_b_name")]
    pub b_name: String,
}

impl Default for ParticipantsConfig {
    fn default() -> Self {
        Self {
            a_name: default_a_name(),
            b_name: default_b_name(),
        }
    }
}

impl ParticipantsConfig {
    pub fn name(&self, who: Participant) -> &str {
        match who {
            Participant::ParticipantA => &self.a_name,
            Participant::ParticipantB => &self.b_name,
        }
    }

    /// Accepts a display name (case-insensitive) or anything `Participant` parses.
    pub fn resolve(&self, input: &str) -> Result<Participant> {
        let wanted = input.trim();
        if let Some(who) = Participant::ALL
            .into_iter()
            .find(|who| self.name(*who).eq_ignore_ascii_case(wanted))
        {
            return Ok(who);
        }
        wanted.parse::<Participant>().map_err(|_| {
            anyhow::anyhow!(
                "Unknown participant '{}'. Use: {}, {}, a or b",
                input,
                self.a_name,
                self.b_name
            )
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// How often the TUI re-checks the clock, so "today" moves at midnight.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub participants: ParticipantsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "ramadhan-tracker")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("ramadhan-tracker.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
