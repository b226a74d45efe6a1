use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::games::Game;

/// The on-disk vault: one directory per game holding level passwords and notes
#[derive(Debug, Clone)]
pub struct Vault {
    pub root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_dir)
    }

    /// Returns the directory for a game (<root>/<game>)
    pub fn game_dir(&self, game: Game) -> PathBuf {
        self.root.join(game.name())
    }

    /// Returns the password file for a level (<root>/<game>/level<level>.txt)
    pub fn password_path(&self, game: Game, level: &str) -> PathBuf {
        self.game_dir(game).join(format!("level{}.txt", level))
    }

    /// Returns the note file for a level (<root>/<game>/level<level>.md)
    pub fn note_path(&self, game: Game, level: &str) -> PathBuf {
        self.game_dir(game).join(format!("level{}.md", level))
    }

    /// Creates the game directory if needed
    pub fn ensure_game_dir(&self, game: Game) -> Result<PathBuf> {
        let dir = self.game_dir(game);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create game directory: {:?}", dir))?;
        Ok(dir)
    }

    /// Saves a level password verbatim, replacing any previous one
    pub fn save_password(&self, game: Game, level: &str, password: &str) -> Result<PathBuf> {
        self.ensure_game_dir(game)?;
        let path = self.password_path(game, level);
        std::fs::write(&path, password)
            .with_context(|| format!("Failed to write password file: {:?}", path))?;
        tracing::debug!(path = %path.display(), "password saved");
        Ok(path)
    }

    /// Reads a level password, trimmed. `None` when nothing has been saved.
    pub fn read_password(&self, game: Game, level: &str) -> Result<Option<String>> {
        read_trimmed(&self.password_path(game, level))
    }
}

fn read_trimmed(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read password file: {:?}", path))?;
    Ok(Some(content.trim().to_string()))
}
