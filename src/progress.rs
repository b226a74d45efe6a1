use anyhow::{Context, Result};

use crate::games::Game;
use crate::output;
use crate::vault::Vault;

/// Highest saved level for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProgress {
    pub game: Game,
    pub level: u64,
}

const NO_PROGRESS: &str = "No progress yet.";

/// Parses the level number from a password file name like `level12.txt`
fn parse_level(file_name: &str) -> Option<u64> {
    let digits = file_name.strip_prefix("level")?.strip_suffix(".txt")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Collects the highest numbered password file for every game that has one
pub fn collect_progress(vault: &Vault) -> Result<Vec<GameProgress>> {
    let mut progress = Vec::new();

    for game in Game::ALL {
        let dir = vault.game_dir(game);
        if !dir.is_dir() {
            continue;
        }

        let mut max_level: Option<u64> = None;
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read game directory: {:?}", dir))?
        {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(level) = parse_level(&name.to_string_lossy()) {
                max_level = Some(max_level.map_or(level, |m| m.max(level)));
            }
        }

        if let Some(level) = max_level {
            progress.push(GameProgress { game, level });
        }
    }

    Ok(progress)
}

/// Lists password file names for a game in lexical order. `None` when the game has no directory.
pub fn saved_levels(vault: &Vault, game: Game) -> Result<Option<Vec<String>>> {
    let dir = vault.game_dir(game);
    if !dir.exists() {
        return Ok(None);
    }

    let mut files: Vec<String> = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read game directory: {:?}", dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".txt"))
        .collect();
    files.sort();

    Ok(Some(files))
}

/// One line per game with progress, or the single "no progress" notice
pub fn status_lines(progress: &[GameProgress]) -> Vec<String> {
    if progress.is_empty() {
        return vec![NO_PROGRESS.to_string()];
    }
    progress
        .iter()
        .map(|entry| format!("{}: Level {}", entry.game, entry.level))
        .collect()
}

/// File names for `ls`, or the "no data" notice when the game has no directory
pub fn list_lines(game: Game, files: Option<Vec<String>>) -> Vec<String> {
    files.unwrap_or_else(|| vec![format!("No data yet for {}", game)])
}

/// Prints the highest level reached per game
pub fn show_status(vault: &Vault) -> Result<()> {
    for line in status_lines(&collect_progress(vault)?) {
        output::plain(&line);
    }
    Ok(())
}

/// Prints saved password files for a game
pub fn list_levels(vault: &Vault, game: Game) -> Result<()> {
    for line in list_lines(game, saved_levels(vault, game)?) {
        output::plain(&line);
    }
    Ok(())
}
