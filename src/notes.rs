use anyhow::Result;

use crate::games::Game;
use crate::process::{Invocation, ProcessRunner};
use crate::vault::Vault;

const DEFAULT_EDITOR: &str = "nano";

/// Editor from $EDITOR, falling back to nano
pub fn editor_from_env() -> String {
    std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Opens the level's note file in the editor and blocks until it exits
pub fn edit_note(
    vault: &Vault,
    game: Game,
    level: &str,
    editor: &str,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    vault.ensure_game_dir(game)?;
    let path = vault.note_path(game, level);

    let invocation = Invocation::new(editor).arg(path.to_string_lossy());
    if !runner.run(&invocation)? {
        tracing::warn!(editor, "editor exited with non-zero status");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn test_edit_note_creates_dir_and_opens_editor() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let runner = RecordingRunner::default();

        edit_note(&vault, Game::Leviathan, "3", "vim", &runner).unwrap();

        assert!(vault.game_dir(Game::Leviathan).is_dir());
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "vim");
        assert_eq!(
            calls[0].args,
            vec![vault.note_path(Game::Leviathan, "3").to_string_lossy().into_owned()]
        );
        // The note itself is left to the editor
        assert!(!vault.note_path(Game::Leviathan, "3").exists());
    }

    #[test]
    fn test_editor_failure_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let runner = RecordingRunner {
            fail_on: Some("nano"),
            ..Default::default()
        };

        assert!(edit_note(&vault, Game::Bandit, "0", "nano", &runner).is_ok());
    }
}
