mod config;
mod error;
mod games;
mod launcher;
mod notes;
mod output;
mod process;
mod progress;
mod sync;
mod vault;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::games::Game;
use crate::process::SystemRunner;
use crate::vault::Vault;

#[derive(Parser)]
#[command(name = "otw")]
#[command(about = "CLI companion for OverTheWire wargames")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set base directory for your password vault
    Config {
        /// Path to your vault (e.g., ~/Documents/otw-vault)
        base_dir: String,
    },
    /// Save a password
    Save {
        game: Game,
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        level: String,
        password: String,
    },
    /// Show saved password
    Pw {
        game: Game,
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        level: String,
    },
    /// Edit level notes
    Note {
        game: Game,
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        level: String,
    },
    /// List saved levels
    Ls { game: Game },
    /// SSH into a level (manual password entry)
    Ssh {
        game: Game,
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        level: String,
    },
    /// Git push changes for a game
    Push {
        /// Game name or 'all'
        game: String,
    },
    /// Git pull latest changes
    Pull {
        /// Game name or 'all'
        game: String,
    },
    /// Show the highest level reached per game
    Status,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Resolves the vault from the user's config; a missing config is fatal
fn load_vault() -> Result<Vault> {
    let config = config::load_config()?;
    Ok(Vault::from_config(&config))
}

/// The saved password, or the message to show when there is none
fn password_or_notice(
    vault: &Vault,
    game: Game,
    level: &str,
) -> Result<std::result::Result<String, String>> {
    Ok(vault
        .read_password(game, level)?
        .ok_or_else(|| format!("No password found for {} level {}", game, level)))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runner = SystemRunner;

    match cli.command {
        Commands::Config { base_dir } => {
            let path = config::set_base_dir(&base_dir)?;
            output::success(&format!("Config saved to {}", path.display()));
        }
        Commands::Save {
            game,
            level,
            password,
        } => {
            load_vault()?.save_password(game, &level, &password)?;
            output::success(&format!("Saved password for {} level {}", game, level));
        }
        Commands::Pw { game, level } => match password_or_notice(&load_vault()?, game, &level)? {
            Ok(password) => output::plain(&password),
            Err(notice) => output::error(&notice),
        },
        Commands::Note { game, level } => {
            let vault = load_vault()?;
            notes::edit_note(&vault, game, &level, &notes::editor_from_env(), &runner)?;
        }
        Commands::Ls { game } => {
            progress::list_levels(&load_vault()?, game)?;
        }
        Commands::Ssh { game, level } => {
            launcher::connect(&load_vault()?, game, &level, &runner)?;
        }
        Commands::Push { game } => match sync::push(&load_vault()?, &game, &runner) {
            Ok(()) => output::success(&format!("Pushed changes for {}", game)),
            Err(e) => output::error(&format!("Git push failed: {:#}", e)),
        },
        Commands::Pull { game } => match sync::pull(&load_vault()?, &game, &runner) {
            Ok(()) => output::success("Pulled latest changes"),
            Err(e) => output::error(&format!("Git pull failed: {:#}", e)),
        },
        Commands::Status => {
            progress::show_status(&load_vault()?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_game_must_be_supported() {
        assert!(Cli::try_parse_from(["otw", "save", "bandit", "0", "pw"]).is_ok());
        assert!(Cli::try_parse_from(["otw", "save", "hackme", "0", "pw"]).is_err());
        assert!(Cli::try_parse_from(["otw", "ls", "nope"]).is_err());
    }

    #[test]
    fn test_push_accepts_any_target() {
        let cli = Cli::try_parse_from(["otw", "push", "all"]).unwrap();
        assert!(matches!(cli.command, Commands::Push { game } if game == "all"));
        assert!(Cli::try_parse_from(["otw", "pull", "whatever"]).is_ok());
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["otw", "delete", "bandit"]).is_err());
        assert!(Cli::try_parse_from(["otw", "status", "extra"]).is_err());
    }

    #[test]
    fn test_empty_level_rejected() {
        assert!(Cli::try_parse_from(["otw", "save", "bandit", "", "pw"]).is_err());
        assert!(Cli::try_parse_from(["otw", "pw", "bandit", ""]).is_err());
        assert!(Cli::try_parse_from(["otw", "note", "natas", ""]).is_err());
        assert!(Cli::try_parse_from(["otw", "ssh", "bandit", ""]).is_err());
    }

    #[test]
    fn test_pw_reports_missing_password() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());

        assert_eq!(
            password_or_notice(&vault, Game::Bandit, "3").unwrap(),
            Err("No password found for bandit level 3".to_string())
        );
        assert!(!vault.password_path(Game::Bandit, "3").exists());

        vault.save_password(Game::Bandit, "3", "secret\n").unwrap();
        assert_eq!(
            password_or_notice(&vault, Game::Bandit, "3").unwrap(),
            Ok("secret".to_string())
        );
    }
}
