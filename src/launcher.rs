use anyhow::Result;

use crate::games::{Connection, Game};
use crate::output;
use crate::process::{Invocation, ProcessRunner};
use crate::vault::Vault;

/// What `connect` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Web game; only the URL was printed
    WebHint(String),
    /// No SSH port known for the game
    PortUnconfigured,
    /// Nothing saved for the level
    NoPassword,
    /// The ssh client ran and exited
    Session { success: bool },
}

/// Picks the clipboard helper for this platform
pub fn clipboard_command() -> Invocation {
    if cfg!(target_os = "macos") {
        Invocation::new("pbcopy")
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Invocation::new("wl-copy")
    } else {
        Invocation::new("xclip").args(["-selection", "clipboard"])
    }
}

/// Hands the password to the clipboard helper without waiting on it
pub fn copy_to_clipboard_detached(password: &str, runner: &dyn ProcessRunner) {
    runner.launch_detached(&clipboard_command().stdin(password));
}

/// Opens an SSH session to a level, or prints the URL for web games
pub fn connect(
    vault: &Vault,
    game: Game,
    level: &str,
    runner: &dyn ProcessRunner,
) -> Result<ConnectOutcome> {
    connect_with(vault, game, game.connection(), level, runner)
}

fn connect_with(
    vault: &Vault,
    game: Game,
    connection: Connection,
    level: &str,
    runner: &dyn ProcessRunner,
) -> Result<ConnectOutcome> {
    if connection.is_web {
        let url = game.web_url(level);
        output::info(&format!("{} is played in the browser: {}", game, url));
        return Ok(ConnectOutcome::WebHint(url));
    }

    let Some(port) = connection.port else {
        output::warning(&format!("SSH port not configured for {}", game));
        return Ok(ConnectOutcome::PortUnconfigured);
    };

    let Some(password) = vault.read_password(game, level)? else {
        output::error(&format!("No password found for {} level {}", game, level));
        return Ok(ConnectOutcome::NoPassword);
    };

    copy_to_clipboard_detached(&password, runner);

    let user = format!("{}{}", game, level);
    let host = game.host();
    output::info(&format!(
        "Connecting to {}@{} on port {} (password copied to clipboard, paste it when prompted)",
        user, host, port
    ));

    let ssh = Invocation::new("ssh")
        .arg(format!("{}@{}", user, host))
        .args(["-p".to_string(), port.to_string()]);
    let success = runner.run(&ssh)?;
    if !success {
        tracing::warn!(%user, %host, port, "ssh exited with non-zero status");
    }

    Ok(ConnectOutcome::Session { success })
}
