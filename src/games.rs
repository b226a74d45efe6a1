//! Supported wargames and their static connection metadata

use clap::ValueEnum;
use std::fmt;

/// Domain every game's lab hosts live under
pub const PROVIDER_DOMAIN: &str = "overthewire.org";

/// One wargame track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Game {
    Bandit,
    Natas,
    Leviathan,
    Krypton,
    Narnia,
    Behemoth,
    Utumno,
    Maze,
    Vortex,
    Manpage,
    Drifter,
    Formulaone,
}

/// How a game is reached from the launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// SSH port; `None` means remote sessions are not configured for this game
    pub port: Option<u16>,
    /// Played through a browser rather than a terminal
    pub is_web: bool,
}

impl Connection {
    const fn ssh(port: u16) -> Self {
        Self {
            port: Some(port),
            is_web: false,
        }
    }

    const fn web() -> Self {
        Self {
            port: None,
            is_web: true,
        }
    }
}

impl Game {
    /// Every supported game, in the order progress is reported
    pub const ALL: [Game; 12] = [
        Game::Bandit,
        Game::Natas,
        Game::Leviathan,
        Game::Krypton,
        Game::Narnia,
        Game::Behemoth,
        Game::Utumno,
        Game::Maze,
        Game::Vortex,
        Game::Manpage,
        Game::Drifter,
        Game::Formulaone,
    ];

    /// Directory and user-name prefix for this game
    pub fn name(self) -> &'static str {
        match self {
            Game::Bandit => "bandit",
            Game::Natas => "natas",
            Game::Leviathan => "leviathan",
            Game::Krypton => "krypton",
            Game::Narnia => "narnia",
            Game::Behemoth => "behemoth",
            Game::Utumno => "utumno",
            Game::Maze => "maze",
            Game::Vortex => "vortex",
            Game::Manpage => "manpage",
            Game::Drifter => "drifter",
            Game::Formulaone => "formulaone",
        }
    }

    pub fn connection(self) -> Connection {
        match self {
            Game::Bandit => Connection::ssh(2220),
            Game::Natas => Connection::web(),
            Game::Leviathan => Connection::ssh(2223),
            Game::Krypton => Connection::ssh(2231),
            Game::Narnia => Connection::ssh(2226),
            Game::Behemoth => Connection::ssh(2221),
            Game::Utumno => Connection::ssh(2227),
            Game::Maze => Connection::ssh(2225),
            Game::Vortex => Connection::ssh(2228),
            Game::Manpage => Connection::ssh(2224),
            Game::Drifter => Connection::ssh(2230),
            Game::Formulaone => Connection::ssh(2232),
        }
    }

    /// Host serving this game's levels, e.g. `bandit.labs.overthewire.org`
    pub fn host(self) -> String {
        format!("{}.labs.{}", self.name(), PROVIDER_DOMAIN)
    }

    /// Browser URL for a web-based level
    pub fn web_url(self, level: &str) -> String {
        format!("http://{}{}.{}", self.name(), level, self.host())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
