use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const BASE_DIR_KEY: &str = "base_dir=";

/// Resolved otw configuration, loaded once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the vault holding one directory per game
    pub base_dir: PathBuf,
}

/// Returns the otw config directory (~/.config/otw/)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("otw"))
}

/// Returns the config file path (~/.config/otw/config)
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config"))
}

/// Expands a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Writes `base_dir=<path>` to the user's config file, replacing any previous content
pub fn set_base_dir(base_dir: &str) -> Result<PathBuf> {
    let path = config_file()?;
    write_base_dir(&path, base_dir)?;
    Ok(path)
}

/// Loads the config from the user's config file
pub fn load_config() -> std::result::Result<Config, ConfigError> {
    let path = config_file().map_err(|_| ConfigError::NoHome)?;
    read_config(&path)
}

fn write_base_dir(path: &Path, base_dir: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
    }

    let expanded = expand_home(base_dir.trim());
    let content = format!("{}{}\n", BASE_DIR_KEY, expanded.display());
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    tracing::debug!(path = %path.display(), base_dir = %expanded.display(), "config written");
    Ok(())
}

fn read_config(path: &Path) -> std::result::Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    // First base_dir line wins; anything else in the file is ignored
    let value = content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(BASE_DIR_KEY))
        .ok_or_else(|| ConfigError::Incomplete {
            path: path.to_path_buf(),
        })?;

    Ok(Config {
        base_dir: expand_home(value.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/otw-vault"), home.join("otw-vault"));
        assert_eq!(expand_home("/srv/vault"), PathBuf::from("/srv/vault"));
        assert_eq!(expand_home("vault/~"), PathBuf::from("vault/~"));
    }

    #[test]
    fn test_base_dir_roundtrip_expands_home() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("otw").join("config");

        write_base_dir(&path, "  ~/Documents/otw-vault \n").unwrap();
        let config = read_config(&path).unwrap();

        let expected = dirs::home_dir().unwrap().join("Documents/otw-vault");
        assert_eq!(config.base_dir, expected);
    }

    #[test]
    fn test_base_dir_roundtrip_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        let vault = dir.path().join("vault");

        write_base_dir(&path, vault.to_str().unwrap()).unwrap();
        assert_eq!(read_config(&path).unwrap().base_dir, vault);
    }

    #[test]
    fn test_write_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "base_dir=/old\nextra=1\n").unwrap();

        write_base_dir(&path, "/new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "base_dir=/new\n");
    }

    #[test]
    fn test_missing_config() {
        let dir = TempDir::new().unwrap();
        let err = read_config(&dir.path().join("config")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
        assert!(err.to_string().contains("otw config"));
    }

    #[test]
    fn test_config_without_base_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "# nothing here\neditor=vim\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete { .. }));
    }

    #[test]
    fn test_first_base_dir_line_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "other=x\n  base_dir=/first\nbase_dir=/second\n").unwrap();

        assert_eq!(
            read_config(&path).unwrap().base_dir,
            PathBuf::from("/first")
        );
    }
}
