//! Git sync for the vault.
//!
//! The vault root is expected to be a git working copy with an `origin`
//! remote. Staging and pushing must succeed. A rejected commit is only
//! tolerated when nothing is staged under the pathspec, so the push still runs.

use anyhow::{bail, Result};
use chrono::Local;
use std::collections::BTreeSet;

use crate::process::{Invocation, ProcessRunner};
use crate::vault::Vault;

const REMOTE: &str = "origin";
const BRANCH: &str = "main";

/// Target meaning "the whole vault"
pub const ALL: &str = "all";

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Builds `game levelN` tokens from staged paths like `bandit/level3.txt`, sorted and deduplicated
pub fn level_tokens<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let tokens: BTreeSet<String> = paths
        .into_iter()
        .filter_map(|path| {
            let mut parts = path.trim().split('/');
            let game = parts.next().filter(|g| !g.is_empty())?;
            let file = parts.next()?;
            if !file.starts_with("level") {
                return None;
            }
            let level = file.split('.').next().unwrap_or(file);
            Some(format!("{} {}", game, level))
        })
        .collect();

    tokens.into_iter().collect()
}

/// Commit message for `push all`: the touched levels, or a timestamped fallback
pub fn progress_commit_message(staged: &str, now: &str) -> String {
    let tokens = level_tokens(staged.lines());
    if tokens.is_empty() {
        format!("Updated vault - {}", now)
    } else {
        format!("Progress: {}", tokens.join(", "))
    }
}

fn git(vault: &Vault) -> Invocation {
    Invocation::new("git").current_dir(&vault.root)
}

fn run_git(vault: &Vault, args: &[&str], runner: &dyn ProcessRunner) -> Result<()> {
    if !runner.run(&git(vault).args(args.iter().copied()))? {
        bail!("git {} failed. Is the vault a git repo with a remote?", args.join(" "));
    }
    Ok(())
}

fn staged_paths(vault: &Vault, pathspec: &str, runner: &dyn ProcessRunner) -> Result<String> {
    runner.capture(&git(vault).args(["diff", "--cached", "--name-only", "--", pathspec]))
}

fn commit(vault: &Vault, message: &str, pathspec: &str, runner: &dyn ProcessRunner) -> Result<()> {
    if runner.run(&git(vault).args(["commit", "-m", message]))? {
        return Ok(());
    }

    if !staged_paths(vault, pathspec, runner)?.trim().is_empty() {
        bail!("git commit failed with staged changes under {}", pathspec);
    }
    tracing::warn!(commit_message = message, "nothing to commit, pushing anyway");
    Ok(())
}

/// Stages, commits and pushes either one game's directory or the whole vault
pub fn push(vault: &Vault, target: &str, runner: &dyn ProcessRunner) -> Result<()> {
    if target == ALL {
        run_git(vault, &["add", "."], runner)?;
        let staged = staged_paths(vault, ".", runner)?;
        let message = progress_commit_message(&staged, &timestamp());
        commit(vault, &message, ".", runner)?;
    } else {
        run_git(vault, &["add", target], runner)?;
        let message = format!("Progress update {} - {}", target, timestamp());
        commit(vault, &message, target, runner)?;
    }

    run_git(vault, &["push", REMOTE, BRANCH], runner)
}

/// Pulls the whole vault. `target` is accepted for symmetry with `push` but git pulls everything.
pub fn pull(vault: &Vault, target: &str, runner: &dyn ProcessRunner) -> Result<()> {
    tracing::debug!(requested = target, "pull always updates the whole vault");
    run_git(vault, &["pull", REMOTE, BRANCH], runner)
}
