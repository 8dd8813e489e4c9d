//! Git CLI Integration
//!
//! Wrapper around the `git` executable for script repository sync.
//! Uses the CLI instead of a bundled git library so the user's existing
//! credentials, proxies, and transport configuration apply unchanged.

use std::path::Path;
use std::process::Command;

/// Error type for git operations
#[derive(Debug)]
pub enum GitError {
    CommandFailed { command: String, stderr: String },
    IoError(std::io::Error),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed { command, stderr } => {
                write!(f, "Command '{}' failed: {}", command, stderr.trim())
            }
            GitError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GitError {}

impl From<std::io::Error> for GitError {
    fn from(e: std::io::Error) -> Self {
        GitError::IoError(e)
    }
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Clone `url` into `dir`.
pub fn clone(url: &str, dir: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(dir)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitError::CommandFailed {
            command: format!("git clone {}", url),
            stderr,
        });
    }

    Ok(())
}

/// Fetch remote refs for the repository at `dir`.
pub fn fetch(dir: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["fetch", "--quiet"])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitError::CommandFailed {
            command: "git fetch --quiet".to_string(),
            stderr,
        });
    }

    Ok(())
}

/// Branch status for the repository at `dir`, untracked files suppressed.
/// Returns the raw `git status -uno -b` stdout for the caller to inspect.
pub fn status_branch(dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["status", "-uno", "-b"])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitError::CommandFailed {
            command: "git status -uno -b".to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Pull the current branch for the repository at `dir`.
pub fn pull(dir: &Path) -> Result<()> {
    let output = Command::new("git").arg("-C").arg(dir).arg("pull").output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitError::CommandFailed {
            command: "git pull".to_string(),
            stderr,
        });
    }

    Ok(())
}

/// True when a `status -uno -b` report says the local branch trails its
/// upstream.
pub fn behind_upstream(status: &str) -> bool {
    status.contains("Your branch is behind")
}
