//! Script repository sync
//!
//! Keeps a local clone of the community script repository reasonably
//! current and registers its paths with the host module loader. Every VCS
//! failure is tolerated: the session must still come up offline, so a
//! failed clone or pull is reported and skipped, never fatal.

use crate::git;
use crate::host::VizHost;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// What a sync run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No local clone existed; one was created.
    Cloned,
    /// The local branch trailed upstream and a pull was attempted.
    Pulled,
    /// Checked and nothing to do.
    UpToDate,
    /// The marker was fresh; no VCS call was made.
    Skipped,
}

/// A local mirror of the community script repository.
pub struct ScriptRepo {
    dir: PathBuf,
    url: String,
    marker: PathBuf,
    interval: Duration,
}

impl ScriptRepo {
    /// `marker` is the zero-byte stamp whose mtime records the last remote
    /// check; a zero `interval` means every run checks.
    pub fn new(dir: PathBuf, url: String, marker: PathBuf, interval: Duration) -> Self {
        Self {
            dir,
            url,
            marker,
            interval,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The `modules` subdirectory the host's script loader imports from.
    pub fn modules_dir(&self) -> PathBuf {
        self.dir.join("modules")
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    /// Time since the last recorded remote check, if any.
    pub fn marker_age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.marker).ok()?.modified().ok()?;
        SystemTime::now().duration_since(modified).ok()
    }

    /// A check is due when the clone is missing, the marker is missing or
    /// unreadable, or the marker is at least one interval old.
    pub fn should_check(&self) -> bool {
        if !self.dir.is_dir() {
            return true;
        }
        if self.interval.is_zero() {
            return true;
        }
        match self.marker_age() {
            Some(age) => age >= self.interval,
            None => true,
        }
    }

    /// Run the remote check if one is due, then refresh the marker.
    /// Skipped runs leave the marker untouched.
    pub fn sync(&self) -> SyncOutcome {
        if !self.should_check() {
            println!("Script repository checked recently; skipping update check.");
            return SyncOutcome::Skipped;
        }

        let outcome = self.check();
        self.touch_marker();
        outcome
    }

    /// Unconditional remote check: fetch + status + pull for an existing
    /// clone, a fresh clone otherwise.
    pub fn check(&self) -> SyncOutcome {
        if self.dir.is_dir() {
            println!("Checking for updates to the script repository...");

            if let Err(e) = git::fetch(&self.dir) {
                println!(
                    "{} unable to fetch remote updates ({}); using local status.",
                    "warning:".yellow().bold(),
                    e
                );
            }

            match git::status_branch(&self.dir) {
                Ok(status) if git::behind_upstream(&status) => {
                    println!("Updates available. Pulling latest scripts...");
                    if let Err(e) = git::pull(&self.dir) {
                        println!(
                            "{} pull failed ({}); keeping the current checkout.",
                            "warning:".yellow().bold(),
                            e
                        );
                    }
                    SyncOutcome::Pulled
                }
                Ok(_) => {
                    println!("Script repository is up to date.");
                    SyncOutcome::UpToDate
                }
                Err(e) => {
                    println!(
                        "{} unable to read branch status ({}).",
                        "warning:".yellow().bold(),
                        e
                    );
                    SyncOutcome::UpToDate
                }
            }
        } else {
            println!("Cloning script repository...");
            if let Err(e) = git::clone(&self.url, &self.dir) {
                println!(
                    "{} clone failed ({}); continuing without the script repository.",
                    "warning:".yellow().bold(),
                    e
                );
            }
            SyncOutcome::Cloned
        }
    }

    /// Record the check time. Best effort: an unwritable cache directory
    /// only means the next run checks again.
    fn touch_marker(&self) {
        if let Some(parent) = self.marker.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::File::create(&self.marker);
    }

    /// Wire the repository into the host: repo root and `modules` onto the
    /// module search path, and `env_var` pointed at `modules` for the
    /// host's own loader. Safe to call on every run; already-present paths
    /// are not duplicated.
    pub fn register(&self, host: &mut dyn VizHost, env_var: &str) {
        let modules = self.modules_dir();
        host.append_module_path(&self.dir);
        host.append_module_path(&modules);
        std::env::set_var(env_var, &modules);
        println!("Script repository loaded.");
    }
}
