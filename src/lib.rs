//! molboot - startup bootstrap for molecular visualization sessions
//!
//! Keep the community script repository cloned and current, wire its paths
//! into the host module loader, and load the ColorBrewer palettes into the
//! host color registry with matching autocomplete entries.
//!
//! # Overview
//!
//! Two independent routines run once at session startup, in sequence:
//!
//! | Routine | Purpose |
//! |---------|---------|
//! | Repository sync | Clone or update the script repository, register its paths |
//! | Palette loader | Fetch the ColorBrewer gist, register named colors |
//!
//! The host application is reached only through the [`VizHost`] trait, so
//! both routines run the same against a live session binding or the
//! in-memory [`SessionHost`].
//!
//! # Quick Start
//!
//! ```no_run
//! use molboot::{load_palettes, Config, ScriptRepo, SessionHost};
//!
//! let config = Config::load();
//! let mut host = SessionHost::new();
//!
//! let repo = ScriptRepo::new(
//!     config.repo_dir(),
//!     config.repo.url.clone(),
//!     config.marker_path(),
//!     config.check_interval(),
//! );
//! repo.sync();
//! repo.register(&mut host, &config.repo.modules_env_var);
//!
//! let registered = load_palettes(&mut host, &config.palette.url).unwrap();
//! println!("Session ready with {} palette colors", registered);
//! ```

pub mod config;
pub mod git;
pub mod host;
pub mod palette;
pub mod repo;

pub use config::Config;
pub use host::{ArgCompleter, CompletionSupplier, Rgb, SessionHost, VizHost};
pub use palette::{load_palettes, PaletteError, PaletteSet};
pub use repo::{ScriptRepo, SyncOutcome};
