//! Host application ABI
//!
//! The visualization host owns the color registry, the per-argument
//! autocomplete tables, and the script module search path. Everything
//! molboot does on the host side goes through the [`VizHost`] trait, so the
//! setup routines run the same against a live session binding or the
//! in-memory [`SessionHost`] used by the CLI and the tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// RGB byte triple as the host color registry stores it.
pub type Rgb = (u8, u8, u8);

/// Callback the host invokes when it needs the completion list for an
/// argument. Receives the host so the list is recomputed on every
/// invocation rather than cached at install time.
pub type CompletionSupplier = Box<dyn Fn(&dyn VizHost) -> Vec<String>>;

/// One `[supplier, description, separator]` entry in the host autocomplete
/// table.
pub struct ArgCompleter {
    pub supplier: CompletionSupplier,
    /// Label the host shows for the argument, e.g. "color name".
    pub description: String,
    /// Separator the host appends after an accepted completion.
    pub separator: String,
}

impl ArgCompleter {
    pub fn new(supplier: CompletionSupplier, description: &str, separator: &str) -> Self {
        Self {
            supplier,
            description: description.to_string(),
            separator: separator.to_string(),
        }
    }
}

/// The slice of the host application molboot is allowed to touch.
pub trait VizHost {
    /// Register a named color, overwriting any previous definition of the
    /// same name.
    fn register_color(&mut self, name: &str, rgb: Rgb);

    /// Names of the colors the host shipped with, in host order. Colors
    /// registered through [`VizHost::register_color`] are not included.
    fn builtin_color_names(&self) -> Vec<String>;

    /// Replace (not merge) the autocomplete entry for `command` at argument
    /// `position`.
    fn set_argument_completer(&mut self, position: usize, command: &str, completer: ArgCompleter);

    /// Append a directory to the script module search path. Appending a
    /// path that is already present is a no-op.
    fn append_module_path(&mut self, path: &Path);

    /// Current module search path, in append order.
    fn module_paths(&self) -> &[PathBuf];
}

/// In-memory host session.
///
/// Seeds a builtin color table and records every registration, completer
/// install, and search-path append, which is all the CLI binary needs to
/// report what a startup run did.
pub struct SessionHost {
    builtins: Vec<String>,
    registered: Vec<(String, Rgb)>,
    completers: HashMap<(usize, String), ArgCompleter>,
    module_paths: Vec<PathBuf>,
}

/// Color names a stock host session starts with.
const BUILTIN_COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "magenta", "cyan", "orange", "white", "black", "gray",
    "salmon", "slate", "wheat", "hotpink", "teal",
];

impl SessionHost {
    pub fn new() -> Self {
        Self::with_builtins(BUILTIN_COLORS.iter().map(|s| s.to_string()).collect())
    }

    /// A host whose builtin color table is exactly `builtins`.
    pub fn with_builtins(builtins: Vec<String>) -> Self {
        Self {
            builtins,
            registered: Vec::new(),
            completers: HashMap::new(),
            module_paths: Vec::new(),
        }
    }

    /// Colors registered this session, in registration order.
    pub fn registered_colors(&self) -> &[(String, Rgb)] {
        &self.registered
    }

    pub fn completer(&self, position: usize, command: &str) -> Option<&ArgCompleter> {
        self.completers.get(&(position, command.to_string()))
    }

    /// Remove and return a completer entry so its supplier can be invoked
    /// against the host it was installed on.
    pub fn take_completer(&mut self, position: usize, command: &str) -> Option<ArgCompleter> {
        self.completers.remove(&(position, command.to_string()))
    }
}

impl Default for SessionHost {
    fn default() -> Self {
        Self::new()
    }
}

impl VizHost for SessionHost {
    fn register_color(&mut self, name: &str, rgb: Rgb) {
        if let Some(slot) = self.registered.iter_mut().find(|(n, _)| n == name) {
            slot.1 = rgb;
        } else {
            self.registered.push((name.to_string(), rgb));
        }
    }

    fn builtin_color_names(&self) -> Vec<String> {
        self.builtins.clone()
    }

    fn set_argument_completer(&mut self, position: usize, command: &str, completer: ArgCompleter) {
        self.completers
            .insert((position, command.to_string()), completer);
    }

    fn append_module_path(&mut self, path: &Path) {
        if !self.module_paths.iter().any(|p| p == path) {
            self.module_paths.push(path.to_path_buf());
        }
    }

    fn module_paths(&self) -> &[PathBuf] {
        &self.module_paths
    }
}
