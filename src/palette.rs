//! ColorBrewer palette loader
//!
//! Downloads the ColorBrewer gist, coerces the JavaScript object literal
//! it ships into JSON, registers one named color per hex value with the
//! host, and rewires the autocomplete entries for `color` and `set_color`
//! so the new names show up alongside the builtins.
//!
//! Unlike repository sync, this step has no tolerated failures: a fetch or
//! parse error aborts palette loading with nothing registered.

use crate::host::{ArgCompleter, Rgb, VizHost};
use indexmap::IndexMap;
use regex::Regex;

/// Palette family -> class size -> ordered hex colors, in gist document
/// order throughout.
pub type PaletteSet = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Argument position of the color name in `color` / `set_color`.
const COLOR_ARG_POSITION: usize = 0;

/// Error type for palette operations
#[derive(Debug)]
pub enum PaletteError {
    Http(reqwest::Error),
    /// The gist body held no `var colorbrewer = {...};` assignment.
    Extract,
    Json(serde_json::Error),
    BadHex(String),
    Regex(regex::Error),
}

impl std::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteError::Http(e) => write!(f, "Failed to fetch palette source: {}", e),
            PaletteError::Extract => {
                write!(f, "No colorbrewer object literal found in palette source")
            }
            PaletteError::Json(e) => write!(f, "Failed to parse repaired palette data: {}", e),
            PaletteError::BadHex(hex) => write!(f, "Invalid hex color '{}'", hex),
            PaletteError::Regex(e) => write!(f, "Regex error: {}", e),
        }
    }
}

impl std::error::Error for PaletteError {}

impl From<reqwest::Error> for PaletteError {
    fn from(e: reqwest::Error) -> Self {
        PaletteError::Http(e)
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(e: serde_json::Error) -> Self {
        PaletteError::Json(e)
    }
}

impl From<regex::Error> for PaletteError {
    fn from(e: regex::Error) -> Self {
        PaletteError::Regex(e)
    }
}

pub type Result<T> = std::result::Result<T, PaletteError>;

/// Fetch the palette source body. Transport errors and non-success status
/// codes are both fatal here.
pub fn fetch_palette_source(url: &str) -> Result<String> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    Ok(body)
}

/// Capture the object-literal body of `var colorbrewer = { ... };`.
pub fn extract_object_literal(source: &str) -> Result<&str> {
    let re = Regex::new(r"(?s)var\s+colorbrewer\s*=\s*(\{.*\});")?;
    match re.captures(source).and_then(|caps| caps.get(1)) {
        Some(m) => Ok(m.as_str()),
        None => Err(PaletteError::Extract),
    }
}

/// Coerce a JavaScript object literal into JSON: double-quote every bare
/// identifier used as a key, then swap single quotes for double quotes.
///
/// Best effort on the subset the gist actually uses. A string value
/// containing a literal `'`, or a word immediately followed by a colon,
/// would be mangled.
pub fn repair_object_literal(literal: &str) -> Result<String> {
    let key_re = Regex::new(r"(\b[a-zA-Z0-9_]+)\s*:")?;
    let quoted_keys = key_re.replace_all(literal, "\"$1\":");
    Ok(quoted_keys.replace('\'', "\""))
}

/// Extract, repair, and parse a gist body into palette maps that keep the
/// document's family and class order.
pub fn parse_palette_source(source: &str) -> Result<PaletteSet> {
    let literal = extract_object_literal(source)?;
    let json = repair_object_literal(literal)?;
    Ok(serde_json::from_str(&json)?)
}

/// Decode `#rrggbb` into an RGB byte triple.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    if !hex.is_ascii() || hex.len() != 7 || !hex.starts_with('#') {
        return Err(PaletteError::BadHex(hex.to_string()));
    }
    let channel = |offset: usize| {
        u8::from_str_radix(&hex[offset..offset + 2], 16)
            .map_err(|_| PaletteError::BadHex(hex.to_string()))
    };
    Ok((channel(1)?, channel(3)?, channel(5)?))
}

/// Name for the `index`-th color (1-based) of a palette class, e.g.
/// `Blues_3_2`.
pub fn color_name(family: &str, size: &str, index: usize) -> String {
    format!("{}_{}_{}", family, size, index)
}

/// Register every palette color with the host and return the new names in
/// registration order. All hex values are decoded before the first
/// registration, so a bad value registers nothing.
pub fn register_palettes(host: &mut dyn VizHost, palettes: &PaletteSet) -> Result<Vec<String>> {
    let mut decoded = Vec::new();
    for (family, classes) in palettes {
        for (size, hex_list) in classes {
            for (index, hex) in hex_list.iter().enumerate() {
                decoded.push((color_name(family, size, index + 1), hex_to_rgb(hex)?));
            }
        }
    }

    let mut new_colors = Vec::with_capacity(decoded.len());
    for (name, rgb) in decoded {
        host.register_color(&name, rgb);
        new_colors.push(name);
    }
    Ok(new_colors)
}

/// Point the `color` and `set_color` autocomplete entries at a combined
/// builtin + palette name list. The builtin half is read from the host on
/// every invocation, never cached.
pub fn install_completers(host: &mut dyn VizHost, new_colors: &[String]) {
    host.set_argument_completer(
        COLOR_ARG_POSITION,
        "color",
        combined_color_completer(new_colors, "color name", ", "),
    );
    host.set_argument_completer(
        COLOR_ARG_POSITION,
        "set_color",
        combined_color_completer(new_colors, "new color name", ""),
    );
}

fn combined_color_completer(
    new_colors: &[String],
    description: &str,
    separator: &str,
) -> ArgCompleter {
    let new_colors = new_colors.to_vec();
    ArgCompleter::new(
        Box::new(move |host: &dyn VizHost| {
            let mut names = host.builtin_color_names();
            names.extend(new_colors.iter().cloned());
            names
        }),
        description,
        separator,
    )
}

/// Full palette step: fetch, parse, register, rewire autocomplete.
/// Returns the number of colors registered.
pub fn load_palettes(host: &mut dyn VizHost, url: &str) -> Result<usize> {
    let source = fetch_palette_source(url)?;
    let palettes = parse_palette_source(&source)?;
    let new_colors = register_palettes(host, &palettes)?;
    install_completers(host, &new_colors);
    println!(
        "Loaded {} colors from {} palette families.",
        new_colors.len(),
        palettes.len()
    );
    Ok(new_colors.len())
}
