//! Hotkey combo parsing and key-name tables.
//!
//! Combos are written the way the front end displays them, as `+`-joined
//! canonical uppercase names ("CTRL+SHIFT+A"). Parsing turns them into the
//! lowercase platform tokens the injector understands.

use crate::injector::KeyCombo;

/// OS family the utility is running on. Only the Apple desktop needs special
/// treatment (the Windows key is labelled CMD there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Platform of the current build target.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Map an OS-family identifier string ("Windows", "Darwin", "Linux")
    /// onto a platform. Unrecognized names fall back to Linux behaviour.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "windows" => Platform::Windows,
            "darwin" | "macos" => Platform::MacOs,
            _ => Platform::Linux,
        }
    }
}

/// Common combos offered for one-click reuse.
pub const PRESETS: &[&str] = &[
    "CTRL+C",
    "CTRL+V",
    "CTRL+X",
    "CTRL+Z",
    "CTRL+A",
    "CTRL+F",
    "CTRL+S",
    "CTRL+W",
    "CTRL+N",
    "CTRL+T",
    "ALT+F4",
    "WIN+R",
    "WIN+E",
    "WIN+D",
    "CTRL+ALT+DELETE",
    "CTRL+ALT+T",
];

const NAVIGATION_KEYS: &[&str] = &["UP", "DOWN", "LEFT", "RIGHT", "HOME", "END", "PGUP", "PGDN"];
const EDITING_KEYS: &[&str] = &[
    "BACKSPACE", "DELETE", "INSERT", "TAB", "ENTER", "SPACE", "ESC",
];

/// Categorized key names for front-end population.
#[derive(Debug, Clone)]
pub struct KeyCategories {
    pub letters: Vec<String>,
    pub function_keys: Vec<String>,
    pub navigation: Vec<&'static str>,
    pub editing: Vec<&'static str>,
    pub modifiers: Vec<String>,
}

/// Resolve a canonical uppercase key name to its platform token.
///
/// Names outside the table (letters, digits, anything user-typed) pass
/// through lowercased unchanged.
fn platform_token(name: &str) -> String {
    match name {
        // Navigation
        "UP" => "up",
        "DOWN" => "down",
        "LEFT" => "left",
        "RIGHT" => "right",
        "HOME" => "home",
        "END" => "end",
        "PGUP" => "pageup",
        "PGDN" => "pagedown",

        // Editing
        "BACKSPACE" => "backspace",
        "DELETE" => "delete",
        "INSERT" => "insert",
        "TAB" => "tab",
        "ENTER" => "enter",
        "SPACE" => "space",
        "ESC" => "esc",

        // Symbols
        "PLUS" => "+",
        "MINUS" => "-",
        "EQUALS" => "=",

        // Modifiers
        "SHIFT" => "shift",
        "CTRL" => "ctrl",
        "ALT" => "alt",
        "WIN" => "win",
        "CMD" => "command",

        other => return other.to_lowercase(),
    }
    .to_string()
}

/// Parses hotkey combo strings against the static key table.
///
/// # Example
///
/// ```
/// use key_stager::{HotkeyParser, Platform};
///
/// let parser = HotkeyParser::new(Platform::Windows);
/// assert_eq!(parser.parse("CTRL+SHIFT+A").tokens(), ["ctrl", "shift", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct HotkeyParser {
    platform: Platform,
}

impl Default for HotkeyParser {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

impl HotkeyParser {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Parse a `+`-joined combo into an ordered list of platform tokens.
    ///
    /// Each part is trimmed and uppercased before the table lookup; a string
    /// without `+` is a single key through the same rule.
    pub fn parse(&self, combo: &str) -> KeyCombo {
        let tokens = combo
            .split('+')
            .map(|part| platform_token(&part.trim().to_uppercase()))
            .collect();
        KeyCombo::new(tokens)
    }

    /// Display name for a modifier key. "WIN" is labelled "CMD" on the Apple
    /// desktop; everything else is just uppercased.
    pub fn modifier_display_name(&self, name: &str) -> String {
        let upper = name.to_uppercase();
        if upper == "WIN" && self.platform == Platform::MacOs {
            "CMD".to_string()
        } else {
            upper
        }
    }

    /// Categorized key names, for populating pickers.
    pub fn key_categories(&self) -> KeyCategories {
        KeyCategories {
            letters: ('A'..='Z').map(String::from).collect(),
            function_keys: (1..=12).map(|i| format!("F{i}")).collect(),
            navigation: NAVIGATION_KEYS.to_vec(),
            editing: EDITING_KEYS.to_vec(),
            modifiers: vec![
                "CTRL".to_string(),
                "ALT".to_string(),
                "SHIFT".to_string(),
                self.modifier_display_name("WIN"),
            ],
        }
    }
}
