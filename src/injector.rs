//! Keystroke injection into the focused window.
//!
//! Built on the `enigo` crate. The injector does not know or care which
//! window has focus; replay goes to whatever the OS currently targets.

use std::fmt;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

use crate::error::{Result, StagerError};

/// An ordered list of platform key tokens describing a simultaneous press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    tokens: Vec<String>,
}

impl KeyCombo {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join("+"))
    }
}

/// Contract for the OS-automation backend.
///
/// Callers surface failures to the user and never retry; implementations
/// should not retry internally either.
pub trait Injector: Send {
    /// Type a literal string into the focused window.
    fn type_text(&mut self, text: &str) -> Result<()>;

    /// Click a single key.
    fn press_key(&mut self, token: &str) -> Result<()>;

    /// Press every key in the combo in order, then release in reverse.
    fn press_combo(&mut self, combo: &KeyCombo) -> Result<()>;
}

/// Resolve a platform key token to an `enigo` key.
pub(crate) fn key_from_token(token: &str) -> Result<Key> {
    let key = match token {
        // Modifiers
        "ctrl" => Key::Control,
        "alt" => Key::Alt,
        "shift" => Key::Shift,
        "win" | "command" => Key::Meta,

        // Editing
        "enter" => Key::Return,
        "tab" => Key::Tab,
        "esc" => Key::Escape,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        #[cfg(not(target_os = "macos"))]
        "insert" => Key::Insert,

        // Navigation
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,

        // Function keys
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,

        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => {
                    return Err(StagerError::invalid_key(
                        other,
                        "not a known key name or single character",
                    ))
                }
            }
        }
    };

    Ok(key)
}

/// `enigo`-backed injector.
pub struct KeyInjector {
    enigo: Enigo,
}

impl KeyInjector {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| StagerError::injection(format!("failed to initialize enigo: {e}")))?;
        Ok(Self { enigo })
    }
}

impl Injector for KeyInjector {
    fn type_text(&mut self, text: &str) -> Result<()> {
        debug!(chars = text.chars().count(), "typing text");
        self.enigo
            .text(text)
            .map_err(|e| StagerError::injection(format!("failed to type text: {e}")))
    }

    fn press_key(&mut self, token: &str) -> Result<()> {
        let key = key_from_token(token)?;
        debug!(%token, "clicking key");
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| StagerError::injection(format!("failed to press '{token}': {e}")))
    }

    fn press_combo(&mut self, combo: &KeyCombo) -> Result<()> {
        let keys = combo
            .tokens()
            .iter()
            .map(|token| key_from_token(token))
            .collect::<Result<Vec<_>>>()?;

        debug!(combo = %combo, "pressing combo");

        let mut pressed = Vec::with_capacity(keys.len());
        for (key, token) in keys.iter().zip(combo.tokens()) {
            if let Err(e) = self.enigo.key(*key, Direction::Press) {
                // Best-effort release of whatever went down before the failure.
                for held in pressed.into_iter().rev() {
                    let _ = self.enigo.key(held, Direction::Release);
                }
                return Err(StagerError::injection(format!(
                    "failed to press '{token}': {e}"
                )));
            }
            pressed.push(*key);
        }

        let mut release_err = None;
        for key in pressed.into_iter().rev() {
            if let Err(e) = self.enigo.key(key, Direction::Release) {
                release_err.get_or_insert_with(|| {
                    StagerError::injection(format!("failed to release combo '{combo}': {e}"))
                });
            }
        }

        match release_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
