//! # Key Stager
//!
//! A cross-platform utility for staging a text string or hotkey combo and
//! replaying it into the focused window after a configurable delay.
//!
//! ## Features
//!
//! - Stage text or `+`-joined hotkey combos ("CTRL+SHIFT+A")
//! - Deferred replay so the user can refocus the target window
//! - Editable send history with per-entry and bulk obfuscation
//! - Preset hotkey combos and categorized key listings
//! - JSON configuration file support
//!
//! ## Example
//!
//! ```no_run
//! use key_stager::{Config, HotkeyParser, KeyInjector, Stager};
//!
//! # #[tokio::main]
//! # async fn main() -> key_stager::Result<()> {
//! let injector = KeyInjector::new()?;
//! let mut stager = Stager::new(injector, HotkeyParser::default(), &Config::default());
//!
//! // Replays after the configured delay; history records it immediately.
//! let replay = stager.send_text("hello")?;
//! replay.await.expect("replay task panicked")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Configuration can be provided via JSON files:
//!
//! ```json
//! {
//!   "default_delay": "2s",
//!   "obfuscate_by_default": true,
//!   "verbose": false
//! }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod injector;
pub mod keymap;
pub mod stager;

pub use config::Config;
pub use error::{Result, StagerError};
pub use history::{HistoryItem, HistoryStore, ItemKind};
pub use injector::{Injector, KeyCombo, KeyInjector};
pub use keymap::{HotkeyParser, KeyCategories, Platform, PRESETS};
pub use stager::Stager;
