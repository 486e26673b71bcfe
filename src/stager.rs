//! Staging and deferred replay of text and hotkeys.
//!
//! A send records the entry in history immediately, then replays it on an
//! independent timer task once the delay elapses, giving the user time to
//! focus the target window. Sends are never cancelled; staging twice simply
//! runs two timers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Result, StagerError};
use crate::history::{HistoryStore, ItemKind};
use crate::injector::Injector;
use crate::keymap::HotkeyParser;

/// Parse a user-typed delay in seconds ("2", "0.5"). Bounded to one minute,
/// matching the front-end validator.
pub fn parse_delay_secs(value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| StagerError::invalid_delay(value, "expected a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(StagerError::invalid_delay(value, "delay cannot be negative"));
    }
    if secs > 60.0 {
        return Err(StagerError::invalid_delay(
            value,
            "delay cannot exceed 60 seconds",
        ));
    }
    Ok(Duration::from_millis((secs * 1000.0).round() as u64))
}

/// Coordinates history bookkeeping, combo parsing, and deferred injection.
pub struct Stager<I: Injector + 'static> {
    history: HistoryStore,
    parser: HotkeyParser,
    delay: Duration,
    injector: Arc<Mutex<I>>,
}

impl<I: Injector + 'static> Stager<I> {
    pub fn new(injector: I, parser: HotkeyParser, config: &Config) -> Self {
        Self {
            history: HistoryStore::new(config.obfuscate_by_default),
            parser,
            delay: config.default_delay,
            injector: Arc::new(Mutex::new(injector)),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn parser(&self) -> &HotkeyParser {
        &self.parser
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Stage a text string for replay. Rejects empty or whitespace-only
    /// input without touching the history.
    pub fn send_text(&mut self, text: &str) -> Result<JoinHandle<Result<()>>> {
        if text.trim().is_empty() {
            return Err(StagerError::EmptyText);
        }
        self.history.add_text(text);
        info!(
            chars = text.chars().count(),
            delay_ms = self.delay.as_millis() as u64,
            "staged text"
        );
        let text = text.to_string();
        Ok(self.schedule(move |injector| injector.type_text(&text)))
    }

    /// Stage a hotkey combo for replay. The history records the canonical
    /// uppercase form the front end displays.
    pub fn send_hotkey(&mut self, combo_str: &str) -> Result<JoinHandle<Result<()>>> {
        let trimmed = combo_str.trim();
        if trimmed.is_empty() {
            return Err(StagerError::invalid_key(combo_str, "empty combo"));
        }
        let combo = self.parser.parse(trimmed);
        self.history.add_hotkey(trimmed.to_uppercase());
        info!(
            combo = %combo,
            delay_ms = self.delay.as_millis() as u64,
            "staged hotkey"
        );
        Ok(self.schedule(move |injector| {
            if let [token] = combo.tokens() {
                injector.press_key(token)
            } else {
                injector.press_combo(&combo)
            }
        }))
    }

    /// Re-stage an existing history entry by index. The resend is routed
    /// back through the normal send path, so it appends a fresh entry.
    pub fn resend(&mut self, index: usize) -> Result<JoinHandle<Result<()>>> {
        let item = self
            .history
            .get(index)
            .ok_or_else(|| StagerError::index_out_of_range(index, self.history.len()))?;
        let content = item.content.clone();
        match item.kind {
            ItemKind::Text => self.send_text(&content),
            ItemKind::Hotkey => self.send_hotkey(&content),
        }
    }

    fn schedule<F>(&self, op: F) -> JoinHandle<Result<()>>
    where
        F: FnOnce(&mut I) -> Result<()> + Send + 'static,
    {
        let injector = Arc::clone(&self.injector);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut injector = injector.lock().await;
            let result = op(&mut injector);
            if let Err(e) = &result {
                error!("replay failed: {e}");
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injector::KeyCombo;
    use crate::keymap::Platform;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct FakeInjector {
        log: Arc<StdMutex<Vec<String>>>,
        fail: bool,
    }

    impl Injector for FakeInjector {
        fn type_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(StagerError::injection("backend down"));
            }
            self.log.lock().unwrap().push(format!("text:{text}"));
            Ok(())
        }

        fn press_key(&mut self, token: &str) -> Result<()> {
            self.log.lock().unwrap().push(format!("key:{token}"));
            Ok(())
        }

        fn press_combo(&mut self, combo: &KeyCombo) -> Result<()> {
            self.log.lock().unwrap().push(format!("combo:{combo}"));
            Ok(())
        }
    }

    fn zero_delay_config() -> Config {
        Config {
            default_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    fn new_stager(injector: FakeInjector) -> Stager<FakeInjector> {
        Stager::new(
            injector,
            HotkeyParser::new(Platform::Windows),
            &zero_delay_config(),
        )
    }

    #[tokio::test]
    async fn test_send_text_records_and_replays() {
        let injector = FakeInjector::default();
        let log = Arc::clone(&injector.log);
        let mut stager = new_stager(injector);

        let handle = stager.send_text("hello world").unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(stager.history().len(), 1);
        // Default config obfuscates, so the entry starts masked.
        assert_eq!(stager.history().display_items()[0], "***********");
        assert_eq!(*log.lock().unwrap(), vec!["text:hello world"]);
    }

    #[tokio::test]
    async fn test_send_empty_text_rejected_without_state_change() {
        let mut stager = new_stager(FakeInjector::default());
        assert!(matches!(stager.send_text("   "), Err(StagerError::EmptyText)));
        assert!(stager.history().is_empty());
    }

    #[tokio::test]
    async fn test_send_hotkey_routes_single_key_and_combo() {
        let injector = FakeInjector::default();
        let log = Arc::clone(&injector.log);
        let mut stager = new_stager(injector);

        stager.send_hotkey("F5").unwrap().await.unwrap().unwrap();
        stager
            .send_hotkey("ctrl+shift+a")
            .unwrap()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["key:f5", "combo:ctrl+shift+a"]
        );
        // History keeps the canonical uppercase form.
        assert_eq!(
            stager.history().display_items(),
            vec!["[HOTKEY] F5", "[HOTKEY] CTRL+SHIFT+A"]
        );
    }

    #[tokio::test]
    async fn test_resend_appends_new_entry_of_same_kind() {
        let injector = FakeInjector::default();
        let log = Arc::clone(&injector.log);
        let mut stager = new_stager(injector);

        stager.send_hotkey("CTRL+V").unwrap().await.unwrap().unwrap();
        stager.resend(0).unwrap().await.unwrap().unwrap();

        assert_eq!(stager.history().len(), 2);
        assert_eq!(stager.history().get(1).unwrap().kind, ItemKind::Hotkey);
        assert_eq!(*log.lock().unwrap(), vec!["combo:ctrl+v", "combo:ctrl+v"]);
    }

    #[tokio::test]
    async fn test_resend_out_of_range() {
        let mut stager = new_stager(FakeInjector::default());
        assert!(matches!(
            stager.resend(3),
            Err(StagerError::IndexOutOfRange { index: 3, len: 0 })
        ));
    }

    #[tokio::test]
    async fn test_injection_failure_is_reported_not_retried() {
        let injector = FakeInjector {
            fail: true,
            ..FakeInjector::default()
        };
        let log = Arc::clone(&injector.log);
        let mut stager = new_stager(injector);

        let handle = stager.send_text("oops").unwrap();
        let result = handle.await.unwrap();
        assert!(matches!(result, Err(StagerError::Injection(_))));

        // The entry stays in history even though replay failed.
        assert_eq!(stager.history().len(), 1);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_delay_secs() {
        assert_eq!(parse_delay_secs("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_delay_secs("0.5").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_delay_secs(" 0 ").unwrap(), Duration::ZERO);

        assert!(parse_delay_secs("abc").is_err());
        assert!(parse_delay_secs("-1").is_err());
        assert!(parse_delay_secs("61").is_err());
        assert!(parse_delay_secs("").is_err());
    }
}
