use crate::{
    config::{Config, ConfigStore},
    highlight::{classify, Outcome},
    passage::{Passage, PassageProvider},
    scoring::ScoreResult,
    session::{Phase, Session, SessionError},
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Typing,
    Results,
}

/// Blocking message shown over the current screen until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Owns the current session and everything the screens display
pub struct App {
    passages: PassageProvider,
    session: Session,
    typed: String,
    screen: Screen,
    result: Option<ScoreResult>,
    notice: Option<Notice>,
    config: Config,
    store: Option<Box<dyn ConfigStore>>,
}

impl App {
    pub fn new(passages: PassageProvider, config: Config) -> Self {
        let session = Session::new(passages.select_passage());
        debug!("new session: {:?}", session.reference().as_str());

        Self {
            passages,
            session,
            typed: String::new(),
            screen: Screen::Typing,
            result: None,
            notice: None,
            config,
            store: None,
        }
    }

    /// Persist settings changed at runtime through `store`
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reference(&self) -> &Passage {
        self.session.reference()
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn highlight_enabled(&self) -> bool {
        self.config.highlight
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Per-character classification of the typed text, or `None` while
    /// highlighting is switched off
    pub fn highlights(&self) -> Option<Vec<Outcome>> {
        self.config
            .highlight
            .then(|| classify(self.reference().as_str(), &self.typed))
    }

    pub fn on_keystroke(&mut self) {
        if self.session.on_keystroke() {
            info!("session started");
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.screen != Screen::Typing {
            return;
        }
        self.on_keystroke();
        self.typed.push(c);
    }

    pub fn backspace(&mut self) {
        if self.screen != Screen::Typing {
            return;
        }
        self.on_keystroke();
        self.typed.pop();
    }

    /// Replaces the whole typed text, for input sources that report the full
    /// buffer rather than single keys
    pub fn on_text_changed(&mut self, text: &str) {
        if self.screen != Screen::Typing {
            return;
        }
        self.on_keystroke();
        self.typed.clear();
        self.typed.push_str(text);
    }

    /// Scores the typed text, ignoring surrounding whitespace. Before the
    /// first keystroke this raises the "nothing typed" notice and leaves the
    /// session as it was.
    pub fn finish(&mut self) -> Result<ScoreResult, SessionError> {
        match self.session.finish(self.typed.trim()) {
            Ok(result) => {
                info!(
                    "session finished: {} wpm, {:.2}% accuracy, {} errors",
                    result.wpm, result.accuracy_percent, result.error_count
                );
                self.result = Some(result);
                self.screen = Screen::Results;
                debug!("screen -> {}", self.screen);
                Ok(result)
            }
            Err(err) => {
                debug!("finish rejected: {err}");
                self.notice = Some(Notice {
                    title: "Error".to_string(),
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Discards the session and starts over with a freshly selected passage
    pub fn retry(&mut self) {
        self.session = Session::new(self.passages.select_passage());
        self.typed.clear();
        self.result = None;
        self.notice = None;
        self.screen = Screen::Typing;
        info!("retry: new passage {:?}", self.reference().as_str());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn toggle_highlight(&mut self) {
        self.config.highlight = !self.config.highlight;
        debug!("highlight {}", if self.config.highlight { "on" } else { "off" });

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.config) {
                warn!("unable to save config: {err}");
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        if self.notice.is_some() {
            self.dismiss_notice();
            return AppAction::Continue;
        }

        match self.screen {
            Screen::Typing => self.on_typing_key(key),
            Screen::Results => self.on_results_key(key),
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Tab => {
                let _ = self.finish();
            }
            KeyCode::F(2) => self.toggle_highlight(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => self.retry(),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Enter => self.type_char('\n'),
            KeyCode::Backspace => self.backspace(),
            _ => self.on_keystroke(),
        }
        AppAction::Continue
    }

    fn on_results_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('h') => self.toggle_highlight(),
            _ => {}
        }
        AppAction::Continue
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }
}
