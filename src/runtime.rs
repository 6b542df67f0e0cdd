use std::io;
use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::app::{App, AppAction};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource {
    /// Blocks until the next event. `Ok(None)` means the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<AppEvent>>;
}

/// Production event source reading crossterm events on the calling thread
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self) -> io::Result<Option<AppEvent>> {
        loop {
            match event::read()? {
                CtEvent::Key(key) => return Ok(Some(AppEvent::Key(key))),
                CtEvent::Resize(_, _) => return Ok(Some(AppEvent::Resize)),
                _ => {}
            }
        }
    }
}

/// Test event source fed from a channel; ends once every sender is dropped
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn next_event(&mut self) -> io::Result<Option<AppEvent>> {
        Ok(self.rx.recv().ok())
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Applies the next event to `app`. `Ok(None)` once the source is exhausted.
    pub fn step(&mut self, app: &mut App) -> io::Result<Option<AppAction>> {
        let action = match self.event_source.next_event()? {
            Some(AppEvent::Key(key)) => app.on_key(key),
            Some(AppEvent::Resize) => AppAction::Continue,
            None => return Ok(None),
        };
        Ok(Some(action))
    }

    /// Draws, then alternates between applying one event and redrawing until
    /// the app quits or events run out
    pub fn run<F>(&mut self, app: &mut App, mut draw: F) -> io::Result<()>
    where
        F: FnMut(&App) -> io::Result<()>,
    {
        draw(app)?;
        while let Some(action) = self.step(app)? {
            if action == AppAction::Quit {
                break;
            }
            draw(app)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, passage::PassageProvider};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    fn create_test_app() -> App {
        App::new(PassageProvider::new(["hi"]).unwrap(), Config::default())
    }

    #[test]
    fn step_returns_none_when_exhausted() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let mut runner = Runner::new(TestEventSource::new(rx));
        let mut app = create_test_app();

        assert_eq!(runner.step(&mut app).unwrap(), None);
    }

    #[test]
    fn step_passes_keys_to_app() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('h'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let mut runner = Runner::new(TestEventSource::new(rx));
        let mut app = create_test_app();

        assert_eq!(runner.step(&mut app).unwrap(), Some(AppAction::Continue));
        assert_eq!(app.typed(), "h");
    }

    #[test]
    fn run_redraws_after_every_event() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        tx.send(AppEvent::Resize).unwrap();
        drop(tx);
        let mut runner = Runner::new(TestEventSource::new(rx));
        let mut app = create_test_app();

        let mut draws = 0;
        runner
            .run(&mut app, |_| {
                draws += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(draws, 3);
    }

    #[test]
    fn run_stops_on_quit() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let mut runner = Runner::new(TestEventSource::new(rx));
        let mut app = create_test_app();

        runner.run(&mut app, |_| Ok(())).unwrap();

        assert_eq!(app.typed(), "");
    }
}
