use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use speedtype::{
    app::{App, AppAction, Screen},
    config::Config,
    passage::PassageProvider,
    runtime::{AppEvent, Runner, TestEventSource},
    session::Phase,
};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn single_passage_app(prompt: &str) -> App {
    App::new(PassageProvider::new([prompt]).unwrap(), Config::default())
}

// Headless integration using the internal runtime without a TTY.
// Verifies a full type -> finish -> retry cycle via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut app = single_passage_app("hi");
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));

    tx.send(key(KeyCode::Char('h'))).unwrap();
    tx.send(key(KeyCode::Char('i'))).unwrap();
    tx.send(key(KeyCode::Tab)).unwrap();
    drop(tx);

    let mut frames = Vec::new();
    runner
        .run(&mut app, |app| {
            frames.push(app.screen());
            Ok(())
        })
        .unwrap();

    assert_eq!(app.screen(), Screen::Results);
    assert_eq!(frames.last(), Some(&Screen::Results));
    let result = app.result().expect("finished session has a result");
    assert_eq!(result.accuracy_percent, 100.0);
    assert_eq!(result.error_count, 0);
}

#[test]
fn headless_finish_before_typing_shows_notice() {
    let mut app = single_passage_app("hi");
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));

    tx.send(key(KeyCode::Tab)).unwrap();
    assert_eq!(
        runner.step(&mut app).unwrap(),
        Some(AppAction::Continue)
    );

    assert!(app.notice().is_some());
    assert_eq!(app.screen(), Screen::Typing);
    assert_eq!(app.phase(), Phase::Idle);
    assert!(app.session().started_at().is_none());

    // dismiss, then type and finish normally
    for event in [
        key(KeyCode::Enter),
        key(KeyCode::Char('h')),
        key(KeyCode::Char('i')),
        key(KeyCode::Tab),
    ] {
        tx.send(event).unwrap();
        runner.step(&mut app).unwrap();
    }

    assert!(app.notice().is_none());
    assert_eq!(app.screen(), Screen::Results);
}

#[test]
fn headless_retry_starts_fresh_session() {
    let mut app = App::new(PassageProvider::builtin().unwrap(), Config::default());
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));

    for event in [
        key(KeyCode::Char('x')),
        key(KeyCode::Tab),
        key(KeyCode::Char('r')),
    ] {
        tx.send(event).unwrap();
        runner.step(&mut app).unwrap();
    }

    assert_eq!(app.screen(), Screen::Typing);
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.typed(), "");
    assert!(app.result().is_none());
    assert!(PassageProvider::builtin()
        .unwrap()
        .passages()
        .contains(app.reference()));
}

#[test]
fn headless_escape_quits() {
    let mut app = single_passage_app("hi");
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx));

    tx.send(key(KeyCode::Esc)).unwrap();

    assert_eq!(runner.step(&mut app).unwrap(), Some(AppAction::Quit));
}
