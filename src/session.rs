use crate::passage::Passage;
use crate::scoring::{score, ScoreResult};
use std::{
    error::Error,
    fmt,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No keystroke seen yet, timer not started
    Idle,
    /// Timer started by the first keystroke
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Finish was requested before any keystroke
    NoInput,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoInput => f.write_str("You haven't typed anything yet!"),
        }
    }
}

impl Error for SessionError {}

/// One attempt at one passage. Replaced wholesale on retry.
#[derive(Debug, Clone)]
pub struct Session {
    reference: Passage,
    started_at: Option<Instant>,
}

impl Session {
    pub fn new(reference: Passage) -> Self {
        Self {
            reference,
            started_at: None,
        }
    }

    pub fn reference(&self) -> &Passage {
        &self.reference
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn phase(&self) -> Phase {
        if self.started_at.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn on_keystroke(&mut self) -> bool {
        self.on_keystroke_at(Instant::now())
    }

    /// Starts the timer on the first keystroke only. Returns true when this
    /// call started it.
    pub fn on_keystroke_at(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn elapsed_at(&self, now: Instant) -> Option<Duration> {
        self.started_at
            .map(|started_at| now.saturating_duration_since(started_at))
    }

    pub fn finish(&self, typed: &str) -> Result<ScoreResult, SessionError> {
        self.finish_at(typed, Instant::now())
    }

    /// Scores `typed` against the reference. Only valid once the timer has
    /// started; the session itself is left untouched either way.
    pub fn finish_at(&self, typed: &str, now: Instant) -> Result<ScoreResult, SessionError> {
        let elapsed = self.elapsed_at(now).ok_or(SessionError::NoInput)?;
        Ok(score(self.reference.as_str(), typed, elapsed))
    }
}
