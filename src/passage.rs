use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use std::{error::Error, fmt};

static PASSAGE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/passages");

const BUILTIN_SET: &str = "builtin.json";

/// The reference text a session asks the user to reproduce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage(String);

impl Passage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what scoring works in
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Passage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub enum PassageError {
    MissingSet(String),
    Malformed(serde_json::Error),
    Empty,
}

impl fmt::Display for PassageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassageError::MissingSet(name) => write!(f, "passage set {name} not found"),
            PassageError::Malformed(err) => write!(f, "unable to parse passage set: {err}"),
            PassageError::Empty => f.write_str("passage set contains no passages"),
        }
    }
}

impl Error for PassageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PassageError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
struct PassageSet {
    #[allow(dead_code)]
    name: String,
    passages: Vec<String>,
}

/// Fixed, non-empty set of candidate passages
#[derive(Debug, Clone)]
pub struct PassageProvider {
    passages: Vec<Passage>,
}

impl PassageProvider {
    /// Blank candidates are dropped; an empty result is rejected so that
    /// selection can never fail.
    pub fn new<I, S>(candidates: I) -> Result<Self, PassageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let passages: Vec<Passage> = candidates
            .into_iter()
            .map(Into::<String>::into)
            .filter(|s| !s.trim().is_empty())
            .map(Passage::new)
            .collect();

        if passages.is_empty() {
            return Err(PassageError::Empty);
        }

        Ok(Self { passages })
    }

    /// The passages shipped with the binary
    pub fn builtin() -> Result<Self, PassageError> {
        let set = read_passage_set(BUILTIN_SET)?;
        Self::new(set.passages)
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn select_passage(&self) -> Passage {
        self.select_passage_with(&mut rand::thread_rng())
    }

    pub fn select_passage_with<R: Rng>(&self, rng: &mut R) -> Passage {
        let idx = rng.gen_range(0..self.passages.len());
        self.passages[idx].clone()
    }
}

fn read_passage_set(file_name: &str) -> Result<PassageSet, PassageError> {
    let file = PASSAGE_DIR
        .get_file(file_name)
        .ok_or_else(|| PassageError::MissingSet(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| PassageError::MissingSet(file_name.to_string()))?;

    from_str(contents).map_err(PassageError::Malformed)
}
