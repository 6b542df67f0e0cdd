use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use speedtype::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    passage::PassageProvider,
    runtime::{CrosstermEventSource, Runner},
};
use std::{
    io::{self, stdin},
    path::PathBuf,
};

/// typing speed test: retype the passage, get wpm, accuracy and errors
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// disable live correct/incorrect highlighting for this run
    #[clap(long, conflicts_with = "highlight")]
    plain: bool,

    /// force live highlighting on for this run
    #[clap(long)]
    highlight: bool,

    /// config file to use instead of the platform default
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// append diagnostics to a log file (defaults to the state directory)
    #[clap(long, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// log level: off, error, warn, info, debug, trace
    #[clap(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags override the stored config for this run only
    fn apply_overrides(&self, config: &mut Config) {
        if self.plain {
            config.highlight = false;
        }
        if self.highlight {
            config.highlight = true;
        }
    }

    fn log_target(&self, config: &Config) -> Option<(PathBuf, String)> {
        let path = match &self.log_file {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => AppDirs::log_path(),
            None => config.log_file.clone(),
        }?;
        let level = self
            .log_level
            .clone()
            .unwrap_or_else(|| config.log_level.clone());
        Some((path, level))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let stored = store.load();
    if let Some((path, level)) = cli.log_target(&stored) {
        logging::init(&path, &level)?;
    }
    info!("config loaded from {}", store.path().display());

    let mut config = stored;
    cli.apply_overrides(&mut config);

    let passages = PassageProvider::builtin().context("loading built-in passages")?;
    let mut app = App::new(passages, config).with_store(Box::new(store));

    enable_raw_mode().context("enabling raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut runner = Runner::new(CrosstermEventSource::new());

    runner
        .run(app, |app| {
            terminal.draw(|f| f.render_widget(app, f.area()))?;
            Ok(())
        })
        .context("running event loop")
}
