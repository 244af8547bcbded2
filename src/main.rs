mod ui;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use fastwrite::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    history::{HistoryLog, HistoryRecord},
    language::SupportedLanguage,
    logging,
    practice::Practice,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::PhaseTag,
    time_control::TimeSelection,
    typing_policy::{classify, KeyAction},
    word_generator::{WordGenerator, WordPool},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, SystemTime},
};
use tracing::{info, warn};

/// minimal typing-speed trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a stream of random words against the clock. Mistyped words turn red until fixed, and a summary with words-per-minute and accuracy opens when time runs out."
)]
pub struct Cli {
    /// session length: a number of seconds, "custom" or "infinite"
    #[clap(short = 't', long)]
    time: Option<TimeSelection>,

    /// seconds for the custom time option (invalid values fall back to 30)
    #[clap(short = 'c', long)]
    custom: Option<String>,

    /// language to pull words from; repeat to combine pools
    #[clap(short = 'l', long = "language", value_enum)]
    languages: Vec<SupportedLanguage>,

    /// never mix punctuation marks into the word stream
    #[clap(long)]
    no_punctuation: bool,

    /// append each finished session to the history log
    #[clap(long)]
    history: bool,

    /// write debug logs to this file (FASTWRITE_LOG sets the filter)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the given options as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line options over the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(custom) = &self.custom {
            cfg.custom_secs = custom.clone();
            cfg.time = TimeSelection::Custom;
        }
        if let Some(time) = self.time {
            cfg.time = time;
        }
        if !self.languages.is_empty() {
            cfg.languages = self.languages.clone();
        }
        if self.no_punctuation {
            cfg.punctuation = false;
        }
        if self.history {
            cfg.record_history = true;
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Redraw,
    Quit,
}

pub struct App {
    pub practice: Practice,
    pub config: Config,
    pub modal_open: bool,
    /// extra lines scrolled with Enter, dropped on the next word change
    pub scroll_nudge: u16,
    history: Option<HistoryLog>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let pool = WordPool::from_languages(&config.languages, config.punctuation)
            .context("failed to build word pool")?;
        let practice = Practice::new(WordGenerator::new(pool), config.time_control());
        let history = config.record_history.then(HistoryLog::new);

        Ok(Self {
            practice,
            config,
            modal_open: false,
            scroll_nudge: 0,
            history,
        })
    }

    fn on_tick(&mut self, now: SystemTime) -> Flow {
        let running = self.practice.phase() == PhaseTag::Running;
        let report = self.practice.on_tick(now);
        if report.ended {
            self.session_ended();
        }
        if running || report.ended {
            Flow::Redraw
        } else {
            Flow::Continue
        }
    }

    fn session_ended(&mut self) {
        self.modal_open = true;
        let (Some(history), Some(summary)) = (&self.history, self.practice.session().summary())
        else {
            return;
        };
        let record = HistoryRecord::from_summary(summary, chrono::Local::now());
        if let Err(err) = history.append(&record) {
            warn!(%err, "could not record session history");
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('e') if ctrl => {
                if self.practice.finish(now) {
                    self.session_ended();
                }
                return Flow::Redraw;
            }
            _ => {}
        }

        if self.modal_open {
            return self.on_modal_key(key);
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Left => self.retry(),
            KeyCode::Right => self.restart(),
            KeyCode::Up => self.change_time(self.config.time.previous()),
            KeyCode::Down => self.change_time(self.config.time.next()),
            KeyCode::Char(d) if d.is_ascii_digit() && !ctrl && self.editing_custom() => {
                self.edit_custom(|secs| secs.push(d))
            }
            KeyCode::Delete if self.editing_custom() => self.edit_custom(|secs| {
                secs.pop();
            }),
            _ => match classify(&key) {
                KeyAction::Enter => self.scroll_nudge = self.scroll_nudge.saturating_add(1),
                KeyAction::Ignored => return Flow::Continue,
                action => {
                    let before = self.practice.session().active_index();
                    self.practice.on_key(action, now);
                    if self.practice.session().active_index() != before {
                        self.scroll_nudge = 0;
                    }
                }
            },
        }
        Flow::Redraw
    }

    fn on_modal_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('n') => self.restart(),
            KeyCode::Esc => self.modal_open = false,
            _ => return Flow::Continue,
        }
        Flow::Redraw
    }

    fn retry(&mut self) {
        self.practice.retry();
        self.modal_open = false;
        self.scroll_nudge = 0;
    }

    fn restart(&mut self) {
        self.practice.restart();
        self.modal_open = false;
        self.scroll_nudge = 0;
    }

    /// Digits go to the custom duration while it is selected and nothing is typed yet
    pub fn editing_custom(&self) -> bool {
        self.config.time == TimeSelection::Custom && self.practice.phase() == PhaseTag::Idle
    }

    fn edit_custom(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.config.custom_secs);
        self.practice.set_time_control(self.config.time_control());
        self.scroll_nudge = 0;
    }

    fn change_time(&mut self, selection: TimeSelection) {
        self.config.time = selection;
        self.practice.set_time_control(self.config.time_control());
        self.modal_open = false;
        self.scroll_nudge = 0;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = match (&cli.log_file, logging::requested_by_env()) {
        (Some(path), _) => logging::init(path)?,
        (None, true) => logging::init(&AppDirs::log_path())?,
        (None, false) => None,
    };

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("failed to save config to {}", store.path().display()))?;
    }
    info!(?config, "starting");

    let mut app = App::new(config)?;

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Leave the alternate screen before the panic message is printed
fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "runtime.panic", %info, "panic");
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_panic(info);
    }));
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let (event, now) = runner.step_at();
        let flow = match event {
            AppEvent::Tick => app.on_tick(now),
            AppEvent::Resize => Flow::Redraw,
            AppEvent::Key(key) => app.on_key(key, now),
        };

        match flow {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            Flow::Continue => {}
        }
    }

    Ok(())
}
