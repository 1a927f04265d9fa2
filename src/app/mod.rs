// App module - split into submodules for maintainability
// - mod.rs: App struct, constructor, teardown
// - event_loop.rs: Main run() loop and fetch-event polling
// - rendering.rs: All UI drawing (draw method)
// - handlers.rs: Event handlers and action dispatch

mod event_loop;
mod handlers;
mod rendering;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::cli::Cli;
use crate::components::profile_pane::ProfilePane;
use crate::components::repo_list::RepoList;
use crate::components::search_input::SearchInput;
use crate::components::spinner::Spinner;
use crate::components::status_bar::StatusBar;
use crate::config::{ConfigManager, ThemeMode};
use crate::error::{Result, ScoutError};
use crate::github::{FetchManager, GitHubClient};
use crate::input::focus::FocusManager;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    last_tick: Instant,
    tick_interval: Duration,
    focus: FocusManager,
    config_manager: ConfigManager,
    fetch_manager: FetchManager,
    clipboard: Option<Clipboard>,
    search: SearchInput,
    profile: ProfilePane,
    repos: RepoList,
    status_bar: StatusBar,
    /// The login whose profile and repositories are currently shown.
    active_login: Option<String>,
}

impl App {
    pub fn with_cli(cli: &Cli) -> Result<Self> {
        let mut config_manager = match &cli.config_dir {
            Some(dir) => ConfigManager::with_config_dir(dir.clone()),
            None => ConfigManager::new()?,
        };
        if let Err(e) = config_manager.write_default_configs() {
            tracing::warn!("Could not write default config files: {}", e);
        }

        // CLI flags override the files.
        if let Some(mode) = &cli.theme {
            match mode.parse::<ThemeMode>() {
                Ok(mode) => config_manager.theme_config_mut().mode = mode,
                Err(e) => tracing::warn!("Ignoring --theme: {}", e),
            }
        }
        if let Some(ms) = cli.debounce_ms {
            config_manager.app_config_mut().general.debounce_ms = ms;
        }

        let client = GitHubClient::new(config_manager.github_config(), cli.token.as_deref())?;
        let debounce = Duration::from_millis(config_manager.app_config().general.debounce_ms);
        let mut fetch_manager = FetchManager::new(client, debounce);

        let tick_interval =
            Duration::from_millis(config_manager.app_config().general.tick_interval_ms);
        let spinner_style = config_manager.theme().spinner.default_style.clone();

        let mut search = SearchInput::new().with_spinner(Spinner::from_theme_name(&spinner_style));
        let profile = ProfilePane::new().with_spinner(Spinner::from_theme_name(&spinner_style));
        let repos = RepoList::new().with_spinner(Spinner::from_theme_name(&spinner_style));

        if let Some(query) = &cli.query {
            search.set_query(query);
            if !query.is_empty() {
                fetch_manager.schedule_suggestions(query);
            }
        }

        // Terminal goes into raw mode last so setup errors print to a normal screen.
        enable_raw_mode().map_err(|e| ScoutError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| ScoutError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| ScoutError::Terminal(e.to_string()))?;

        let clipboard = Clipboard::new().ok();

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            last_tick: Instant::now(),
            tick_interval,
            focus: FocusManager::new(),
            config_manager,
            fetch_manager,
            clipboard,
            search,
            profile,
            repos,
            status_bar: StatusBar::new(),
            active_login: None,
        })
    }

    pub(super) fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}
