// Event handlers and action dispatch
// - handle_event/handle_key/handle_mouse turn terminal input into Actions
// - dispatch applies app-level effects, then forwards the action to every
//   component so each can apply the part that concerns it
// - handle_fetch_event folds debounce firings and HTTP results into state

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::App;
use crate::action::Action;
use crate::components::Component;
use crate::error::Result;
use crate::github::FetchEvent;
use crate::input::focus::FocusArea;

impl App {
    pub(super) fn handle_event(&mut self, event: CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
            // The next draw picks up the new size.
            CrosstermEvent::Resize(_, _) => None,
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Global chords work regardless of focus.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Some(Action::Quit),
                KeyCode::Char('t') => return Some(Action::ToggleTheme),
                _ => {}
            }
        }
        match key.code {
            KeyCode::Tab => return Some(Action::FocusNext),
            KeyCode::BackTab => return Some(Action::FocusPrev),
            _ => {}
        }

        match self.focus.current() {
            FocusArea::Search => self.search.handle_event(&CrosstermEvent::Key(key)),
            FocusArea::Repos => {
                // Plain letters are free outside the text box.
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') => return Some(Action::Quit),
                        KeyCode::Char('t') => return Some(Action::ToggleTheme),
                        _ => {}
                    }
                }
                self.repos.handle_event(&CrosstermEvent::Key(key))
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        // The suggestion panel floats over the panes below, so the search
        // component gets first look at every pointer event.
        if let Some(action) = self.search.handle_event(&CrosstermEvent::Mouse(mouse)) {
            return Some(action);
        }
        self.repos.handle_event(&CrosstermEvent::Mouse(mouse))
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        match &action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::FocusNext => self.focus.next(),
            Action::FocusPrev => self.focus.prev(),
            Action::FocusArea(area) => self.focus.focus(*area),
            Action::ToggleTheme => {
                self.config_manager.theme_config_mut().toggle();
                let name = self.config_manager.theme().name.clone();
                // Persist so the next launch keeps the choice.
                if let Err(e) = self.config_manager.save_theme_config() {
                    tracing::warn!("Could not save theme config: {}", e);
                }
                self.status_bar.flash_info(format!("theme: {name}"));
            }
            Action::QueryChanged(query) => {
                self.fetch_manager.schedule_suggestions(query);
            }
            Action::QueryCleared => {
                self.fetch_manager.invalidate_suggestions();
            }
            Action::DismissSearch => {
                self.fetch_manager.invalidate_suggestions();
                self.focus.focus(FocusArea::Repos);
            }
            Action::CommitLogin(login) => {
                self.fetch_manager.invalidate_suggestions();
                self.focus.focus(FocusArea::Repos);
                self.activate_login(login.clone());
            }
            Action::RepoSelect(_) => {
                // A click in the list also claims focus.
                self.focus.focus(FocusArea::Repos);
            }
            Action::OpenSelectedRepo => self.open_selected_repo(),
            Action::YankSelectedRepo => self.yank_selected_repo(),
            Action::OpenProfile => self.open_profile(),
            _ => {}
        }

        // Every component sees the action; each applies what concerns it.
        self.search.update(&action);
        self.profile.update(&action);
        self.repos.update(&action);
        self.status_bar.update(&action);

        Ok(())
    }

    /// Switch the profile and repository panes to a new login. Committing the
    /// login that is already shown does not refetch.
    fn activate_login(&mut self, login: String) {
        if self.active_login.as_deref() == Some(login.as_str()) {
            return;
        }
        tracing::info!("Loading profile and repositories for '{}'", login);
        self.active_login = Some(login.clone());
        self.profile.set_loading();
        self.repos.set_loading();
        self.fetch_manager.fetch_profile(&login);
        self.fetch_manager.fetch_repos(&login);
    }

    fn open_selected_repo(&mut self) {
        let Some(repo) = self.repos.selected_repo() else {
            return;
        };
        let url = repo.html_url.clone();
        self.open_url(&url);
    }

    fn open_profile(&mut self) {
        let Some(url) = self.profile.profile_url().map(str::to_owned) else {
            return;
        };
        self.open_url(&url);
    }

    fn open_url(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(e) = open::that(url) {
            tracing::warn!("Could not open '{}' in browser: {}", url, e);
            self.status_bar.flash_error("could not open browser");
        }
    }

    fn yank_selected_repo(&mut self) {
        let Some(repo) = self.repos.selected_repo() else {
            return;
        };
        let url = repo.html_url.clone();
        if url.is_empty() {
            return;
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(url) {
                Ok(()) => self.status_bar.flash_info("copied URL"),
                Err(e) => {
                    tracing::warn!("Clipboard write failed: {}", e);
                    self.status_bar.flash_error("clipboard unavailable");
                }
            },
            None => self.status_bar.flash_error("clipboard unavailable"),
        }
    }

    pub(super) fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::DebounceElapsed { generation, query } => {
                if !self.fetch_manager.is_current_suggestions(generation) {
                    return;
                }
                self.search.set_loading();
                self.fetch_manager.spawn_suggestion_fetch(generation, query);
            }
            FetchEvent::Suggestions { generation, result } => {
                if !self.fetch_manager.is_current_suggestions(generation) {
                    tracing::debug!("Discarding stale suggestion response (gen {})", generation);
                    return;
                }
                match result {
                    Ok(users) => self.search.set_suggestions(users),
                    Err(e) => {
                        tracing::warn!("User search failed: {}", e);
                        self.search.set_search_failed();
                    }
                }
            }
            FetchEvent::Profile {
                generation,
                login,
                result,
            } => {
                if !self.fetch_manager.is_current_profile(generation) {
                    tracing::debug!("Discarding stale profile response for '{}'", login);
                    return;
                }
                match result {
                    Ok(user) => self.profile.set_user(user),
                    Err(e) => {
                        tracing::warn!("Profile fetch for '{}' failed: {}", login, e);
                        self.profile.set_failed();
                    }
                }
            }
            FetchEvent::Repos {
                generation,
                login,
                result,
            } => {
                if !self.fetch_manager.is_current_repos(generation) {
                    tracing::debug!("Discarding stale repository response for '{}'", login);
                    return;
                }
                match result {
                    Ok(repos) => self.repos.set_repos(repos),
                    Err(e) => {
                        // The pane falls back to its empty state.
                        tracing::warn!("Repository fetch for '{}' failed: {}", login, e);
                        self.repos.set_repos(Vec::new());
                    }
                }
            }
            FetchEvent::RateLimit(rate) => {
                let was_exhausted = self
                    .status_bar
                    .rate_limit()
                    .is_some_and(|r| r.is_exhausted());
                if rate.is_exhausted() && !was_exhausted {
                    self.status_bar.flash_error("GitHub rate limit exhausted");
                }
                self.status_bar.set_rate_limit(rate);
            }
        }
    }
}
