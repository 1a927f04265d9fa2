// Search input with an autocomplete popup. The component owns the query
// text, highlight and scroll state; network scheduling lives in the fetch
// manager, which feeds results back through the setters below. The popup is
// manually windowed so the painted rows and the click hit-test share one
// offset.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::components::spinner::Spinner;
use crate::components::Component;
use crate::config::Theme;
use crate::github::UserSuggestion;
use crate::input::focus::FocusArea;

/// Rows visible in the popup before the list starts scrolling.
const MAX_VISIBLE_SUGGESTIONS: usize = 6;

pub struct SearchInput {
    query: String,
    suggestions: Vec<UserSuggestion>,
    /// `None` means nothing is highlighted yet; Down enters the list at 0.
    highlighted: Option<usize>,
    /// First suggestion row visible in the popup.
    offset: usize,
    panel_visible: bool,
    failed: bool,
    loading: bool,
    spinner: Spinner,
    input_area: Rect,
    panel_area: Rect,
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            highlighted: None,
            offset: 0,
            panel_visible: false,
            failed: false,
            loading: false,
            spinner: Spinner::default(),
            input_area: Rect::default(),
            panel_area: Rect::default(),
        }
    }

    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    /// Inner rects for hit-testing, refreshed by the layout pass each draw.
    pub fn set_areas(&mut self, input_area: Rect, panel_area: Rect) {
        self.input_area = input_area;
        self.panel_area = panel_area;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Seed the box, e.g. from a query given on the command line.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clear_suggestion_state();
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A lookup is on the wire for the current query.
    pub fn set_loading(&mut self) {
        self.loading = true;
        self.spinner.set_active(true);
    }

    /// Fresh results replace whatever the panel showed before. The panel is
    /// revealed even for an empty list so the no-matches message can render.
    pub fn set_suggestions(&mut self, suggestions: Vec<UserSuggestion>) {
        self.suggestions = suggestions;
        self.highlighted = None;
        self.offset = 0;
        self.panel_visible = true;
        self.failed = false;
        self.loading = false;
    }

    /// The lookup failed; show the panel in its error state.
    pub fn set_search_failed(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
        self.offset = 0;
        self.panel_visible = true;
        self.failed = true;
        self.loading = false;
    }

    /// Rows the popup wants, including its border. Zero when hidden.
    pub fn desired_panel_height(&self) -> u16 {
        if !self.panel_visible {
            return 0;
        }
        if self.failed || self.suggestions.is_empty() {
            return 3;
        }
        self.suggestions.len().min(MAX_VISIBLE_SUGGESTIONS) as u16 + 2
    }

    fn clear_suggestion_state(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
        self.offset = 0;
        self.panel_visible = false;
        self.failed = false;
        self.loading = false;
    }

    fn highlight_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
        self.scroll_highlight_into_view();
    }

    fn highlight_prev(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        // Up never introduces a highlight and never wraps.
        if let Some(i) = self.highlighted {
            self.highlighted = Some(i.saturating_sub(1));
        }
        self.scroll_highlight_into_view();
    }

    /// Popup rows the last layout actually had room for.
    fn visible_rows(&self) -> usize {
        self.panel_area.height as usize
    }

    fn scroll_highlight_into_view(&mut self) {
        let Some(highlighted) = self.highlighted else {
            return;
        };
        let visible = self.visible_rows();
        if visible == 0 {
            return;
        }
        if highlighted < self.offset {
            self.offset = highlighted;
        } else if highlighted >= self.offset + visible {
            self.offset = highlighted - visible + 1;
        }
    }

    fn apply_commit(&mut self, login: &str) {
        self.query = login.to_string();
        self.clear_suggestion_state();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.query.push(c);
                self.highlighted = None;
                Some(Action::QueryChanged(self.query.clone()))
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.highlighted = None;
                if self.query.is_empty() {
                    Some(Action::QueryCleared)
                } else {
                    Some(Action::QueryChanged(self.query.clone()))
                }
            }
            KeyCode::Down => Some(Action::SuggestionNext),
            KeyCode::Up => Some(Action::SuggestionPrev),
            KeyCode::Enter => {
                let login = self
                    .highlighted
                    .and_then(|i| self.suggestions.get(i))
                    .map(|s| s.login.clone())?;
                Some(Action::CommitLogin(login))
            }
            KeyCode::Esc => Some(Action::DismissSearch),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        let pos = (mouse.column, mouse.row).into();

        if self.panel_visible && self.panel_area.contains(pos) {
            let has_rows = !self.failed && !self.suggestions.is_empty();
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if has_rows => {
                    // Same window the row was painted from.
                    let relative_y = mouse.row.saturating_sub(self.panel_area.y) as usize;
                    self.suggestions
                        .get(self.offset + relative_y)
                        .map(|s| Action::CommitLogin(s.login.clone()))
                }
                MouseEventKind::ScrollUp => Some(Action::SuggestionPrev),
                MouseEventKind::ScrollDown => Some(Action::SuggestionNext),
                _ => None,
            };
        }

        if self.input_area.contains(pos) {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                return Some(Action::FocusArea(FocusArea::Search));
            }
        }

        None
    }

    /// The popup. Drawn last by the layout pass so it overlays the panes
    /// beneath; `area` already excludes nothing visible.
    pub fn render_panel(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.panel_visible || area.height == 0 {
            return;
        }

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Suggestions ")
            .title_style(Style::default().fg(theme.search.panel_border.to_color()))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.search.panel_border.to_color()))
            .style(Style::default().bg(theme.search.panel_bg.to_color()));

        if self.failed {
            let msg = Paragraph::new(Line::from(Span::styled(
                "Search failed.",
                Style::default()
                    .fg(theme.search.error_fg.to_color())
                    .add_modifier(Modifier::ITALIC),
            )))
            .block(block);
            frame.render_widget(msg, area);
            return;
        }

        if self.suggestions.is_empty() {
            let msg = Paragraph::new(Line::from(Span::styled(
                "No users found.",
                Style::default()
                    .fg(theme.search.empty_fg.to_color())
                    .add_modifier(Modifier::ITALIC),
            )))
            .block(block);
            frame.render_widget(msg, area);
            return;
        }

        // Window the rows here instead of letting the List scroll; the mouse
        // hit-test maps clicks back through the same offset.
        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .skip(self.offset)
            .take(self.visible_rows())
            .map(|s| {
                ListItem::new(Line::from(Span::styled(
                    s.login.clone(),
                    Style::default().fg(theme.search.item_fg.to_color()),
                )))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(theme.search.selected_bg.to_color())
                    .fg(theme.search.selected_fg.to_color())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(self.highlighted.map(|i| i.saturating_sub(self.offset)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchInput {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::SuggestionNext => self.highlight_next(),
            Action::SuggestionPrev => self.highlight_prev(),
            Action::CommitLogin(login) => self.apply_commit(login),
            Action::DismissSearch | Action::QueryCleared => self.clear_suggestion_state(),
            Action::Tick => {
                if self.loading {
                    self.spinner.tick();
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let title = if self.loading {
            format!(" Search {} ", self.spinner.current_frame())
        } else {
            " Search ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(theme.border_style(focused));

        let content = if self.query.is_empty() && !focused {
            Line::from(Span::styled(
                "Search GitHub users…",
                Style::default()
                    .fg(theme.search.placeholder_fg.to_color())
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let mut spans = vec![Span::styled(
                self.query.clone(),
                Style::default().fg(theme.search.input_fg.to_color()),
            )];
            if focused {
                spans.push(Span::styled(
                    "▎",
                    Style::default().fg(theme.colors.primary.to_color()),
                ));
            }
            Line::from(spans)
        };

        let input = Paragraph::new(content)
            .style(Style::default().bg(theme.search.input_bg.to_color()))
            .block(block);
        frame.render_widget(input, area);
    }
}
