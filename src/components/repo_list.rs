// Repository cards for the committed user. Three rows per card (name,
// description, metadata), manually windowed so the selected card is always
// fully visible.

use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::components::spinner::Spinner;
use crate::components::Component;
use crate::config::Theme;
use crate::github::Repository;
use crate::util::{format_count, format_date, truncate};

const ROWS_PER_CARD: u16 = 3;

pub struct RepoList {
    repos: Vec<Repository>,
    selected: usize,
    offset: usize,
    loading: bool,
    spinner: Spinner,
    inner_area: Rect,
}

impl RepoList {
    pub fn new() -> Self {
        Self {
            repos: Vec::new(),
            selected: 0,
            offset: 0,
            loading: false,
            spinner: Spinner::default(),
            inner_area: Rect::default(),
        }
    }

    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn set_inner_area(&mut self, area: Rect) {
        self.inner_area = area;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.spinner.set_active(true);
    }

    /// Replace the whole list. Order is preserved as received; selection
    /// returns to the top.
    pub fn set_repos(&mut self, repos: Vec<Repository>) {
        self.repos = repos;
        self.selected = 0;
        self.offset = 0;
        self.loading = false;
    }

    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    pub fn selected_repo(&self) -> Option<&Repository> {
        self.repos.get(self.selected)
    }

    fn visible_cards(&self) -> usize {
        (self.inner_area.height / ROWS_PER_CARD) as usize
    }

    fn scroll_selected_into_view(&mut self) {
        let visible = self.visible_cards();
        if visible == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected - visible + 1;
        }
    }

    fn select_next(&mut self) {
        if self.repos.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.repos.len() - 1);
        self.scroll_selected_into_view();
    }

    fn select_prev(&mut self) {
        if self.repos.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.scroll_selected_into_view();
    }

    fn select_to(&mut self, index: usize) {
        if index < self.repos.len() {
            self.selected = index;
            self.scroll_selected_into_view();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::RepoSelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::RepoSelectPrev),
            KeyCode::Char('o') | KeyCode::Enter => Some(Action::OpenSelectedRepo),
            KeyCode::Char('y') => Some(Action::YankSelectedRepo),
            KeyCode::Char('p') => Some(Action::OpenProfile),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        if !self.inner_area.contains((mouse.column, mouse.row).into()) {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let relative_y = mouse.row.saturating_sub(self.inner_area.y);
                let index = self.offset + (relative_y / ROWS_PER_CARD) as usize;
                if index < self.repos.len() {
                    Some(Action::RepoSelect(index))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => Some(Action::RepoSelectPrev),
            MouseEventKind::ScrollDown => Some(Action::RepoSelectNext),
            _ => None,
        }
    }

    fn card_lines(
        &self,
        repo: &Repository,
        selected: bool,
        focused: bool,
        width: usize,
        theme: &Theme,
    ) -> Vec<Line<'static>> {
        let indicator = if selected && focused {
            format!("{} ", theme.focus.focus_indicator)
        } else {
            "  ".to_string()
        };

        let card_style = if selected && focused {
            theme.selection_style()
        } else {
            Style::default()
        };

        let name_line = Line::from(vec![
            Span::styled(indicator, Style::default().fg(theme.focus.focused_border.to_color())),
            Span::styled(
                repo.name.clone(),
                Style::default()
                    .fg(theme.repo_list.name_fg.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .style(card_style);

        let description = repo
            .description
            .as_deref()
            .unwrap_or("No description available.");
        let desc_line = Line::from(Span::styled(
            format!("  {}", truncate(description, width.saturating_sub(2))),
            Style::default().fg(theme.repo_list.description_fg.to_color()),
        ))
        .style(card_style);

        let mut meta = vec![
            Span::styled(
                format!("  ★ {}", format_count(repo.stargazers_count)),
                Style::default().fg(theme.repo_list.star_fg.to_color()),
            ),
            Span::styled(
                format!("  ⑂ {}", format_count(repo.forks_count)),
                Style::default().fg(theme.repo_list.fork_fg.to_color()),
            ),
        ];
        if let Some(created_at) = &repo.created_at {
            meta.push(Span::styled(
                format!("  {}", format_date(created_at)),
                Style::default().fg(theme.repo_list.date_fg.to_color()),
            ));
        }
        if let Some(language) = &repo.language {
            meta.push(Span::styled(
                format!("  ● {}", language),
                Style::default().fg(theme.repo_list.language_fg.to_color()),
            ));
        }
        if let Some(license) = &repo.license {
            meta.push(Span::styled(
                format!("  {}", truncate(&license.name, 30)),
                Style::default().fg(theme.repo_list.license_fg.to_color()),
            ));
        }

        vec![name_line, desc_line, Line::from(meta).style(card_style)]
    }
}

impl Default for RepoList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RepoList {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::RepoSelectNext => self.select_next(),
            Action::RepoSelectPrev => self.select_prev(),
            Action::RepoSelect(index) => self.select_to(*index),
            Action::Tick => {
                if self.loading {
                    self.spinner.tick();
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let title = if self.repos.is_empty() {
            " Repositories ".to_string()
        } else {
            format!(" Repositories ({}) ", self.repos.len())
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(theme.border_style(focused));

        if self.loading {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", self.spinner.current_frame()),
                    Style::default().fg(theme.spinner.loading_color.to_color()),
                ),
                Span::styled(
                    "Loading repositories...",
                    Style::default().fg(theme.colors.muted.to_color()),
                ),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        }

        if self.repos.is_empty() {
            let msg = Line::from(Span::styled(
                "No repositories found.",
                Style::default()
                    .fg(theme.repo_list.empty_fg.to_color())
                    .add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(Paragraph::new(msg).block(block), area);
            return;
        }

        let inner = block.inner(area);
        let width = inner.width as usize;
        let visible = (inner.height / ROWS_PER_CARD) as usize;

        let mut lines: Vec<Line> = Vec::with_capacity(visible * ROWS_PER_CARD as usize);
        for (i, repo) in self.repos.iter().enumerate().skip(self.offset).take(visible.max(1)) {
            lines.extend(self.card_lines(repo, i == self.selected, focused, width, theme));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
