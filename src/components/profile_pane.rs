// Read-only pane showing the committed user's profile. Not focusable; all
// of its inputs arrive through setters driven by fetch events.

use crossterm::event::Event;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::action::Action;
use crate::components::spinner::Spinner;
use crate::components::Component;
use crate::config::Theme;
use crate::github::UserProfile;
use crate::util::{format_count, format_date};

pub struct ProfilePane {
    user: Option<UserProfile>,
    loading: bool,
    spinner: Spinner,
}

impl ProfilePane {
    pub fn new() -> Self {
        Self {
            user: None,
            loading: false,
            spinner: Spinner::default(),
        }
    }

    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn profile_url(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.html_url.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.spinner.set_active(true);
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.loading = false;
    }

    /// The profile fetch failed; fall back to the empty placeholder.
    pub fn set_failed(&mut self) {
        self.user = None;
        self.loading = false;
    }

    fn build_lines(&self, theme: &Theme) -> Vec<Line<'_>> {
        let Some(user) = &self.user else {
            return vec![
                Line::default(),
                Line::from(Span::styled(
                    "Search for a GitHub user to see their profile.",
                    Style::default()
                        .fg(theme.colors.muted.to_color())
                        .add_modifier(Modifier::ITALIC),
                )),
            ];
        };

        let label = Style::default().fg(theme.profile.label_fg.to_color());
        let value = Style::default().fg(theme.profile.value_fg.to_color());

        let mut lines = vec![
            Line::from(Span::styled(
                user.display_name().to_string(),
                Style::default()
                    .fg(theme.profile.heading_fg.to_color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("@{}", user.login),
                Style::default().fg(theme.profile.login_fg.to_color()),
            )),
            Line::default(),
        ];

        if let Some(bio) = &user.bio {
            lines.push(Line::from(Span::styled(
                bio.clone(),
                Style::default().fg(theme.profile.bio_fg.to_color()),
            )));
            lines.push(Line::default());
        }

        let location = user.location.as_deref().unwrap_or("Not available");
        lines.push(Line::from(vec![
            Span::styled("Location: ", label),
            Span::styled(location.to_string(), value),
        ]));

        lines.push(Line::from(vec![
            Span::styled("Repos: ", label),
            Span::styled(format_count(user.public_repos as u64), value),
            Span::styled("  Followers: ", label),
            Span::styled(format_count(user.followers as u64), value),
            Span::styled("  Following: ", label),
            Span::styled(format_count(user.following as u64), value),
        ]));

        if let Some(created_at) = &user.created_at {
            lines.push(Line::from(vec![
                Span::styled("Joined: ", label),
                Span::styled(format_date(created_at), value),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            user.html_url.clone(),
            Style::default()
                .fg(theme.profile.link_fg.to_color())
                .add_modifier(Modifier::UNDERLINED),
        )));

        lines
    }
}

impl Default for ProfilePane {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProfilePane {
    fn handle_event(&mut self, _event: &Event) -> Option<Action> {
        None
    }

    fn update(&mut self, action: &Action) {
        if let Action::Tick = action {
            if self.loading {
                self.spinner.tick();
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .title(" Profile ")
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
                    "Loading profile…",
                    Style::default().fg(theme.colors.muted.to_color()),
                ),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        }

        let body = Paragraph::new(self.build_lines(theme))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample_user() -> UserProfile {
        UserProfile {
            login: "torvalds".to_string(),
            name: Some("Linus Torvalds".to_string()),
            avatar_url: None,
            bio: None,
            location: Some("Portland, OR".to_string()),
            public_repos: 8,
            followers: 150000,
            following: 0,
            html_url: "https://github.com/torvalds".to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap()),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rendered_text(pane: &ProfilePane) -> String {
        pane.build_lines(&Theme::dark())
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_placeholder_before_any_user() {
        let pane = ProfilePane::new();
        assert!(rendered_text(&pane).contains("Search for a GitHub user"));
    }

    #[test]
    fn test_profile_fields_rendered() {
        let mut pane = ProfilePane::new();
        pane.set_user(sample_user());

        let text = rendered_text(&pane);
        assert!(text.contains("Linus Torvalds"));
        assert!(text.contains("@torvalds"));
        assert!(text.contains("Location: Portland, OR"));
        assert!(text.contains("Repos: 8"));
        assert!(text.contains("Followers: 150,000"));
        assert!(text.contains("Joined: Jan 25, 2011"));
        assert!(text.contains("https://github.com/torvalds"));
    }

    #[test]
    fn test_missing_location_falls_back() {
        let mut pane = ProfilePane::new();
        let mut user = sample_user();
        user.location = None;
        pane.set_user(user);

        assert!(rendered_text(&pane).contains("Location: Not available"));
    }

    #[test]
    fn test_bio_included_when_present() {
        let mut pane = ProfilePane::new();
        let mut user = sample_user();
        user.bio = Some("Creator of Linux".to_string());
        pane.set_user(user);

        assert!(rendered_text(&pane).contains("Creator of Linux"));
    }

    #[test]
    fn test_loading_then_user_clears_flag() {
        let mut pane = ProfilePane::new();
        pane.set_loading();
        assert!(pane.is_loading());

        pane.set_user(sample_user());
        assert!(!pane.is_loading());
        assert_eq!(pane.user().map(|u| u.login.as_str()), Some("torvalds"));
    }

    #[test]
    fn test_failure_returns_to_placeholder() {
        let mut pane = ProfilePane::new();
        pane.set_user(sample_user());
        pane.set_loading();
        pane.set_failed();

        assert!(!pane.is_loading());
        assert!(pane.user().is_none());
        assert!(rendered_text(&pane).contains("Search for a GitHub user"));
    }
}
