// One-line footer: focus-sensitive key hints on the left, the latest
// rate-limit reading on the right, and transient flash messages that take
// over the hint area until they expire.

use std::time::{Duration, Instant};

use crossterm::event::Event;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::components::Component;
use crate::config::Theme;
use crate::github::RateLimit;
use crate::input::focus::FocusArea;

const FLASH_DURATION_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlashLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Flash {
    level: FlashLevel,
    text: String,
    created_at: Instant,
    duration: Duration,
}

impl Flash {
    fn new(level: FlashLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
            duration: Duration::from_millis(FLASH_DURATION_MS),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

pub struct StatusBar {
    flash: Option<Flash>,
    rate_limit: Option<RateLimit>,
    focus: FocusArea,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            flash: None,
            rate_limit: None,
            focus: FocusArea::Search,
        }
    }

    /// Refreshed by the layout pass so hints track the focused pane.
    pub fn set_focus(&mut self, focus: FocusArea) {
        self.focus = focus;
    }

    pub fn flash_info(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash::new(FlashLevel::Info, text.into()));
    }

    pub fn flash_error(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash::new(FlashLevel::Error, text.into()));
    }

    pub fn has_flash(&self) -> bool {
        self.flash.is_some()
    }

    pub fn set_rate_limit(&mut self, rate: RateLimit) {
        self.rate_limit = Some(rate);
    }

    pub fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    fn hint_pairs(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            FocusArea::Search => &[
                ("↑/↓", "navigate"),
                ("↵", "select"),
                ("Esc", "close"),
                ("Tab", "focus"),
                ("Ctrl+T", "theme"),
                ("Ctrl+C", "quit"),
            ],
            FocusArea::Repos => &[
                ("j/k", "move"),
                ("o", "open"),
                ("y", "copy url"),
                ("p", "profile"),
                ("Tab", "focus"),
                ("t", "theme"),
                ("q", "quit"),
            ],
        }
    }

    fn rate_text(rate: &RateLimit) -> String {
        if rate.is_exhausted() {
            format!("rate limited · resets {} UTC", rate.reset.format("%H:%M"))
        } else {
            format!("API {}/{}", rate.remaining, rate.limit)
        }
    }

    fn rate_is_low(rate: &RateLimit) -> bool {
        rate.is_exhausted() || rate.remaining * 10 < rate.limit
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_event(&mut self, _event: &Event) -> Option<Action> {
        None
    }

    fn update(&mut self, action: &Action) {
        if let Action::Tick = action {
            if self.flash.as_ref().is_some_and(|f| f.is_expired()) {
                self.flash = None;
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool, theme: &Theme) {
        let bg = Style::default().bg(theme.status_bar.bg.to_color());

        let left = if let Some(flash) = &self.flash {
            let fg = match flash.level {
                FlashLevel::Info => theme.status_bar.flash_info_fg.to_color(),
                FlashLevel::Error => theme.status_bar.flash_error_fg.to_color(),
            };
            Line::from(Span::styled(
                format!(" {}", flash.text),
                bg.fg(fg).add_modifier(Modifier::BOLD),
            ))
        } else {
            let mut spans = Vec::new();
            for (i, (key, desc)) in self.hint_pairs().iter().enumerate() {
                spans.push(Span::styled(
                    if i == 0 { format!(" {key}") } else { key.to_string() },
                    bg.fg(theme.status_bar.key_fg.to_color()),
                ));
                spans.push(Span::styled(
                    format!(" {desc}  "),
                    bg.fg(theme.status_bar.hint_fg.to_color()),
                ));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(left).style(bg), area);

        if let Some(rate) = &self.rate_limit {
            let fg = if Self::rate_is_low(rate) {
                theme.status_bar.rate_low_fg.to_color()
            } else {
                theme.status_bar.rate_ok_fg.to_color()
            };
            let right = Line::from(Span::styled(format!("{} ", Self::rate_text(rate)), bg.fg(fg)));
            frame.render_widget(
                Paragraph::new(right).style(bg).alignment(Alignment::Right),
                area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn rate(remaining: u32, limit: u32) -> RateLimit {
        RateLimit {
            limit,
            remaining,
            reset: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_flash_replaces_and_expires() {
        let mut bar = StatusBar::new();
        assert!(!bar.has_flash());

        bar.flash_info("copied URL");
        assert!(bar.has_flash());

        // Not yet expired; tick keeps it.
        bar.update(&Action::Tick);
        assert!(bar.has_flash());

        if let Some(flash) = bar.flash.as_mut() {
            flash.created_at = Instant::now() - Duration::from_millis(FLASH_DURATION_MS + 10);
        }
        bar.update(&Action::Tick);
        assert!(!bar.has_flash());
    }

    #[test]
    fn test_error_flash_overrides_info() {
        let mut bar = StatusBar::new();
        bar.flash_info("copied URL");
        bar.flash_error("could not open browser");
        assert_eq!(bar.flash.as_ref().map(|f| f.level), Some(FlashLevel::Error));
    }

    #[test]
    fn test_rate_limit_reading_is_kept() {
        let mut bar = StatusBar::new();
        assert!(bar.rate_limit().is_none());
        bar.set_rate_limit(rate(41, 60));
        assert_eq!(bar.rate_limit().map(|r| r.remaining), Some(41));
    }

    #[test]
    fn test_rate_text_formats() {
        assert_eq!(StatusBar::rate_text(&rate(41, 60)), "API 41/60");
        assert_eq!(
            StatusBar::rate_text(&rate(0, 60)),
            "rate limited · resets 12:30 UTC"
        );
    }

    #[test]
    fn test_rate_low_threshold() {
        assert!(!StatusBar::rate_is_low(&rate(41, 60)));
        assert!(!StatusBar::rate_is_low(&rate(6, 60)));
        assert!(StatusBar::rate_is_low(&rate(5, 60)));
        assert!(StatusBar::rate_is_low(&rate(0, 60)));
    }

    #[test]
    fn test_hints_follow_focus() {
        let mut bar = StatusBar::new();
        assert!(bar.hint_pairs().iter().any(|(k, _)| *k == "↵"));

        bar.set_focus(FocusArea::Repos);
        assert!(bar.hint_pairs().iter().any(|(_, d)| *d == "copy url"));
    }
}
