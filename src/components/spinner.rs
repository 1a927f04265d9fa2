// Frame source for the loading indicators. The spinner owns its cadence;
// render sites ask for the current frame and style it themselves.
#![allow(dead_code)]

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    #[default]
    Braille,
    BrailleDots,
    Line,
    Pulse,
}

impl SpinnerStyle {
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Braille => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::BrailleDots => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            SpinnerStyle::Line => &["⎯", "\\", "|", "/"],
            SpinnerStyle::Pulse => &["█", "▓", "▒", "░", "▒", "▓"],
        }
    }

    pub fn frame_duration_ms(&self) -> u64 {
        match self {
            SpinnerStyle::Braille => 80,
            SpinnerStyle::BrailleDots => 100,
            SpinnerStyle::Line => 100,
            SpinnerStyle::Pulse => 120,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpinnerStyle::Braille => "braille",
            SpinnerStyle::BrailleDots => "braille_dots",
            SpinnerStyle::Line => "line",
            SpinnerStyle::Pulse => "pulse",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "braille" => Some(SpinnerStyle::Braille),
            "braille_dots" => Some(SpinnerStyle::BrailleDots),
            "line" => Some(SpinnerStyle::Line),
            "pulse" => Some(SpinnerStyle::Pulse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spinner {
    style: SpinnerStyle,
    frame_index: usize,
    last_frame_time: Instant,
    active: bool,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SpinnerStyle::default())
    }
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        Self {
            style,
            frame_index: 0,
            last_frame_time: Instant::now(),
            active: true,
        }
    }

    pub fn from_theme_name(name: &str) -> Self {
        Self::new(SpinnerStyle::from_name(name).unwrap_or_default())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.frame_index = 0;
            self.last_frame_time = Instant::now();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the animation if a frame is due. Returns true when the
    /// displayed frame changed and a redraw is warranted.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }

        let frame_duration = Duration::from_millis(self.style.frame_duration_ms());
        if self.last_frame_time.elapsed() >= frame_duration {
            let frames = self.style.frames();
            self.frame_index = (self.frame_index + 1) % frames.len();
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn current_frame(&self) -> &'static str {
        let frames = self.style.frames();
        frames[self.frame_index % frames.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let spinner = Spinner::new(SpinnerStyle::Braille);
        assert_eq!(spinner.style, SpinnerStyle::Braille);
        assert!(spinner.is_active());
    }

    #[test]
    fn test_spinner_tick_advances_when_frame_due() {
        let mut spinner = Spinner::new(SpinnerStyle::Braille);
        spinner.last_frame_time = Instant::now() - Duration::from_millis(100);
        let ticked = spinner.tick();
        assert!(ticked);
        assert_eq!(spinner.frame_index, 1);
    }

    #[test]
    fn test_inactive_spinner_does_not_tick() {
        let mut spinner = Spinner::new(SpinnerStyle::Braille);
        spinner.set_active(false);
        assert!(!spinner.is_active());
        assert!(!spinner.tick());
    }

    #[test]
    fn test_reactivation_restarts_animation() {
        let mut spinner = Spinner::new(SpinnerStyle::Pulse);
        spinner.last_frame_time = Instant::now() - Duration::from_millis(200);
        spinner.tick();
        assert_eq!(spinner.frame_index, 1);

        spinner.set_active(false);
        spinner.set_active(true);
        assert_eq!(spinner.frame_index, 0);
    }

    #[test]
    fn test_all_styles_have_frames() {
        for style in [
            SpinnerStyle::Braille,
            SpinnerStyle::BrailleDots,
            SpinnerStyle::Line,
            SpinnerStyle::Pulse,
        ] {
            assert!(!style.frames().is_empty(), "Style {:?} has no frames", style);
        }
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!(SpinnerStyle::from_name("braille"), Some(SpinnerStyle::Braille));
        assert_eq!(SpinnerStyle::from_name("pulse"), Some(SpinnerStyle::Pulse));
        assert_eq!(SpinnerStyle::from_name("invalid"), None);
    }
}
