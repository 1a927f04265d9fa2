// Rendering - draw() method and UI layout
// Search box on top, profile and repository panes side by side, status bar
// at the bottom. The suggestion popup overlays the panes below the box.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use super::App;
use crate::components::Component;
use crate::error::{Result, ScoutError};
use crate::input::focus::FocusArea;

impl App {
    pub(super) fn draw(&mut self) -> Result<()> {
        let focus_search = self.focus.is_focused(FocusArea::Search);
        let focus_repos = self.focus.is_focused(FocusArea::Repos);
        self.status_bar.set_focus(self.focus.current());

        // Clone theme once - it's small (just color values)
        let theme = self.config_manager.theme().clone();

        self.terminal
            .draw(|frame| {
                let size = frame.area();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ])
                    .split(size);
                let search_area = chunks[0];
                let main_area = chunks[1];
                let status_area = chunks[2];

                let main_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
                    .split(main_area);
                let profile_area = main_chunks[0];
                let repos_area = main_chunks[1];

                // Popup drops out of the search box, clipped to the main area.
                let panel_height = self.search.desired_panel_height().min(main_area.height);
                let panel_area = if panel_height > 0 {
                    Rect::new(
                        search_area.x,
                        search_area.y + search_area.height,
                        search_area.width,
                        panel_height,
                    )
                } else {
                    Rect::default()
                };

                // Components keep their inner rects for mouse hit-testing.
                let margin = Margin::new(1, 1);
                self.search
                    .set_areas(search_area.inner(margin), panel_area.inner(margin));
                self.repos.set_inner_area(repos_area.inner(margin));

                self.search.render(frame, search_area, focus_search, &theme);
                self.profile.render(frame, profile_area, false, &theme);
                self.repos.render(frame, repos_area, focus_repos, &theme);
                self.status_bar.render(frame, status_area, false, &theme);

                // Rendered last so it sits above the panes it covers.
                if panel_height > 0 {
                    self.search.render_panel(frame, panel_area, &theme);
                }
            })
            .map_err(|e| ScoutError::Terminal(e.to_string()))?;

        Ok(())
    }
}
