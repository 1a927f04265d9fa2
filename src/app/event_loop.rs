// Event loop - main run() method and fetch-event polling

use std::time::{Duration, Instant};

use crossterm::event;

use super::App;
use crate::action::Action;
use crate::error::{Result, ScoutError};

impl App {
    pub async fn run(&mut self) -> Result<()> {
        let mut fetch_rx = self.fetch_manager.take_event_rx();

        loop {
            // ---- 1. Poll fetch events (debounce firings and HTTP results) ----

            if let Some(ref mut rx) = fetch_rx {
                let mut had_fetch_events = false;
                while let Ok(fetch_event) = rx.try_recv() {
                    had_fetch_events = true;
                    self.handle_fetch_event(fetch_event);
                }
                if had_fetch_events {
                    self.mark_dirty();
                }
            }

            // Tick (drives spinners and flash expiry)
            if self.last_tick.elapsed() >= self.tick_interval {
                self.dispatch(Action::Tick)?;
                self.last_tick = Instant::now();
                self.mark_dirty();
            }

            if self.should_quit {
                break;
            }

            // ---- 2. Poll user input (keys/mouse/resize) ----

            if event::poll(Duration::from_millis(16))
                .map_err(|e| ScoutError::Terminal(e.to_string()))?
            {
                let event = event::read().map_err(|e| ScoutError::Terminal(e.to_string()))?;

                // Any user input implies we want to give UI feedback
                self.mark_dirty();

                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action)?;
                }
            }

            // The 16ms poll above blocks this worker thread; yield so the
            // debounce and fetch tasks stay responsive on a busy runtime.
            tokio::task::yield_now().await;

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }
}
