// Background fetch orchestration. The manager owns the channel the event
// loop drains, a cancellable debounce timer for the suggestion flow, and a
// generation counter per fetch kind so responses that arrive after a newer
// request was issued can be recognized and discarded. In-flight HTTP
// requests are never aborted; superseded responses are simply ignored.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::client::{GitHubClient, GitHubError};
use super::models::{RateLimit, Repository, UserProfile, UserSuggestion};

/// Messages emitted by background tasks, drained by the event loop.
#[derive(Debug)]
pub enum FetchEvent {
    /// The quiet period elapsed with no further edits to the query.
    DebounceElapsed { generation: u64, query: String },
    Suggestions {
        generation: u64,
        result: Result<Vec<UserSuggestion>, GitHubError>,
    },
    Profile {
        generation: u64,
        login: String,
        result: Result<UserProfile, GitHubError>,
    },
    Repos {
        generation: u64,
        login: String,
        result: Result<Vec<Repository>, GitHubError>,
    },
    /// Quota snapshot from the most recent response headers.
    RateLimit(RateLimit),
}

pub struct FetchManager {
    client: GitHubClient,
    debounce: Duration,
    event_tx: mpsc::UnboundedSender<FetchEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<FetchEvent>>,
    pending_debounce: Option<JoinHandle<()>>,
    suggestion_generation: u64,
    profile_generation: u64,
    repos_generation: u64,
}

impl FetchManager {
    pub fn new(client: GitHubClient, debounce: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            client,
            debounce,
            event_tx,
            event_rx: Some(event_rx),
            pending_debounce: None,
            suggestion_generation: 0,
            profile_generation: 0,
            repos_generation: 0,
        }
    }

    /// Take the event receiver for the main loop. Can only be called once.
    pub fn take_event_rx(&mut self) -> Option<mpsc::UnboundedReceiver<FetchEvent>> {
        self.event_rx.take()
    }

    /// Restart the quiet-period timer for the given query. Any previously
    /// scheduled timer is cancelled, so only the latest query can fire. An
    /// empty query never searches; it cancels and leaves nothing pending.
    pub fn schedule_suggestions(&mut self, query: &str) {
        self.cancel_debounce();
        self.suggestion_generation += 1;
        if query.is_empty() {
            debug!(generation = self.suggestion_generation, "empty query, nothing scheduled");
            return;
        }
        let generation = self.suggestion_generation;
        let query = query.to_string();
        let tx = self.event_tx.clone();
        let debounce = self.debounce;
        debug!(generation, %query, "debounce timer scheduled");
        self.pending_debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let _ = tx.send(FetchEvent::DebounceElapsed { generation, query });
        }));
    }

    /// Drop the pending timer and mark every outstanding suggestion
    /// response as stale. Requests already on the wire keep running; their
    /// results fail the generation check when they land.
    pub fn invalidate_suggestions(&mut self) {
        self.cancel_debounce();
        self.suggestion_generation += 1;
        debug!(generation = self.suggestion_generation, "suggestion state invalidated");
    }

    pub fn is_current_suggestions(&self, generation: u64) -> bool {
        generation == self.suggestion_generation
    }

    pub fn is_current_profile(&self, generation: u64) -> bool {
        generation == self.profile_generation
    }

    pub fn is_current_repos(&self, generation: u64) -> bool {
        generation == self.repos_generation
    }

    /// Issue the search request for a query whose quiet period elapsed.
    /// The caller passes the generation from the `DebounceElapsed` event so
    /// the response stays tied to the keystroke sequence that caused it.
    pub fn spawn_suggestion_fetch(&self, generation: u64, query: String) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.search_users(&query).await {
                Ok((items, rate)) => {
                    if let Some(rate) = rate {
                        let _ = tx.send(FetchEvent::RateLimit(rate));
                    }
                    let _ = tx.send(FetchEvent::Suggestions {
                        generation,
                        result: Ok(items),
                    });
                }
                Err(e) => {
                    let _ = tx.send(FetchEvent::Suggestions {
                        generation,
                        result: Err(e),
                    });
                }
            }
        });
    }

    /// Fetch the full profile for a committed login.
    pub fn fetch_profile(&mut self, login: &str) {
        self.profile_generation += 1;
        let generation = self.profile_generation;
        let login = login.to_string();
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.fetch_user(&login).await {
                Ok((profile, rate)) => {
                    if let Some(rate) = rate {
                        let _ = tx.send(FetchEvent::RateLimit(rate));
                    }
                    let _ = tx.send(FetchEvent::Profile {
                        generation,
                        login,
                        result: Ok(profile),
                    });
                }
                Err(e) => {
                    let _ = tx.send(FetchEvent::Profile {
                        generation,
                        login,
                        result: Err(e),
                    });
                }
            }
        });
    }

    /// Fetch the repository list for a committed login.
    pub fn fetch_repos(&mut self, login: &str) {
        self.repos_generation += 1;
        let generation = self.repos_generation;
        let login = login.to_string();
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.fetch_repos(&login).await {
                Ok((repos, rate)) => {
                    if let Some(rate) = rate {
                        let _ = tx.send(FetchEvent::RateLimit(rate));
                    }
                    let _ = tx.send(FetchEvent::Repos {
                        generation,
                        login,
                        result: Ok(repos),
                    });
                }
                Err(e) => {
                    let _ = tx.send(FetchEvent::Repos {
                        generation,
                        login,
                        result: Err(e),
                    });
                }
            }
        });
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.pending_debounce.take() {
            handle.abort();
        }
    }
}

impl Drop for FetchManager {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GitHubConfig;
    use tokio::time::{advance, timeout, Instant};

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn test_manager() -> FetchManager {
        let config = GitHubConfig {
            // Unroutable on purpose; tests must never reach the network.
            api_url: "http://127.0.0.1:1".to_string(),
            user_agent: "octoscout-tests".to_string(),
            timeout_secs: 2,
        };
        let client = GitHubClient::new(&config, None).unwrap();
        FetchManager::new(client, DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_after_quiet_period() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();
        let start = Instant::now();

        manager.schedule_suggestions("linus");

        match rx.recv().await.unwrap() {
            FetchEvent::DebounceElapsed { generation, query } => {
                assert_eq!(query, "linus");
                assert!(manager.is_current_suggestions(generation));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(start.elapsed(), DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_keystroke_restarts_the_timer() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();
        let start = Instant::now();

        // Four keystrokes 50ms apart; only the final query may fire.
        for query in ["t", "to", "tor", "torv"] {
            manager.schedule_suggestions(query);
            advance(Duration::from_millis(50)).await;
        }

        match rx.recv().await.unwrap() {
            FetchEvent::DebounceElapsed { query, .. } => assert_eq!(query, "torv"),
            other => panic!("unexpected event: {other:?}"),
        }
        // The final keystroke lands at t=150ms and the quiet period is
        // measured from there.
        assert_eq!(start.elapsed(), Duration::from_millis(150) + DEBOUNCE);

        // Nothing else is pending.
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_cancels_pending_timer() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        manager.schedule_suggestions("octo");
        manager.invalidate_suggestions();

        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_cancels_and_schedules_nothing() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        // Emptying the box after a keystroke must leave the line quiet.
        manager.schedule_suggestions("oc");
        manager.schedule_suggestions("");

        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
        // The cancelled lookup's generation is also stale now.
        assert!(!manager.is_current_suggestions(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_makes_prior_generation_stale() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        manager.schedule_suggestions("octo");
        let generation = match rx.recv().await.unwrap() {
            FetchEvent::DebounceElapsed { generation, .. } => generation,
            other => panic!("unexpected event: {other:?}"),
        };
        assert!(manager.is_current_suggestions(generation));

        manager.invalidate_suggestions();
        assert!(!manager.is_current_suggestions(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_schedule_supersedes_older_generation() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        manager.schedule_suggestions("oc");
        advance(DEBOUNCE).await;
        let first = match rx.recv().await.unwrap() {
            FetchEvent::DebounceElapsed { generation, .. } => generation,
            other => panic!("unexpected event: {other:?}"),
        };

        manager.schedule_suggestions("oct");
        assert!(!manager.is_current_suggestions(first));
    }

    #[tokio::test]
    async fn test_profile_fetch_reports_errors_as_events() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        manager.fetch_profile("octocat");

        match rx.recv().await.unwrap() {
            FetchEvent::Profile { generation, login, result } => {
                assert_eq!(login, "octocat");
                assert!(result.is_err());
                assert!(manager.is_current_profile(generation));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repo_fetch_generations_are_independent() {
        let mut manager = test_manager();
        let mut rx = manager.take_event_rx().unwrap();

        manager.fetch_repos("octocat");
        manager.fetch_repos("torvalds");

        // Both events arrive, but only the second generation is current.
        let mut stale = 0;
        let mut current = 0;
        for _ in 0..2 {
            match rx.recv().await.unwrap() {
                FetchEvent::Repos { generation, .. } => {
                    if manager.is_current_repos(generation) {
                        current += 1;
                    } else {
                        stale += 1;
                    }
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!((stale, current), (1, 1));
        // Profile generation is untouched by repo fetches.
        assert!(manager.is_current_profile(0));
    }

    #[tokio::test]
    async fn test_event_rx_can_only_be_taken_once() {
        let mut manager = test_manager();
        assert!(manager.take_event_rx().is_some());
        assert!(manager.take_event_rx().is_none());
    }
}
