use crate::input::focus::FocusArea;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    FocusNext,
    FocusPrev,
    FocusArea(FocusArea),

    ToggleTheme,

    // Search actions
    /// The query text changed; restart the quiet-period timer.
    QueryChanged(String),
    /// The query became empty; drop suggestions and pending fetches.
    QueryCleared,
    SuggestionNext,
    SuggestionPrev,
    /// Commit the given login as the active user.
    CommitLogin(String),
    /// Escape pressed: close the panel and give up search focus.
    DismissSearch,

    // Repository list actions
    RepoSelectNext,
    RepoSelectPrev,
    RepoSelect(usize),
    OpenSelectedRepo,
    YankSelectedRepo,

    // Profile actions
    OpenProfile,
}
