#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusArea {
    #[default]
    Search,
    Repos,
}

impl FocusArea {
    pub const RING: &'static [FocusArea] = &[FocusArea::Search, FocusArea::Repos];

    pub fn next(&self) -> FocusArea {
        let idx = Self::RING.iter().position(|f| f == self).unwrap_or(0);
        Self::RING[(idx + 1) % Self::RING.len()]
    }

    pub fn prev(&self) -> FocusArea {
        let idx = Self::RING.iter().position(|f| f == self).unwrap_or(0);
        if idx == 0 {
            Self::RING[Self::RING.len() - 1]
        } else {
            Self::RING[idx - 1]
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FocusManager {
    pub current: FocusArea,
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            current: FocusArea::Search,
        }
    }

    pub fn current(&self) -> FocusArea {
        self.current
    }

    pub fn focus(&mut self, area: FocusArea) {
        self.current = area;
    }

    pub fn next(&mut self) {
        self.current = self.current.next();
    }

    pub fn prev(&mut self) {
        self.current = self.current.prev();
    }

    pub fn is_focused(&self, area: FocusArea) -> bool {
        self.current == area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_wraps_both_directions() {
        assert_eq!(FocusArea::Search.next(), FocusArea::Repos);
        assert_eq!(FocusArea::Repos.next(), FocusArea::Search);
        assert_eq!(FocusArea::Search.prev(), FocusArea::Repos);
        assert_eq!(FocusArea::Repos.prev(), FocusArea::Search);
    }

    #[test]
    fn test_manager_starts_on_search() {
        let manager = FocusManager::new();
        assert!(manager.is_focused(FocusArea::Search));
    }

    #[test]
    fn test_manager_focus_and_cycle() {
        let mut manager = FocusManager::new();
        manager.next();
        assert!(manager.is_focused(FocusArea::Repos));
        manager.focus(FocusArea::Search);
        assert_eq!(manager.current(), FocusArea::Search);
    }
}
