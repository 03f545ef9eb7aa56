use crate::models::{DropdownEntry, DropdownState, SurfaceId};

/// The one dropdown currently on screen
#[derive(Debug, Clone)]
struct ActiveSurface {
    surface: SurfaceId,
    state: DropdownState,
    entries: Vec<DropdownEntry>,
}

/// Tracks which surface's dropdown is open
///
/// At most one dropdown is open at any time: opening a surface closes whichever other
/// surface held the slot. Only visibility lives here; input values and debounce state
/// stay with the suggestion engine.
#[derive(Debug, Default)]
pub struct DropdownController {
    active: Option<ActiveSurface>,
}

impl DropdownController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `surface` with `state`, returning the other surface that was closed, if any
    pub fn open(&mut self, surface: SurfaceId, state: DropdownState) -> Option<SurfaceId> {
        let entries = state.entries();
        let previous = self.active.replace(ActiveSurface {
            surface,
            state,
            entries,
        });

        previous
            .map(|active| active.surface)
            .filter(|previous| *previous != surface)
    }

    /// Closes `surface`; returns whether it was open
    pub fn close(&mut self, surface: SurfaceId) -> bool {
        if self.is_open(surface) {
            self.active = None;
            return true;
        }
        false
    }

    /// Closes every dropdown, returning the one that was open
    pub fn close_all(&mut self) -> Option<SurfaceId> {
        self.active.take().map(|active| active.surface)
    }

    pub fn is_open(&self, surface: SurfaceId) -> bool {
        self.active_surface() == Some(surface)
    }

    pub fn active_surface(&self) -> Option<SurfaceId> {
        self.active.as_ref().map(|active| active.surface)
    }

    /// State shown on `surface`, `Hidden` when closed
    pub fn state(&self, surface: SurfaceId) -> &DropdownState {
        static HIDDEN: DropdownState = DropdownState::Hidden;
        match &self.active {
            Some(active) if active.surface == surface => &active.state,
            _ => &HIDDEN,
        }
    }

    /// Rendered rows of an open dropdown
    pub fn entries(&self, surface: SurfaceId) -> &[DropdownEntry] {
        match &self.active {
            Some(active) if active.surface == surface => &active.entries,
            _ => &[],
        }
    }

    pub fn entry(&self, surface: SurfaceId, index: usize) -> Option<&DropdownEntry> {
        self.entries(surface).get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Query, SuggestionResult};

    fn suggestions(titles: &[&str]) -> DropdownState {
        DropdownState::ShowingSuggestions {
            query: Query::new("in"),
            result: SuggestionResult {
                matches: titles.iter().map(|t| t.to_string()).collect(),
                total_match_count: titles.len(),
            },
        }
    }

    #[test]
    fn test_open_second_closes_first() {
        let mut controller = DropdownController::new();
        assert_eq!(controller.open(SurfaceId::Search, suggestions(&["Inception"])), None);

        let closed = controller.open(SurfaceId::Recommendation, suggestions(&["Heat"]));
        assert_eq!(closed, Some(SurfaceId::Search));
        assert!(!controller.is_open(SurfaceId::Search));
        assert!(controller.is_open(SurfaceId::Recommendation));
        assert!(controller.entries(SurfaceId::Search).is_empty());
    }

    #[test]
    fn test_reopen_same_surface_replaces_content() {
        let mut controller = DropdownController::new();
        controller.open(SurfaceId::Search, suggestions(&["Inception"]));
        let closed = controller.open(
            SurfaceId::Search,
            suggestions(&["Interstellar", "Insomnia"]),
        );

        assert_eq!(closed, None);
        assert_eq!(controller.entries(SurfaceId::Search).len(), 2);
    }

    #[test]
    fn test_close_is_noop_when_closed() {
        let mut controller = DropdownController::new();
        assert!(!controller.close(SurfaceId::Search));

        controller.open(SurfaceId::Recommendation, suggestions(&["Heat"]));
        assert!(!controller.close(SurfaceId::Search));
        assert!(controller.is_open(SurfaceId::Recommendation));
        assert!(controller.close(SurfaceId::Recommendation));
        assert_eq!(controller.active_surface(), None);
    }

    #[test]
    fn test_close_all() {
        let mut controller = DropdownController::new();
        assert_eq!(controller.close_all(), None);

        controller.open(SurfaceId::Search, suggestions(&["Inception"]));
        assert_eq!(controller.close_all(), Some(SurfaceId::Search));
        assert_eq!(controller.state(SurfaceId::Search), &DropdownState::Hidden);
    }

    #[test]
    fn test_entry_lookup() {
        let mut controller = DropdownController::new();
        controller.open(SurfaceId::Search, suggestions(&["Inception", "Insomnia"]));

        let label = controller
            .entry(SurfaceId::Search, 1)
            .map(|e| e.label.as_str());
        assert_eq!(label, Some("Insomnia"));
        assert!(controller.entry(SurfaceId::Search, 2).is_none());
        assert!(controller.entry(SurfaceId::Recommendation, 0).is_none());
    }
}
