use crate::services::title_index::TitleIndex;

/// Snapshot of the overflow browser handed to the render sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowView {
    pub heading: String,
    /// Titles in scope when the browser opened
    pub total: usize,
    /// Titles still visible after the in-list filter
    pub entries: Vec<String>,
}

#[derive(Debug)]
struct Listing {
    scope: Option<String>,
    titles: Vec<String>,
    filter: String,
}

impl Listing {
    fn visible(&self) -> impl Iterator<Item = &String> {
        let needle = self.filter.to_lowercase();
        self.titles
            .iter()
            .filter(move |title| title.to_lowercase().contains(&needle))
    }

    fn view(&self) -> OverflowView {
        let heading = match &self.scope {
            Some(query) => format!("Movies matching \"{}\"", query),
            None => "All Movies".to_string(),
        };
        OverflowView {
            heading,
            total: self.titles.len(),
            entries: self.visible().cloned().collect(),
        }
    }
}

/// Full-catalog browse modal
///
/// Shown when a query matches more titles than the dropdown holds, or from the
/// "browse all" row. Filtering inside the browser is synchronous and uncapped.
#[derive(Debug, Default)]
pub struct OverflowBrowser {
    listing: Option<Listing>,
    scroll_locked: bool,
}

impl OverflowBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens on the whole index, or only the titles matching `filter_query`
    pub fn open(&mut self, index: &TitleIndex, filter_query: Option<&str>) -> OverflowView {
        let scope = filter_query.filter(|q| !q.is_empty()).map(str::to_string);
        let titles = match &scope {
            Some(query) => index.matching(query).map(str::to_string).collect(),
            None => index.titles().to_vec(),
        };

        tracing::debug!(scope = ?scope, titles = titles.len(), "Opened overflow browser");

        let listing = Listing {
            scope,
            titles,
            filter: String::new(),
        };
        let view = listing.view();
        self.listing = Some(listing);
        self.scroll_locked = true;
        view
    }

    /// Re-filters the open listing; `None` when the browser is closed
    pub fn refilter(&mut self, value: &str) -> Option<OverflowView> {
        let listing = self.listing.as_mut()?;
        listing.filter = value.to_string();
        Some(listing.view())
    }

    /// Picks the visible entry at `index` and closes the browser
    pub fn choose(&mut self, index: usize) -> Option<String> {
        let title = self.listing.as_ref()?.visible().nth(index)?.clone();
        self.close();
        Some(title)
    }

    /// Closes the browser and restores page scrolling; returns whether it was open
    pub fn close(&mut self) -> bool {
        self.scroll_locked = false;
        self.listing.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.listing.is_some()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn view(&self) -> Option<OverflowView> {
        self.listing.as_ref().map(Listing::view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TitleIndex {
        TitleIndex::new(
            ["The Matrix", "Heat", "The Thing", "Alien", "The Godfather"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_open_unfiltered_lists_everything() {
        let mut browser = OverflowBrowser::new();
        let view = browser.open(&index(), None);

        assert_eq!(view.heading, "All Movies");
        assert_eq!(view.total, 5);
        assert_eq!(view.entries.len(), 5);
        assert!(browser.is_open());
        assert!(browser.scroll_locked());
    }

    #[test]
    fn test_open_scoped_to_query() {
        let mut browser = OverflowBrowser::new();
        let view = browser.open(&index(), Some("the"));

        assert_eq!(view.heading, "Movies matching \"the\"");
        assert_eq!(view.entries, vec!["The Matrix", "The Thing", "The Godfather"]);
    }

    #[test]
    fn test_refilter_is_uncapped_and_case_insensitive() {
        let mut browser = OverflowBrowser::new();
        browser.open(&index(), Some("the"));

        let view = browser.refilter("GOD").unwrap();
        assert_eq!(view.entries, vec!["The Godfather"]);
        assert_eq!(view.total, 3);

        let view = browser.refilter("").unwrap();
        assert_eq!(view.entries.len(), 3);
    }

    #[test]
    fn test_refilter_when_closed() {
        let mut browser = OverflowBrowser::new();
        assert!(browser.refilter("the").is_none());
    }

    #[test]
    fn test_choose_uses_visible_position_and_closes() {
        let mut browser = OverflowBrowser::new();
        browser.open(&index(), None);
        browser.refilter("th");

        assert_eq!(browser.choose(1), Some("The Thing".to_string()));
        assert!(!browser.is_open());
        assert!(!browser.scroll_locked());
    }

    #[test]
    fn test_choose_out_of_range_keeps_browser_open() {
        let mut browser = OverflowBrowser::new();
        browser.open(&index(), Some("alien"));
        assert_eq!(browser.choose(3), None);
        assert!(browser.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut browser = OverflowBrowser::new();
        browser.open(&index(), None);

        assert!(browser.close());
        assert!(!browser.close());
        assert!(!browser.scroll_locked());
        assert!(browser.view().is_none());
    }
}
