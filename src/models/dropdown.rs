use super::{PopularSample, Query, SuggestionResult};

/// What a dropdown on one surface currently presents
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Hidden,
    /// Live matches for a searchable query
    ShowingSuggestions {
        query: Query,
        result: SuggestionResult,
    },
    /// Popular sample for an empty input, with the catalog size for the browse entry
    ShowingPopular {
        sample: PopularSample,
        catalog_size: usize,
    },
    /// Searchable query with zero matches
    Empty { query: Query },
}

/// Role of a rendered dropdown row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Suggestion,
    Overflow,
    Popular,
    NoResults,
}

/// What happens when a rendered row is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Write the title into the input and close the dropdown
    Fill(String),
    /// Close the dropdown and open the overflow browser, optionally filtered
    Browse { filter: Option<String> },
    /// Informational row
    Nothing,
}

/// A single row handed to the render sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    pub label: String,
    pub kind: EntryKind,
    pub action: EntryAction,
}

impl DropdownEntry {
    fn fill(title: &str, kind: EntryKind) -> Self {
        Self {
            label: title.to_string(),
            kind,
            action: EntryAction::Fill(title.to_string()),
        }
    }
}

impl DropdownState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, DropdownState::Hidden)
    }

    /// Rows to render, in display order
    pub fn entries(&self) -> Vec<DropdownEntry> {
        match self {
            DropdownState::Hidden => Vec::new(),
            DropdownState::ShowingSuggestions { query, result } => {
                let mut entries = Vec::with_capacity(result.matches.len() + 1);
                if result.overflows() {
                    entries.push(DropdownEntry {
                        label: format!("Show all {} movies", result.total_match_count),
                        kind: EntryKind::Overflow,
                        action: EntryAction::Browse {
                            filter: Some(query.as_str().to_string()),
                        },
                    });
                }
                entries.extend(
                    result
                        .matches
                        .iter()
                        .map(|title| DropdownEntry::fill(title, EntryKind::Suggestion)),
                );
                entries
            }
            DropdownState::ShowingPopular {
                sample,
                catalog_size,
            } => {
                let mut entries = Vec::with_capacity(sample.len() + 1);
                entries.push(DropdownEntry {
                    label: format!("Browse all {} movies", catalog_size),
                    kind: EntryKind::Overflow,
                    action: EntryAction::Browse { filter: None },
                });
                entries.extend(
                    sample
                        .titles
                        .iter()
                        .map(|title| DropdownEntry::fill(title, EntryKind::Popular)),
                );
                entries
            }
            DropdownState::Empty { .. } => vec![DropdownEntry {
                label: "No movies found".to_string(),
                kind: EntryKind::NoResults,
                action: EntryAction::Nothing,
            }],
        }
    }
}
