use std::collections::HashMap;
use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    models::{DropdownState, Query, QueryRegime, SurfaceId},
    services::title_index::TitleIndex,
};

/// Identifies one scheduled evaluation for a surface
///
/// Each keystroke issues a fresh token; only the newest token of a surface is honoured
/// when its debounce timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluationToken(u64);

/// An evaluation waiting for its debounce window to elapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEvaluation {
    pub surface: SurfaceId,
    pub token: EvaluationToken,
}

#[derive(Debug, Default)]
struct SurfaceInput {
    value: String,
    generation: u64,
    pending: Option<EvaluationToken>,
}

/// Turns input events on each surface into dropdown states
///
/// Holds the last known input value per surface and the debounce bookkeeping. Surfaces
/// share the read-only index but nothing else.
pub struct SuggestionEngine {
    index: Option<Arc<TitleIndex>>,
    curated: Vec<String>,
    surfaces: HashMap<SurfaceId, SurfaceInput>,
    rng: StdRng,
}

impl SuggestionEngine {
    pub fn new(curated: Vec<String>) -> Self {
        Self::with_rng(curated, StdRng::from_entropy())
    }

    pub fn with_rng(curated: Vec<String>, rng: StdRng) -> Self {
        Self {
            index: None,
            curated,
            surfaces: HashMap::new(),
            rng,
        }
    }

    /// Makes suggestions available once the catalog has loaded
    pub fn attach_index(&mut self, index: Arc<TitleIndex>) {
        self.index = Some(index);
    }

    pub fn index(&self) -> Option<&Arc<TitleIndex>> {
        self.index.as_ref()
    }

    /// Raw value last seen on a surface
    pub fn value(&self, surface: SurfaceId) -> &str {
        self.surfaces
            .get(&surface)
            .map(|input| input.value.as_str())
            .unwrap_or("")
    }

    /// Records a keystroke and supersedes any evaluation still waiting on this surface
    pub fn keystroke(&mut self, surface: SurfaceId, value: &str) -> PendingEvaluation {
        let input = self.surfaces.entry(surface).or_default();
        input.value = value.to_string();
        input.generation += 1;
        let token = EvaluationToken(input.generation);

        if let Some(previous) = input.pending.replace(token) {
            tracing::debug!(surface = %surface, superseded = previous.0, "Evaluation superseded");
        }

        PendingEvaluation { surface, token }
    }

    /// Runs the evaluation for `token` if it is still the newest on the surface
    ///
    /// Returns `None` for superseded or cancelled tokens: nothing must be rendered.
    pub fn debounce_elapsed(
        &mut self,
        surface: SurfaceId,
        token: EvaluationToken,
    ) -> Option<DropdownState> {
        let input = self.surfaces.get_mut(&surface)?;
        if input.pending != Some(token) {
            tracing::debug!(surface = %surface, token = token.0, "Dropping stale evaluation");
            return None;
        }
        input.pending = None;

        let query = Query::new(&input.value);
        Some(self.evaluate(&query))
    }

    /// Immediate evaluation of the current value when the input gains focus
    ///
    /// Short queries leave the dropdown as it is.
    pub fn focus(&mut self, surface: SurfaceId) -> Option<DropdownState> {
        let query = Query::new(self.value(surface));
        match query.regime() {
            QueryRegime::Short => None,
            _ => Some(self.evaluate(&query)),
        }
    }

    /// Clicking an empty input re-opens the popular sample
    pub fn click(&mut self, surface: SurfaceId) -> Option<DropdownState> {
        let query = Query::new(self.value(surface));
        match query.regime() {
            QueryRegime::Empty => Some(self.evaluate(&query)),
            _ => None,
        }
    }

    /// Writes a value chosen from a list into the surface without searching
    pub fn set_value(&mut self, surface: SurfaceId, value: &str) {
        let input = self.surfaces.entry(surface).or_default();
        input.value = value.to_string();
        input.pending = None;
    }

    /// Drops whatever evaluation is waiting on the surface
    pub fn cancel_pending(&mut self, surface: SurfaceId) {
        if let Some(input) = self.surfaces.get_mut(&surface) {
            input.pending = None;
        }
    }

    pub fn has_pending(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(&surface)
            .is_some_and(|input| input.pending.is_some())
    }

    fn evaluate(&mut self, query: &Query) -> DropdownState {
        let Some(index) = self.index.as_ref() else {
            // Catalog unavailable: the feature stays degraded
            return DropdownState::Hidden;
        };

        match query.regime() {
            QueryRegime::Empty => {
                if index.is_empty() {
                    return DropdownState::Hidden;
                }
                DropdownState::ShowingPopular {
                    sample: index.sample(&self.curated, &mut self.rng),
                    catalog_size: index.len(),
                }
            }
            QueryRegime::Short => DropdownState::Hidden,
            QueryRegime::Searchable => {
                let result = index.search(query.as_str());
                tracing::debug!(
                    query = %query,
                    shown = result.matches.len(),
                    total = result.total_match_count,
                    "Evaluated suggestions"
                );
                if result.total_match_count == 0 {
                    DropdownState::Empty {
                        query: query.clone(),
                    }
                } else {
                    DropdownState::ShowingSuggestions {
                        query: query.clone(),
                        result,
                    }
                }
            }
        }
    }
}
