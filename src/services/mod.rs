pub mod catalog;
pub mod dropdown;
pub mod movie_api;
pub mod overflow;
pub mod suggestions;
pub mod title_index;

pub use catalog::{CatalogSource, LocalCatalog, RemoteCatalog};
pub use dropdown::DropdownController;
pub use movie_api::{HttpMovieApi, MovieApi};
pub use overflow::{OverflowBrowser, OverflowView};
pub use suggestions::{EvaluationToken, PendingEvaluation, SuggestionEngine};
pub use title_index::TitleIndex;
