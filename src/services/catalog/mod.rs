/// Title catalog sources
///
/// The suggestion engine needs the full list of known titles up front. Sources are
/// tried in order by `TitleIndex::load`: the bundled listing first, then the API.
use crate::error::AppResult;

pub mod local;
pub mod remote;

pub use local::LocalCatalog;
pub use remote::RemoteCatalog;

/// Trait for anything that can produce the ordered list of catalog titles
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads every title, in catalog order
    ///
    /// An empty list is a valid answer here; the caller decides whether to fall back.
    async fn load_titles(&self) -> AppResult<Vec<String>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
