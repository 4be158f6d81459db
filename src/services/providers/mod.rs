/// Catalog data source abstraction
///
/// The pipeline needs exactly one operation from the outside world: a user's
/// normalized watch history. Keeping it behind a trait lets tests drive the
/// pipeline with canned records and leaves room for other list services with
/// the same shape.
use crate::{error::AppResult, models::WatchedTitle};

#[cfg(test)]
use mockall::automock;

pub mod anilist;

pub use anilist::AniListProvider;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch and normalize the watch history for one user.
    ///
    /// Returns the filtered `WatchedTitle` list in source order. An error
    /// payload from the source maps to `AppError::UserNotFound`; transport
    /// failures surface as `AppError::Transport`. An empty list is a valid
    /// outcome, not an error.
    async fn fetch_watch_history(&self, username: &str) -> AppResult<Vec<WatchedTitle>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
