//! Game metadata API access.

/// HTTP client for the RapidAPI game endpoint.
pub mod client;
/// Failure taxonomy for a single fetch.
pub mod error;

use std::future::Future;

pub use client::GameApi;
pub use error::FetchError;

use crate::models::GameDetails;

/// Anything that can resolve a game identifier into [`GameDetails`].
///
/// The page only depends on this seam so it can be driven without a network.
pub trait GameSource: Clone + Send + Sync + 'static {
    /// Fetch details for `id`. Performs exactly one lookup per call.
    fn fetch_game(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<GameDetails, FetchError>> + Send;
}
