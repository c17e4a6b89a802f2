use std::fmt;

use async_trait::async_trait;
use log::info;

use super::feeds::{FreeNowFeed, ShareNowFeed};
use super::types::Vehicle;

/// Errors that can occur while fetching a feed.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum FeedError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Feed returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the feed's envelope. Not retryable.
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "network error: {msg}"),
            FeedError::Api { status, message } => {
                write!(f, "feed error (HTTP {status}): {message}")
            }
            FeedError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// One upstream vehicle feed.
///
/// Implementations own the HTTP call and the raw-to-domain conversion: a
/// successful fetch returns fully normalized [`Vehicle`] values, in the
/// order the feed sent them.
#[async_trait]
pub trait VehicleFeed: Send + Sync {
    /// Returns the name of the feed (used in logs).
    fn name(&self) -> &str;

    /// Fetches and normalizes the feed's current vehicle list.
    async fn fetch(&self) -> Result<Vec<Vehicle>, FeedError>;
}

/// The two hardcoded upstream feeds, fetched together.
pub struct FleetClient {
    share_now: ShareNowFeed,
    free_now: FreeNowFeed,
}

impl FleetClient {
    /// Both feeds live under the same base URL (e.g. `http://localhost:5001`).
    pub fn new(base_url: &str) -> Self {
        Self {
            share_now: ShareNowFeed::new(base_url.to_string()),
            free_now: FreeNowFeed::new(base_url.to_string()),
        }
    }

    /// Fetches both feeds concurrently and merges them into one list:
    /// share-now vehicles first, free-now vehicles appended, each in the
    /// order its feed sent them.
    ///
    /// All-or-nothing: if either feed fails, the whole fetch fails and no
    /// partial merge is returned.
    pub async fn fetch_fleet(&self) -> Result<Vec<Vehicle>, FeedError> {
        let (mut vehicles, poi_vehicles) =
            futures::try_join!(self.share_now.fetch(), self.free_now.fetch())?;

        info!(
            "Merged fleet: {} share-now + {} free-now vehicles",
            vehicles.len(),
            poi_vehicles.len()
        );

        vehicles.extend(poi_vehicles);
        Ok(vehicles)
    }
}
