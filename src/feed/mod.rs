pub mod feeds;
pub mod provider;
pub mod types;

pub use feeds::{FreeNowFeed, ShareNowFeed};
pub use provider::{FeedError, FleetClient, VehicleFeed};
pub use types::{
    Condition, DisplayFields, EngineType, LatLng, PoiCoordinate, Provider, Vehicle,
    VehicleDetails, VehicleId, VehicleState, MISSING_FIELD,
};
