//! free-now feed: taxi-style point-of-interest vehicles.
//!
//! Envelope shape: `{ "poiList": [...] }`. Unlike share-now, coordinates
//! arrive as a `{latitude, longitude}` object and there is no address,
//! engine type, or fuel level.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::feed::provider::{FeedError, VehicleFeed};
use crate::feed::types::{
    Condition, DisplayFields, PoiCoordinate, Vehicle, VehicleDetails, VehicleState,
};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeNowEnvelope {
    /// Raw values so one malformed poi can be skipped without failing the
    /// whole envelope.
    poi_list: Vec<Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeNowRecord {
    id: u64,
    state: VehicleState,
    licence_plate: String,
    condition: Condition,
    coordinate: PoiCoordinate,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts a wire record into the domain model. The only place a free-now
/// vehicle is constructed.
fn to_vehicle(record: FreeNowRecord) -> Vehicle {
    let display = DisplayFields::for_poi(&record.coordinate);
    Vehicle {
        id: record.id,
        state: record.state,
        licence_plate: record.licence_plate,
        condition: record.condition,
        display,
        details: VehicleDetails::FreeNow {
            coordinate: record.coordinate,
        },
    }
}

/// Parses each poi individually, skipping malformed records with a warning.
fn parse_records(raw: Vec<Value>) -> Vec<Vehicle> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<FreeNowRecord>(value) {
            Ok(record) => Some(to_vehicle(record)),
            Err(e) => {
                warn!("Skipping malformed free-now poi: {e}");
                None
            }
        })
        .collect()
}

// ============================================================================
// Feed Implementation
// ============================================================================

pub struct FreeNowFeed {
    base_url: String,
    client: reqwest::Client,
}

impl FreeNowFeed {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VehicleFeed for FreeNowFeed {
    fn name(&self) -> &str {
        "free-now"
    }

    async fn fetch(&self) -> Result<Vec<Vehicle>, FeedError> {
        let response = self
            .client
            .get(format!("{}/free-now/vehicles", self.base_url))
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        debug!("{} response status: {}", self.name(), response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} feed error: {} - {}", self.name(), status, err_body);
            return Err(FeedError::Api {
                status,
                message: err_body,
            });
        }

        let envelope: FreeNowEnvelope = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let vehicles = parse_records(envelope.poi_list);
        info!("{} feed delivered {} vehicles", self.name(), vehicles.len());
        Ok(vehicles)
    }
}
