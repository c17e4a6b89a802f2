//! share-now feed: free-floating car-share vehicles.
//!
//! Envelope shape: `{ "placemarks": [...] }`, one record per parked car.
//! Coordinates arrive as a `[lng, lat, alt]` triple — lng first.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::feed::provider::{FeedError, VehicleFeed};
use crate::feed::types::{
    Condition, DisplayFields, EngineType, Vehicle, VehicleDetails, VehicleState,
};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct ShareNowEnvelope {
    /// Records are held as raw values so one malformed placemark can be
    /// skipped without failing the whole envelope.
    placemarks: Vec<Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ShareNowRecord {
    id: u64,
    state: VehicleState,
    licence_plate: String,
    condition: Condition,
    address: String,
    /// `[lng, lat, alt]` — note the axis order.
    coordinates: [f64; 3],
    engine_type: EngineType,
    #[serde(default)]
    fuel: Option<u8>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts a wire record into the domain model, stamping the provider tag
/// and precomputing the normalized display fields. This is the only place a
/// share-now vehicle is constructed.
fn to_vehicle(record: ShareNowRecord) -> Vehicle {
    let display = DisplayFields::for_share(&record.coordinates, &record.address, record.fuel);
    Vehicle {
        id: record.id,
        state: record.state,
        licence_plate: record.licence_plate,
        condition: record.condition,
        display,
        details: VehicleDetails::ShareNow {
            address: record.address,
            coordinates: record.coordinates,
            engine_type: record.engine_type,
            fuel: record.fuel,
        },
    }
}

/// Parses each placemark individually. A record that fails to deserialize is
/// skipped with a warning; the rest of the batch survives.
fn parse_records(raw: Vec<Value>) -> Vec<Vehicle> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<ShareNowRecord>(value) {
            Ok(record) => Some(to_vehicle(record)),
            Err(e) => {
                warn!("Skipping malformed share-now placemark: {e}");
                None
            }
        })
        .collect()
}

// ============================================================================
// Feed Implementation
// ============================================================================

pub struct ShareNowFeed {
    base_url: String,
    client: reqwest::Client,
}

impl ShareNowFeed {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VehicleFeed for ShareNowFeed {
    fn name(&self) -> &str {
        "share-now"
    }

    async fn fetch(&self) -> Result<Vec<Vehicle>, FeedError> {
        let response = self
            .client
            .get(format!("{}/share-now/vehicles", self.base_url))
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

        let envelope: ShareNowEnvelope = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let vehicles = parse_records(envelope.placemarks);
        info!("{} feed delivered {} vehicles", self.name(), vehicles.len());
        Ok(vehicles)
    }
}
