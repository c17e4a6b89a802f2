//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;
use crate::feed::{
    Condition, DisplayFields, EngineType, PoiCoordinate, Vehicle, VehicleDetails, VehicleState,
};

/// A share-now vehicle parked near the Hamburg city center.
pub fn share_vehicle(id: u64, plate: &str) -> Vehicle {
    let coordinates = [9.9937, 53.5511, 0.0];
    let address = "Jungfernstieg 1, 20095 Hamburg";
    Vehicle {
        id,
        state: VehicleState::Active,
        licence_plate: plate.to_string(),
        condition: Condition::Good,
        display: DisplayFields::for_share(&coordinates, address, Some(55)),
        details: VehicleDetails::ShareNow {
            address: address.to_string(),
            coordinates,
            engine_type: EngineType::Petrol,
            fuel: Some(55),
        },
    }
}

/// A free-now taxi south of the Elbe.
pub fn poi_vehicle(id: u64, plate: &str) -> Vehicle {
    let coordinate = PoiCoordinate {
        latitude: 53.4604,
        longitude: 9.9097,
    };
    Vehicle {
        id,
        state: VehicleState::Active,
        licence_plate: plate.to_string(),
        condition: Condition::Good,
        display: DisplayFields::for_poi(&coordinate),
        details: VehicleDetails::FreeNow { coordinate },
    }
}

/// Creates a fresh App with the default page size.
pub fn test_app() -> App {
    App::new(20)
}
