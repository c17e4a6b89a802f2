use serde::Deserialize;
use std::fmt;

/// Placeholder rendered for fields a provider does not supply (e.g. the
/// address of a taxi point-of-interest record).
pub const MISSING_FIELD: &str = "-";

/// Which upstream feed a vehicle came from.
///
/// Vehicle ids are only unique within a single provider's feed, so this tag
/// is part of the merged set's identity (see [`VehicleId`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    ShareNow,
    FreeNow,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::ShareNow => "SHARE NOW",
            Provider::FreeNow => "FREE NOW",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of a vehicle in the merged fleet.
///
/// A bare `id` would collide if both feeds ever hand out the same number, so
/// selection and lookup key on the (provider, id) pair. Two `VehicleId`
/// values constructed independently compare equal — the map and the table
/// never rely on sharing the same `Vehicle` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId {
    pub provider: Provider,
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleState {
    Active,
    Inactive,
}

impl VehicleState {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleState::Active => "ACTIVE",
            VehicleState::Inactive => "INACTIVE",
        }
    }
}

/// Reported vehicle condition. Earlier feed revisions only knew GOOD and BAD;
/// EXCELLENT appears in current share-now payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    Bad,
    Good,
    Excellent,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Bad => "BAD",
            Condition::Good => "GOOD",
            Condition::Excellent => "EXCELLENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EngineType {
    Petrol,
    Electric,
    Diesel,
}

impl EngineType {
    pub fn label(&self) -> &'static str {
        match self {
            EngineType::Petrol => "PETROL",
            EngineType::Electric => "ELECTRIC",
            EngineType::Diesel => "DIESEL",
        }
    }
}

/// Uniform coordinate pair, regardless of which feed the vehicle came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Coordinate object as the free-now feed ships it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PoiCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Display-ready fields, computed once at ingestion.
///
/// The two feeds disagree on coordinate axis order (share-now sends a
/// `[lng, lat, alt]` triple, free-now a `{latitude, longitude}` object), so
/// any axis mix-up is fixed in exactly one place: the `for_share` /
/// `for_poi` constructors below. The map and the table read only these
/// fields and never touch the raw coordinates again.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    /// Normalized position, `{lat, lng}` for both variants.
    pub position: LatLng,
    /// Human-readable "lng, lat" string for the table.
    pub coordinates: String,
    /// Street address, or "-" when the feed has none.
    pub address: String,
    /// Fuel percentage, `None` when the feed has none.
    pub fuel: Option<u8>,
}

impl DisplayFields {
    /// Normalizes a share-now record's `[lng, lat, alt]` triple.
    pub fn for_share(coordinates: &[f64; 3], address: &str, fuel: Option<u8>) -> Self {
        Self {
            position: LatLng {
                lat: coordinates[1],
                lng: coordinates[0],
            },
            coordinates: format!("{}, {}", coordinates[0], coordinates[1]),
            address: address.to_string(),
            fuel,
        }
    }

    /// Normalizes a free-now record's `{latitude, longitude}` object.
    pub fn for_poi(coordinate: &PoiCoordinate) -> Self {
        Self {
            position: LatLng {
                lat: coordinate.latitude,
                lng: coordinate.longitude,
            },
            coordinates: format!("{}, {}", coordinate.longitude, coordinate.latitude),
            address: MISSING_FIELD.to_string(),
            fuel: None,
        }
    }
}

/// Provider-specific vehicle data. The variant IS the provider tag —
/// downstream code pattern-matches this enum and never re-discriminates on
/// field presence.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleDetails {
    ShareNow {
        address: String,
        /// Raw `[lng, lat, alt]` triple, exactly as received.
        coordinates: [f64; 3],
        engine_type: EngineType,
        fuel: Option<u8>,
    },
    FreeNow {
        coordinate: PoiCoordinate,
    },
}

/// A vehicle in the merged fleet.
///
/// Invariant: every constructed `Vehicle` carries both its native
/// provider-specific fields (`details`) and the normalized display fields
/// (`display`). Consumers read `display`; `details` exists so nothing from
/// the feed is thrown away.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: u64,
    pub state: VehicleState,
    pub licence_plate: String,
    pub condition: Condition,
    pub display: DisplayFields,
    pub details: VehicleDetails,
}

impl Vehicle {
    pub fn provider(&self) -> Provider {
        match self.details {
            VehicleDetails::ShareNow { .. } => Provider::ShareNow,
            VehicleDetails::FreeNow { .. } => Provider::FreeNow,
        }
    }

    /// Composite identity used for selection and lookup across views.
    pub fn key(&self) -> VehicleId {
        VehicleId {
            provider: self.provider(),
            id: self.id,
        }
    }

    /// Label for the table's "Type" column: the engine type where the feed
    /// reports one, "-" otherwise.
    pub fn type_label(&self) -> &'static str {
        match &self.details {
            VehicleDetails::ShareNow { engine_type, .. } => engine_type.label(),
            VehicleDetails::FreeNow { .. } => MISSING_FIELD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_normalization_swaps_axis_order() {
        // share-now triples are [lng, lat, alt]
        let display = DisplayFields::for_share(&[9.86335, 53.59301, 0.0], "Lesserstraße 170", Some(42));
        assert_eq!(display.position.lat, 53.59301);
        assert_eq!(display.position.lng, 9.86335);
        assert_eq!(display.coordinates, "9.86335, 53.59301");
        assert_eq!(display.address, "Lesserstraße 170");
        assert_eq!(display.fuel, Some(42));
    }

    #[test]
    fn test_poi_normalization_keeps_axis_order() {
        let display = DisplayFields::for_poi(&PoiCoordinate {
            latitude: 53.5511,
            longitude: 9.9937,
        });
        assert_eq!(display.position.lat, 53.5511);
        assert_eq!(display.position.lng, 9.9937);
        // still rendered lng-first, matching the share variant
        assert_eq!(display.coordinates, "9.9937, 53.5511");
    }

    #[test]
    fn test_poi_normalization_fills_placeholders() {
        let display = DisplayFields::for_poi(&PoiCoordinate {
            latitude: 53.0,
            longitude: 10.0,
        });
        assert_eq!(display.address, MISSING_FIELD);
        assert_eq!(display.fuel, None);
    }

    #[test]
    fn test_vehicle_ids_compare_by_value() {
        // Independently constructed ids for the same logical vehicle are equal
        let a = VehicleId { provider: Provider::FreeNow, id: 7 };
        let b = VehicleId { provider: Provider::FreeNow, id: 7 };
        assert_eq!(a, b);

        // Same numeric id from the other feed is a different vehicle
        let c = VehicleId { provider: Provider::ShareNow, id: 7 };
        assert_ne!(a, c);
    }
}
