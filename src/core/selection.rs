//! # Selection
//!
//! Single source of truth for "which vehicle is highlighted".
//!
//! The map and the table each build their own row/marker values for what is
//! logically the same vehicle, so highlighting can never rely on comparing
//! references or positions. Both views ask the same question of the same
//! `Selection` — `is_selected(candidate.key())` — which compares the
//! composite (provider, id) key by value.
//!
//! There are exactly two operations: select a vehicle, or select nothing.
//! No multi-select.

use crate::feed::VehicleId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection(Option<VehicleId>);

impl Selection {
    /// Replaces the selection unconditionally. `None` clears highlighting
    /// in both views.
    pub fn select(&mut self, id: Option<VehicleId>) {
        self.0 = id;
    }

    pub fn get(&self) -> Option<VehicleId> {
        self.0
    }

    /// The one comparison every view derives its highlight from.
    pub fn is_selected(&self, candidate: VehicleId) -> bool {
        self.0 == Some(candidate)
    }
}
