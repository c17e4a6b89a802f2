//! # Projection Engine
//!
//! Pure derivations of the view list: sort, then paginate.
//!
//! ```text
//! (vehicles, sort_order, current_page, items_per_page)
//!         │
//!         ▼
//!     project()  →  FleetProjection { order, total_pages, page window }
//! ```
//!
//! `project()` does no I/O and never panics — empty input yields empty
//! output. It returns indices into the vehicle list rather than clones, so
//! a projection is cheap to copy around.
//!
//! [`ProjectionCache`] memoizes the result, keyed by the full input tuple
//! (with a fleet generation counter standing in for list identity), so the
//! O(n log n) sort runs once per distinct input instead of once per frame.

use crate::feed::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Direction indicator for the table header.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// A sorted, paginated view of the fleet. Holds indices into the vehicle
/// list it was derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetProjection {
    /// All vehicle indices, sorted by licence plate.
    pub order: Vec<usize>,
    /// `ceil(len / items_per_page)`; 0 for an empty fleet.
    pub total_pages: usize,
    page_start: usize,
    page_end: usize,
}

impl FleetProjection {
    /// The current page's window into `order`.
    pub fn page_indices(&self) -> &[usize] {
        &self.order[self.page_start..self.page_end]
    }

    pub fn page_len(&self) -> usize {
        self.page_end - self.page_start
    }
}

/// Derives the sorted order and page window.
///
/// The sort key is the case-folded licence plate. `sort_by` is stable, so
/// vehicles with equal folded plates keep their relative input order — in
/// both directions, since equal keys compare `Equal` under either
/// comparator.
pub fn project(
    vehicles: &[Vehicle],
    sort_order: SortOrder,
    current_page: usize,
    items_per_page: usize,
) -> FleetProjection {
    let keys: Vec<String> = vehicles
        .iter()
        .map(|v| v.licence_plate.to_lowercase())
        .collect();

    let mut order: Vec<usize> = (0..vehicles.len()).collect();
    order.sort_by(|&a, &b| match sort_order {
        SortOrder::Asc => keys[a].cmp(&keys[b]),
        SortOrder::Desc => keys[b].cmp(&keys[a]),
    });

    let total_pages = if items_per_page == 0 {
        0
    } else {
        order.len().div_ceil(items_per_page)
    };

    // A contiguous window; out-of-range pages yield an empty window rather
    // than panicking (the store guards page bounds, this doesn't rely on it).
    let page_start = current_page
        .saturating_sub(1)
        .saturating_mul(items_per_page)
        .min(order.len());
    let page_end = page_start.saturating_add(items_per_page).min(order.len());

    FleetProjection {
        order,
        total_pages,
        page_start,
        page_end,
    }
}

/// Memoizes [`project`] on its input tuple.
///
/// `generation` must change whenever the vehicle list changes (the store
/// bumps it on every successful load); the other three inputs are compared
/// directly.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    key: Option<(u64, SortOrder, usize, usize)>,
    value: FleetProjection,
}

impl ProjectionCache {
    pub fn get_or_compute(
        &mut self,
        vehicles: &[Vehicle],
        generation: u64,
        sort_order: SortOrder,
        current_page: usize,
        items_per_page: usize,
    ) -> &FleetProjection {
        let key = (generation, sort_order, current_page, items_per_page);
        if self.key != Some(key) {
            self.value = project(vehicles, sort_order, current_page, items_per_page);
            self.key = Some(key);
        }
        &self.value
    }
}
