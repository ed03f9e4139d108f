use serde::{Deserialize, Serialize};

use crate::gtfs::structure::DirectionType;

/// Agency wide values
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalAgency {
    pub color: String,
    pub route_type: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalRoute {
    pub id: u64,
    pub short_name: String,
    pub long_name: String,
    /// Hex, no `#`
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalStop {
    /// Stable across feed versions while the stop's prefix and number don't change
    pub id: u64,
    pub name: String,
}

/// A kept trip, before trips are merged into directions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalTrip {
    pub trip_id: String,
    pub route_id: u64,
    pub direction_id: DirectionType,
    /// Exactly as published
    pub headsign: Option<String>,
}

/// Headsign shown for one direction of a route
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalDirection {
    pub route_id: u64,
    pub direction_id: DirectionType,
    pub headsign: Option<String>,
    /// Source trips collapsed into this direction
    pub trip_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalFeed {
    pub agency: CanonicalAgency,
    pub routes: Vec<CanonicalRoute>,
    pub stops: Vec<CanonicalStop>,
    pub directions: Vec<CanonicalDirection>,
}
