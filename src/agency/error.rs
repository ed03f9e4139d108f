use std::fmt::Display;

use crate::gtfs::structure::DirectionType;

/// Which label of a route was being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteField {
    ShortName,
    LongName,
    Color,
}

impl Display for RouteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RouteField::ShortName => "short name",
            RouteField::LongName => "long name",
            RouteField::Color => "color",
        };
        write!(f, "{}", name)
    }
}

/// The feed doesn't match the agency tables anymore. Not recoverable, the tables need updating
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableIdentity {
    #[error("Unexpected route ID {route_id}!")]
    RouteId { route_id: String },

    #[error("Unexpected route {field} for route {route_id} (route number {route_number})!")]
    RouteLabel {
        route_id: String,
        route_number: u64,
        field: RouteField,
    },

    #[error("Unexpected stop ID {stop_id}!")]
    StopId { stop_id: String },

    #[error("Stop {stop_id} doesn't start with a known prefix!")]
    StopPrefix { stop_id: String },

    #[error("Stops {stop_id} and {other_stop_id} both resolve to ID {id}!")]
    DuplicateStopId {
        id: u64,
        stop_id: String,
        other_stop_id: String,
    },

    #[error("Trip {trip_id} has no direction!")]
    TripDirection { trip_id: String },

    #[error("Can't merge headsign for trips {trip_id} ({headsign:?}) and {other_trip_id} ({other_headsign:?}) on route {route_id} direction {direction:?}!")]
    HeadsignMerge {
        route_id: u64,
        direction: DirectionType,
        trip_id: String,
        headsign: Option<String>,
        other_trip_id: String,
        other_headsign: Option<String>,
    },
}

pub type IdentityResult<T> = Result<T, UnresolvableIdentity>;
