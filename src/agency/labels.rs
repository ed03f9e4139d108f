//! Display labels. Values present in the feed are never rewritten, consumers match on them
//! verbatim; the tables only fill in blanks.

use super::config::{AgencyConfig, RouteLabel};
use super::error::{IdentityResult, RouteField, UnresolvableIdentity};
use super::resolver::route_id;
use crate::canonical::CanonicalTrip;
use crate::gtfs::structure::SourceRoute;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn from_table(
    config: &AgencyConfig,
    route: &SourceRoute,
    field: RouteField,
    pick: impl Fn(&RouteLabel) -> Option<&'static str>,
) -> IdentityResult<String> {
    let route_number = route_id(route)?;
    config
        .route_label(route_number)
        .and_then(pick)
        .map(str::to_string)
        .ok_or_else(|| UnresolvableIdentity::RouteLabel {
            route_id: route.route_id.clone(),
            route_number,
            field,
        })
}

pub fn route_short_name(config: &AgencyConfig, route: &SourceRoute) -> IdentityResult<String> {
    match non_empty(&route.route_short_name) {
        Some(name) => Ok(name.to_string()),
        None => from_table(config, route, RouteField::ShortName, |l| l.short_name),
    }
}

pub fn route_long_name(config: &AgencyConfig, route: &SourceRoute) -> IdentityResult<String> {
    match non_empty(&route.route_long_name) {
        Some(name) => Ok(name.to_string()),
        None => from_table(config, route, RouteField::LongName, |l| l.long_name),
    }
}

pub fn route_color(config: &AgencyConfig, route: &SourceRoute) -> IdentityResult<String> {
    match non_empty(&route.route_color) {
        Some(color) => Ok(color.to_string()),
        None => from_table(config, route, RouteField::Color, |l| l.color),
    }
}

/// Headsigns identify trips in the real-time API, so they are kept exactly as published
pub fn clean_trip_headsign(headsign: &str) -> &str {
    headsign
}

/// Two trips of the same route and direction can only share a direction label if their
/// headsigns are the same. Merging different destinations would break real-time matching.
pub fn merge_headsign(trip: &CanonicalTrip, to_merge: &CanonicalTrip) -> IdentityResult<()> {
    match (&trip.headsign, &to_merge.headsign) {
        (Some(headsign), Some(other)) if headsign == other => Ok(()),
        _ => Err(UnresolvableIdentity::HeadsignMerge {
            route_id: trip.route_id,
            direction: trip.direction_id,
            trip_id: trip.trip_id.clone(),
            headsign: trip.headsign.clone(),
            other_trip_id: to_merge.trip_id.clone(),
            other_headsign: to_merge.headsign.clone(),
        }),
    }
}
