//! Stable numeric ids for routes and stops. Real-time vehicle APIs key on these ids so
//! the mapping has no fallbacks: anything the tables don't cover is an error.

use super::config::AgencyConfig;
use super::error::{IdentityResult, UnresolvableIdentity};
use crate::gtfs::structure::{SourceRoute, SourceStop};
use crate::gtfs::utils::{first_digit_run, is_digits_only};

/// Route number embedded in a route id, e.g. `"1-350"` is route 1
pub fn route_number(route_id: &str) -> IdentityResult<u64> {
    first_digit_run(route_id)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| UnresolvableIdentity::RouteId {
            route_id: route_id.to_string(),
        })
}

pub fn route_id(route: &SourceRoute) -> IdentityResult<u64> {
    route_number(&route.route_id)
}

/// Stop code first, then the stop id's prefix band
pub fn stop_id(config: &AgencyConfig, stop: &SourceStop) -> IdentityResult<u64> {
    if let Some(code) = stop.stop_code.as_deref().map(str::trim) {
        if is_digits_only(code) {
            // using stop code as stop ID
            return code.parse().map_err(|_| UnresolvableIdentity::StopId {
                stop_id: stop.stop_id.clone(),
            });
        }
    }

    let digits: u64 = first_digit_run(&stop.stop_id)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| UnresolvableIdentity::StopId {
            stop_id: stop.stop_id.clone(),
        })?;

    let band = config
        .stop_prefix_bands()
        .iter()
        .find(|band| band.matches(&stop.stop_id))
        .ok_or_else(|| UnresolvableIdentity::StopPrefix {
            stop_id: stop.stop_id.clone(),
        })?;

    band.base
        .checked_add(digits)
        .ok_or_else(|| UnresolvableIdentity::StopId {
            stop_id: stop.stop_id.clone(),
        })
}
