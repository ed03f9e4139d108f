pub mod cleaner;
pub mod config;
pub mod error;
pub mod labels;
pub mod resolver;

use crate::canonical::{CanonicalRoute, CanonicalStop, CanonicalTrip};
use crate::gtfs::structure::{SourceRoute, SourceStop, SourceTrip};
use cleaner::StopNameCleaner;
use config::AgencyConfig;
use error::{IdentityResult, UnresolvableIdentity};

/// Resolves ids and labels for one agency. Built once per run, read only afterwards
pub struct AgencyTools {
    config: AgencyConfig,
    stop_name_cleaner: StopNameCleaner,
}

impl AgencyTools {
    pub fn new(config: AgencyConfig) -> Self {
        let stop_name_cleaner = StopNameCleaner::new(&config);
        Self {
            config,
            stop_name_cleaner,
        }
    }

    pub fn config(&self) -> &AgencyConfig {
        &self.config
    }

    pub fn route(&self, route: &SourceRoute) -> IdentityResult<CanonicalRoute> {
        Ok(CanonicalRoute {
            id: resolver::route_id(route)?,
            short_name: labels::route_short_name(&self.config, route)?,
            long_name: labels::route_long_name(&self.config, route)?,
            color: labels::route_color(&self.config, route)?,
        })
    }

    pub fn stop(&self, stop: &SourceStop) -> IdentityResult<CanonicalStop> {
        Ok(CanonicalStop {
            id: resolver::stop_id(&self.config, stop)?,
            name: self.clean_stop_name(&stop.stop_name),
        })
    }

    pub fn trip(&self, trip: &SourceTrip) -> IdentityResult<CanonicalTrip> {
        let direction_id = trip
            .direction_id
            .ok_or_else(|| UnresolvableIdentity::TripDirection {
                trip_id: trip.trip_id.clone(),
            })?;

        Ok(CanonicalTrip {
            trip_id: trip.trip_id.clone(),
            route_id: resolver::route_number(&trip.route_id)?,
            direction_id,
            headsign: trip
                .trip_headsign
                .as_deref()
                .map(|headsign| labels::clean_trip_headsign(headsign).to_string()),
        })
    }

    pub fn clean_stop_name(&self, name: &str) -> String {
        self.stop_name_cleaner.clean(name)
    }
}

impl Default for AgencyTools {
    fn default() -> Self {
        Self::new(AgencyConfig::oc_transpo_train())
    }
}
