use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use derive_builder::Builder;
use itertools::Itertools;

use crate::agency::error::{IdentityResult, UnresolvableIdentity};
use crate::agency::{labels, AgencyTools};
use crate::canonical::{CanonicalAgency, CanonicalDirection, CanonicalFeed, CanonicalStop};
use crate::error::{ParserError, ParserResult};
use crate::export::Exporter;
use crate::gtfs::reader::{read_feed, SourceFeed};
use crate::service::{ServiceFilter, ServiceIdSet, DEFAULT_WINDOW_DAYS};

/// One run of the adapter, from the feed on disk to the exported files
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RunOptions {
    /// Directory or zip
    pub feed: PathBuf,
    #[builder(default = "PathBuf::from(\"output\")")]
    pub output_dir: PathBuf,
    #[builder(default)]
    pub file_prefix: String,
    /// Today in the agency timezone if not set
    #[builder(default)]
    pub start_date: Option<NaiveDate>,
    #[builder(default = "DEFAULT_WINDOW_DAYS")]
    pub days: u32,
    /// Keep every trip, whatever the date
    #[builder(default)]
    pub all_services: bool,
}

pub fn agency_timezone(feed: &SourceFeed) -> ParserResult<Tz> {
    let agency = feed
        .agencies
        .first()
        .ok_or_else(|| ParserError::DataFormat("No agency in agency.txt".to_string()))?;

    agency.agency_timezone.parse::<Tz>().map_err(|e| {
        ParserError::DataFormat(format!(
            "Invalid timezone {:?} for agency {}: {}",
            agency.agency_timezone, agency, e
        ))
    })
}

pub fn today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

pub fn service_filter(feed: &SourceFeed, options: &RunOptions) -> ParserResult<ServiceFilter> {
    if options.all_services {
        log::info!("Keeping all services");
        return Ok(ServiceFilter::all());
    }

    let start = match options.start_date {
        Some(start) => start,
        None => today(agency_timezone(feed)?),
    };
    let service_ids =
        ServiceIdSet::compute(&feed.calendars, &feed.calendar_dates, start, options.days);
    log::info!(
        "{} services run in the {} days from {}",
        service_ids.len(),
        options.days,
        start
    );

    Ok(ServiceFilter::new(service_ids))
}

fn logged<S: Display, T>(record: &S, resolved: IdentityResult<T>) -> IdentityResult<T> {
    if let Err(e) = &resolved {
        log::debug!("Can't resolve {}: {}", record, e);
    }
    resolved
}

/// Stops can only share an id if they are the same source stop
fn check_unique_stops(stops: Vec<(String, CanonicalStop)>) -> IdentityResult<Vec<CanonicalStop>> {
    let mut seen: HashMap<u64, String> = HashMap::new();
    let mut unique = Vec::with_capacity(stops.len());

    for (stop_id, stop) in stops {
        match seen.get(&stop.id) {
            Some(other_stop_id) if *other_stop_id == stop_id => continue,
            Some(other_stop_id) => {
                return Err(UnresolvableIdentity::DuplicateStopId {
                    id: stop.id,
                    stop_id,
                    other_stop_id: other_stop_id.clone(),
                })
            }
            None => {
                seen.insert(stop.id, stop_id);
                unique.push(stop);
            }
        }
    }

    Ok(unique)
}

/// Resolves the whole feed. The first record that can't be resolved stops the run
pub fn build_dataset(
    feed: &SourceFeed,
    tools: &AgencyTools,
    filter: &ServiceFilter,
) -> IdentityResult<CanonicalFeed> {
    let agency = CanonicalAgency {
        color: tools.config().agency_color.to_string(),
        route_type: tools.config().route_type,
    };

    if filter.excluding_all() {
        log::warn!("No service runs in the window, exporting an empty dataset");
        return Ok(CanonicalFeed {
            agency,
            routes: vec![],
            stops: vec![],
            directions: vec![],
        });
    }

    let route_type = tools.config().route_type;
    let agency_routes = feed
        .routes
        .iter()
        .filter(|route| route.route_type == Some(route_type))
        .collect_vec();
    let agency_route_ids = agency_routes
        .iter()
        .map(|route| route.route_id.as_str())
        .collect::<HashSet<_>>();

    let calendars = feed
        .calendars
        .iter()
        .filter(|calendar| !filter.exclude_calendar(calendar))
        .count();
    let calendar_dates = feed
        .calendar_dates
        .iter()
        .filter(|calendar_date| !filter.exclude_calendar_date(calendar_date))
        .count();
    let trips = feed
        .trips
        .iter()
        .filter(|trip| agency_route_ids.contains(trip.route_id.as_str()))
        .filter(|trip| !filter.exclude_trip(trip))
        .collect_vec();
    log::info!(
        "Keeping {}/{} routes of type {}, {}/{} calendars, {}/{} calendar dates, {}/{} trips",
        agency_routes.len(),
        feed.routes.len(),
        route_type,
        calendars,
        feed.calendars.len(),
        calendar_dates,
        feed.calendar_dates.len(),
        trips.len(),
        feed.trips.len()
    );

    // only what kept trips use is exported
    let used_route_ids = trips
        .iter()
        .map(|trip| trip.route_id.as_str())
        .collect::<HashSet<_>>();
    let kept_trip_ids = trips
        .iter()
        .map(|trip| trip.trip_id.as_str())
        .collect::<HashSet<_>>();
    let used_stop_ids = feed
        .stop_times
        .iter()
        .filter(|stop_time| kept_trip_ids.contains(stop_time.trip_id.as_str()))
        .map(|stop_time| stop_time.stop_id.as_str())
        .collect::<HashSet<_>>();

    let routes = agency_routes
        .into_iter()
        .filter(|route| used_route_ids.contains(route.route_id.as_str()))
        .map(|route| logged(route, tools.route(route)))
        .collect::<IdentityResult<Vec<_>>>()?;

    let stops = feed
        .stops
        .iter()
        .filter(|stop| used_stop_ids.contains(stop.stop_id.as_str()))
        .map(|stop| {
            logged(stop, tools.stop(stop)).map(|canonical| (stop.stop_id.clone(), canonical))
        })
        .collect::<IdentityResult<Vec<_>>>()?;
    let stops = check_unique_stops(stops)?;

    let trips = trips
        .into_iter()
        .map(|trip| logged(trip, tools.trip(trip)))
        .collect::<IdentityResult<Vec<_>>>()?
        .into_iter()
        .sorted_by(|a, b| {
            (a.route_id, a.direction_id, &a.trip_id).cmp(&(b.route_id, b.direction_id, &b.trip_id))
        })
        .collect_vec();

    let mut directions = vec![];
    let by_direction = trips.iter().group_by(|trip| (trip.route_id, trip.direction_id));
    for ((route_id, direction_id), mut group) in &by_direction {
        // groups are never empty
        let Some(first) = group.next() else {
            continue;
        };
        let mut trip_ids = vec![first.trip_id.clone()];
        for trip in group {
            labels::merge_headsign(first, trip)?;
            trip_ids.push(trip.trip_id.clone());
        }

        directions.push(CanonicalDirection {
            route_id,
            direction_id,
            headsign: first.headsign.clone(),
            trip_ids,
        });
    }

    Ok(CanonicalFeed {
        agency,
        routes,
        stops,
        directions,
    })
}

pub fn generate(options: &RunOptions) -> ParserResult<CanonicalFeed> {
    let start = Instant::now();
    log::info!("Generating OC Transpo train data...");

    let feed = read_feed(&options.feed)?;
    let filter = service_filter(&feed, options)?;
    let tools = AgencyTools::default();
    let dataset = build_dataset(&feed, &tools, &filter)?;

    // only reached once everything resolved, a failed run leaves no files behind
    Exporter::new(&options.output_dir, options.file_prefix.as_str()).export(&dataset)?;

    log::info!(
        "Generating OC Transpo train data... DONE in {:?}",
        start.elapsed()
    );
    Ok(dataset)
}
