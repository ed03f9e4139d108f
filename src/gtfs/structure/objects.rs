use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use super::serde_helpers::*;

/// Direction of travel of a trip. See <https://gtfs.org/reference/static/#tripstxt>
#[derive(Debug, Serialize_repr, Deserialize_repr, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DirectionType {
    /// Travel in one direction (e.g. outbound travel)
    Outbound = 0,
    /// Travel in the opposite direction (e.g. inbound travel)
    Inbound = 1,
}

/// Whether a service is added or removed on a [SourceCalendarDate::date]
#[derive(Debug, Serialize_repr, Deserialize_repr, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exception {
    /// There is a new service on that day
    Added = 1,
    /// There is no service on that day
    Deleted = 2,
}

/// General informations about the agency running the network. See <https://gtfs.org/reference/static/#agencytxt>
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SourceAgency {
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub agency_id: Option<String>,
    pub agency_name: String,
    /// Timezone where the transit agency is located
    pub agency_timezone: String,
}

impl fmt::Display for SourceAgency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.agency_name)
    }
}

/// A route as found in routes.txt. Every descriptive field may be blank
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourceRoute {
    /// Agency identifier, embeds the route number (e.g. `1-350`)
    pub route_id: String,
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub route_short_name: Option<String>,
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub route_long_name: Option<String>,
    /// Hex colour without `#`, kept verbatim
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub route_color: Option<String>,
    /// GTFS mode, `2` for rail. Only the agency's own mode is kept
    #[serde(default)]
    pub route_type: Option<u16>,
}

impl fmt::Display for SourceRoute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route {} (short name: {:?}, long name: {:?}, color: {:?})",
            self.route_id, self.route_short_name, self.route_long_name, self.route_color
        )
    }
}

/// A physical stop, station or area. See <https://gtfs.org/reference/static/#stopstxt>
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourceStop {
    /// Unique technical identifier (not for the traveller) of the stop, e.g. `WA1234`
    pub stop_id: String,
    /// Short text or a number that identifies the location for riders
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub stop_code: Option<String>,
    /// Name of the location, before cleaning
    #[serde(default)]
    pub stop_name: String,
}

impl fmt::Display for SourceStop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "stop {} (code: {:?}, name: {:?})",
            self.stop_id, self.stop_code, self.stop_name
        )
    }
}

/// A trip as found in trips.txt
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourceTrip {
    /// Unique technical (not for the traveller) identifier for the Trip
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub trip_id: String,
    /// References along which [SourceRoute] this trip runs
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub route_id: String,
    /// References the [SourceCalendar] on which this trip runs
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub service_id: String,
    /// Text that appears on signage identifying the trip's destination to riders, untrimmed
    #[serde(deserialize_with = "deserialize_option_string", default)]
    pub trip_headsign: Option<String>,
    #[serde(deserialize_with = "deserialize_option_direction", default)]
    pub direction_id: Option<DirectionType>,
}

impl fmt::Display for SourceTrip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "trip {} (route id: {}, service id: {})",
            self.trip_id, self.route_id, self.service_id
        )
    }
}

/// A trip calling at a stop, as found in stop_times.txt. Only links are read, times aren't needed
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SourceStopTime {
    pub trip_id: String,
    pub stop_id: String,
}

/// A calender describes on which days the vehicle runs. See <https://gtfs.org/reference/static/#calendartxt>
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourceCalendar {
    /// Unique technical identifier (not for the traveller) of this calendar
    pub service_id: String,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub monday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub tuesday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub wednesday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub thursday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub friday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub saturday: bool,
    #[serde(
        deserialize_with = "deserialize_bool",
        serialize_with = "serialize_bool"
    )]
    pub sunday: bool,
    /// Start service day for the service interval
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub start_date: NaiveDate,
    /// End service day for the service interval. This service day is included in the interval
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub end_date: NaiveDate,
}

impl SourceCalendar {
    /// Returns true if there is a service running on that day
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Date range and weekday both match. Exceptions are not considered
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date && self.valid_weekday(date)
    }
}

/// Defines a specific date that can be added or removed from a [SourceCalendar]. See <https://gtfs.org/reference/static/#calendar_datestxt>
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourceCalendarDate {
    /// Identifier of the service that is modified at this date
    pub service_id: String,
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    /// Date where the service will be added or deleted
    pub date: NaiveDate,
    /// Is the service added or deleted
    pub exception_type: Exception,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{calendar, date};

    #[test]
    fn test_calendar_runs_on() {
        // 2024-02-05 is a Monday
        let weekdays = calendar("WEEKDAY", date(2024, 2, 1), date(2024, 2, 29), [true, true, true, true, true, false, false]);

        assert!(weekdays.runs_on(date(2024, 2, 5)));
        assert!(!weekdays.runs_on(date(2024, 2, 10)));
        // outside the range
        assert!(!weekdays.runs_on(date(2024, 3, 4)));
        // end date is inclusive
        assert!(weekdays.runs_on(date(2024, 2, 29)));
    }

    #[test]
    fn test_deserialize_trip_direction() {
        let trips: Vec<SourceTrip> = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(
                "route_id,service_id,trip_id,trip_headsign,direction_id,block_id\n\
                 1-350,WEEKDAY,T1,Tunney's Pasture,0,B1\n\
                 1-350,WEEKDAY,T2,,,B1\n"
                    .as_bytes(),
            )
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(trips[0].direction_id, Some(DirectionType::Outbound));
        assert_eq!(trips[0].trip_headsign.as_deref(), Some("Tunney's Pasture"));
        assert_eq!(trips[1].direction_id, None);
        assert_eq!(trips[1].trip_headsign, None);
    }
}
