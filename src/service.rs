//! Which services run in the export window. Only trips of those services are kept, so a
//! timetable change published ahead of time doesn't leak into the current data.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::gtfs::structure::{Exception, SourceCalendar, SourceCalendarDate, SourceTrip};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Service ids running at least once in a date window. Immutable once computed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceIdSet {
    service_ids: HashSet<String>,
}

impl ServiceIdSet {
    /// Services running on any day of `[start, start + days)`
    pub fn compute(
        calendars: &[SourceCalendar],
        calendar_dates: &[SourceCalendarDate],
        start: NaiveDate,
        days: u32,
    ) -> Self {
        let mut service_ids = HashSet::new();

        for date in start.iter_days().take(days as usize) {
            let mut active = calendars
                .iter()
                .filter(|calendar| calendar.runs_on(date))
                .map(|calendar| calendar.service_id.as_str())
                .collect::<HashSet<_>>();

            let exceptions = calendar_dates.iter().filter(|d| d.date == date);
            for exception in exceptions.clone() {
                if exception.exception_type == Exception::Deleted {
                    active.remove(exception.service_id.as_str());
                }
            }
            for exception in exceptions {
                if exception.exception_type == Exception::Added {
                    active.insert(exception.service_id.as_str());
                }
            }

            service_ids.extend(active.into_iter().map(str::to_string));
        }

        log::debug!(
            "{} services run in the {} days from {}",
            service_ids.len(),
            days,
            start
        );
        Self { service_ids }
    }

    pub fn contains(&self, service_id: &str) -> bool {
        self.service_ids.contains(service_id)
    }

    pub fn len(&self) -> usize {
        self.service_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.service_ids.is_empty()
    }
}

impl FromIterator<String> for ServiceIdSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            service_ids: iter.into_iter().collect(),
        }
    }
}

/// Decides which records are kept. Without a set nothing is excluded
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    service_ids: Option<ServiceIdSet>,
}

impl ServiceFilter {
    pub fn new(service_ids: ServiceIdSet) -> Self {
        Self {
            service_ids: Some(service_ids),
        }
    }

    /// Keeps every service
    pub fn all() -> Self {
        Self { service_ids: None }
    }

    /// Nothing runs in the window, the export would be empty
    pub fn excluding_all(&self) -> bool {
        self.service_ids.as_ref().is_some_and(ServiceIdSet::is_empty)
    }

    fn exclude_service(&self, service_id: &str) -> bool {
        match &self.service_ids {
            Some(service_ids) => !service_ids.contains(service_id),
            None => false,
        }
    }

    pub fn exclude_calendar(&self, calendar: &SourceCalendar) -> bool {
        self.exclude_service(&calendar.service_id)
    }

    pub fn exclude_calendar_date(&self, calendar_date: &SourceCalendarDate) -> bool {
        self.exclude_service(&calendar_date.service_id)
    }

    pub fn exclude_trip(&self, trip: &SourceTrip) -> bool {
        self.exclude_service(&trip.service_id)
    }
}
