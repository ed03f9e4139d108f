use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::Trim;
use serde::de::DeserializeOwned;
use zip::result::ZipError;
use zip::ZipArchive;

use super::structure::{
    SourceAgency, SourceCalendar, SourceCalendarDate, SourceRoute, SourceStop, SourceStopTime,
    SourceTrip,
};

#[derive(thiserror::Error, Debug)]
pub enum GtfsError {
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    #[error("Missing required file {0}")]
    MissingFile(String),
}

pub type GtfsResult<T> = Result<T, GtfsError>;

/// All the records the adapter works on, as read from the feed
#[derive(Debug, Clone, Default)]
pub struct SourceFeed {
    pub agencies: Vec<SourceAgency>,
    pub routes: Vec<SourceRoute>,
    pub stops: Vec<SourceStop>,
    pub trips: Vec<SourceTrip>,
    pub stop_times: Vec<SourceStopTime>,
    pub calendars: Vec<SourceCalendar>,
    pub calendar_dates: Vec<SourceCalendarDate>,
}

enum FeedSource {
    Directory(PathBuf),
    Zip(ZipArchive<BufReader<File>>),
}

/// Reads GTFS text files from either an extracted directory or the zip as published
pub struct FeedReader {
    source: FeedSource,
}

/// Files whose text columns are kept as published. Headsigns are matched verbatim by
/// real-time consumers, so their fields trim themselves where needed
const UNTRIMMED_FILES: [&str; 1] = ["trips.txt"];

fn read_csv<D, R>(file: &str, reader: R) -> GtfsResult<Vec<D>>
where
    D: DeserializeOwned,
    R: Read,
{
    let trim = if UNTRIMMED_FILES.contains(&file) {
        Trim::Headers
    } else {
        Trim::All
    };

    let items = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(trim)
        .from_reader(reader)
        .into_deserialize()
        .collect::<Result<Vec<D>, _>>()
        .map_err(|source| GtfsError::Csv {
            file: file.to_string(),
            source,
        })?;

    log::debug!("Read {} records from {}", items.len(), file);
    Ok(items)
}

impl FeedReader {
    pub fn open(path: impl AsRef<Path>) -> GtfsResult<Self> {
        let path = path.as_ref();
        let source = if path.is_dir() {
            FeedSource::Directory(path.to_path_buf())
        } else {
            let file = File::open(path)?;
            FeedSource::Zip(ZipArchive::new(BufReader::new(file))?)
        };

        Ok(Self { source })
    }

    /// `None` if the file isn't part of the feed
    fn read_optional<D: DeserializeOwned>(&mut self, file: &str) -> GtfsResult<Option<Vec<D>>> {
        match &mut self.source {
            FeedSource::Directory(dir) => {
                let path = dir.join(file);
                if !path.exists() {
                    return Ok(None);
                }
                let reader = BufReader::new(File::open(path)?);
                read_csv(file, reader).map(Some)
            }
            FeedSource::Zip(archive) => {
                // some agencies nest the files in a folder inside the zip
                let name = archive
                    .file_names()
                    .find(|name| *name == file || name.ends_with(&format!("/{}", file)))
                    .map(|name| name.to_string());

                match name {
                    Some(name) => {
                        let entry = archive.by_name(&name)?;
                        read_csv(file, entry).map(Some)
                    }
                    None => Ok(None),
                }
            }
        }
    }

    fn read_required<D: DeserializeOwned>(&mut self, file: &str) -> GtfsResult<Vec<D>> {
        self.read_optional(file)?
            .ok_or_else(|| GtfsError::MissingFile(file.to_string()))
    }

    pub fn read(&mut self) -> GtfsResult<SourceFeed> {
        Ok(SourceFeed {
            agencies: self.read_required("agency.txt")?,
            routes: self.read_required("routes.txt")?,
            stops: self.read_required("stops.txt")?,
            trips: self.read_required("trips.txt")?,
            stop_times: self.read_required("stop_times.txt")?,
            calendars: self.read_optional("calendar.txt")?.unwrap_or_default(),
            calendar_dates: self.read_optional("calendar_dates.txt")?.unwrap_or_default(),
        })
    }
}

pub fn read_feed(path: impl AsRef<Path>) -> GtfsResult<SourceFeed> {
    log::info!("Loading GTFS data from {:?}", path.as_ref());
    FeedReader::open(path)?.read()
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;
    use crate::gtfs::structure::{DirectionType, Exception};
    use crate::test_utils::{write_feed_dir, SAMPLE_FEED};

    #[test]
    fn test_read_directory() {
        let dir = write_feed_dir(SAMPLE_FEED);
        let feed = read_feed(dir.path()).unwrap();

        assert_eq!(feed.agencies.len(), 1);
        assert_eq!(feed.agencies[0].agency_timezone, "America/Toronto");
        assert_eq!(feed.routes.len(), 3);
        assert_eq!(feed.routes[0].route_short_name, None);
        assert_eq!(feed.routes[2].route_type, Some(3));
        assert_eq!(feed.stops[0].stop_id, "EE7610");
        assert_eq!(feed.trips[0].direction_id, Some(DirectionType::Outbound));
        assert_eq!(feed.stop_times.len(), 12);
        assert_eq!(feed.stop_times[5].stop_id, "CD995");
        assert_eq!(feed.calendars.len(), 3);
        assert_eq!(feed.calendar_dates[0].exception_type, Exception::Deleted);
    }

    #[test]
    fn test_read_zip_with_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("gtfs.zip");

        let mut zip = ZipWriter::new(File::create(&zip_path).unwrap());
        for (name, content) in SAMPLE_FEED {
            zip.start_file(format!("google_transit/{}", name), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();

        let feed = read_feed(&zip_path).unwrap();
        assert_eq!(feed.routes.len(), 3);
        assert_eq!(feed.trips.len(), 6);
    }

    #[test]
    fn test_missing_required_file() {
        let without_stops = SAMPLE_FEED
            .iter()
            .filter(|(name, _)| *name != "stops.txt")
            .copied()
            .collect::<Vec<_>>();
        let dir = write_feed_dir(&without_stops);

        match read_feed(dir.path()) {
            Err(GtfsError::MissingFile(file)) => assert_eq!(file, "stops.txt"),
            other => panic!("Expected a missing file error, got {:?}", other),
        }
    }

    #[test]
    fn test_headsigns_kept_verbatim() {
        let trips = "route_id,service_id,trip_id,trip_headsign,direction_id\n\
                     1-350,W,T1, Blair ,0\n\
                     1-350 , W , T2 ,Tunney's Pasture  , 1 \n";
        let files = SAMPLE_FEED
            .iter()
            .map(|(name, content)| match *name {
                "trips.txt" => (*name, trips),
                _ => (*name, *content),
            })
            .collect::<Vec<_>>();
        let dir = write_feed_dir(&files);

        let feed = read_feed(dir.path()).unwrap();
        assert_eq!(feed.trips[0].trip_headsign.as_deref(), Some(" Blair "));
        assert_eq!(feed.trips[1].trip_headsign.as_deref(), Some("Tunney's Pasture  "));
        // ids and directions are still trimmed
        assert_eq!(feed.trips[1].route_id, "1-350");
        assert_eq!(feed.trips[1].service_id, "W");
        assert_eq!(feed.trips[1].trip_id, "T2");
        assert_eq!(feed.trips[1].direction_id, Some(DirectionType::Inbound));
        // other files are trimmed as a whole
        assert_eq!(feed.agencies[0].agency_name, "OC Transpo");
    }

    #[test]
    fn test_calendar_files_optional() {
        let without_calendars = SAMPLE_FEED
            .iter()
            .filter(|(name, _)| !name.starts_with("calendar"))
            .copied()
            .collect::<Vec<_>>();
        let dir = write_feed_dir(&without_calendars);

        let feed = read_feed(dir.path()).unwrap();
        assert!(feed.calendars.is_empty());
        assert!(feed.calendar_dates.is_empty());
    }
}
