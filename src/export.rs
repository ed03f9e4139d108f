use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::canonical::CanonicalFeed;
use crate::error::ParserResult;

pub const AGENCY_FILE: &str = "agency.json";
pub const ROUTES_FILE: &str = "routes.json";
pub const STOPS_FILE: &str = "stops.json";
pub const TRIPS_FILE: &str = "trips.json";

/// Writes the canonical data as pretty printed JSON, one file per record type
pub struct Exporter {
    output_dir: PathBuf,
    file_prefix: String,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.file_prefix, file))
    }

    fn staging_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}.tmp", self.file_prefix, file))
    }

    /// The path is recorded before creating the file so a partial write is cleaned up too
    fn stage<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
        staged: &mut Vec<(PathBuf, PathBuf)>,
    ) -> ParserResult<()> {
        let temp = self.staging_path(file);
        staged.push((temp.clone(), self.path(file)));
        let mut writer = BufWriter::new(File::create(&temp)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        log::debug!("Staged {:?}", temp);
        Ok(())
    }

    /// Sorts before writing so two runs on the same feed give the same files.
    /// Every file is staged next to its target first, previous outputs are only replaced
    /// once all four were written.
    pub fn export(&self, feed: &CanonicalFeed) -> ParserResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let mut routes = feed.routes.clone();
        routes.sort_by_key(|route| route.id);
        let mut stops = feed.stops.clone();
        stops.sort_by_key(|stop| stop.id);
        let mut directions = feed.directions.clone();
        directions.sort_by_key(|direction| (direction.route_id, direction.direction_id));

        let mut staged = Vec::with_capacity(4);
        let result = self
            .stage(AGENCY_FILE, &feed.agency, &mut staged)
            .and_then(|_| self.stage(ROUTES_FILE, &routes, &mut staged))
            .and_then(|_| self.stage(STOPS_FILE, &stops, &mut staged))
            .and_then(|_| self.stage(TRIPS_FILE, &directions, &mut staged));
        if let Err(e) = result {
            for (temp, _) in &staged {
                fs::remove_file(temp).ok();
            }
            return Err(e);
        }

        let mut written = Vec::with_capacity(staged.len());
        for (temp, path) in staged {
            fs::rename(&temp, &path)?;
            log::debug!("Wrote {:?}", path);
            written.push(path);
        }

        log::info!(
            "Exported {} routes, {} stops and {} directions to {:?}",
            routes.len(),
            stops.len(),
            directions.len(),
            self.output_dir
        );
        Ok(written)
    }
}
