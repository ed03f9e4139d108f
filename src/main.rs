mod agency;
mod canonical;
mod error;
mod export;
mod gtfs;
mod pipeline;
mod service;

#[cfg(test)]
mod test_utils;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use error::ParserResult;
use gtfs::utils::parse_date;
use pipeline::{RunOptions, RunOptionsBuilder};

/// Local settings, read by the binary and the tests alike
const DOTENV_FILE: &str = ".env";

/// Generates OC Transpo train routes, stops and directions from the agency's GTFS feed
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// GTFS feed, extracted directory or zip
    #[arg(env = "GTFS_FEED", default_value = "input/gtfs.zip")]
    feed: PathBuf,

    #[arg(env = "OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Prepended to every output file name
    #[arg(env = "FILE_PREFIX", default_value = "")]
    file_prefix: String,

    /// First day of service to keep (YYYYMMDD), today in the agency timezone by default
    #[arg(long, env = "SERVICE_START_DATE")]
    start_date: Option<String>,

    /// Number of days of service to keep
    #[arg(long, env = "SERVICE_WINDOW_DAYS", default_value_t = service::DEFAULT_WINDOW_DAYS)]
    days: u32,

    /// Keep trips of every service, whatever the date
    #[arg(long)]
    all_services: bool,
}

impl Args {
    fn run_options(&self) -> ParserResult<RunOptions> {
        let start_date = self.start_date.as_deref().map(parse_date).transpose()?;

        Ok(RunOptionsBuilder::default()
            .feed(self.feed.clone())
            .output_dir(self.output_dir.clone())
            .file_prefix(self.file_prefix.clone())
            .start_date(start_date)
            .days(self.days)
            .all_services(self.all_services)
            .build()?)
    }
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    dotenvy::from_filename(DOTENV_FILE).ok();
    env_logger::try_init().ok();

    let args = Args::parse();
    log::debug!("{:?}", args);

    match args.run_options().and_then(|options| pipeline::generate(&options)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
