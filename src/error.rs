use crate::agency::error::UnresolvableIdentity;
use crate::gtfs::reader::GtfsError;
use crate::gtfs::utils::DateError;
use crate::pipeline::RunOptionsBuilderError;

#[derive(thiserror::Error, Debug)]
pub enum ParserError {
    #[error("{0}")]
    Identity(#[from] UnresolvableIdentity),

    #[error("GTFS error: {0}")]
    Gtfs(#[from] GtfsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid options: {0}")]
    Options(#[from] RunOptionsBuilderError),

    #[error("Data format error: {0}")]
    DataFormat(String),
}

impl From<DateError> for ParserError {
    fn from(value: DateError) -> Self {
        ParserError::DataFormat(value.to_string())
    }
}

pub type ParserResult<T> = Result<T, ParserError>;
