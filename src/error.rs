use thiserror::Error;

/// Errors produced while loading, transforming, or rendering weather data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: cannot parse date {value:?}")]
    MalformedDate { line: u64, value: String },
    #[error("line {line}: column `{column}` is not a number: {value:?}")]
    MalformedNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("no records found for city {city:?}")]
    EmptyDataset { city: String },
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
