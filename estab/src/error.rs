use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Aggregation not found: {0}")]
    AggregationNotFound(String),

    #[error("Response contains no aggregations and no hits")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
