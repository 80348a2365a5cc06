use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Segment index {index} out of range (segment count: {count})")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("Unknown segment label: {0}")]
    UnknownSegment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
