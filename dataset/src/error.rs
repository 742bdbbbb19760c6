use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("snapshot is missing the required `{0}` column")]
    MissingColumn(&'static str),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
