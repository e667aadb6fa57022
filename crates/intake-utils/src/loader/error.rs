use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    WalkDir(#[from] async_walkdir::Error),
    #[error("invalid file url: {0}")]
    InvalidUrl(String),
    #[error("unsupported loader scheme: {0}")]
    UnsupportedScheme(String),
}
