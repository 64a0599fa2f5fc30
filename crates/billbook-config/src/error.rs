use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a valid config file: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("could not encode config: {0}")]
    Encode(String),
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("`{value}` is not a valid value for `{key}`")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> ConfigError {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }
}
