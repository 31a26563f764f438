use std::fmt::Display;

use thiserror::Error;

use crate::parser::ParseError;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} could not be read as an instance.")]
    InvalidInstanceFile(String),
    #[error("The instance file is malformed, more details: {0}")]
    InvalidFormat(#[from] ParseError),
}

impl CliError {
    pub(crate) fn invalid_instance_file(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
