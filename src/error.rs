use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

/// Why a run stopped. Each variant maps to exit code 1.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("could not set up logging: {_0}")]
    Logging(#[error(not(source))] String),
    #[display("scan failed")]
    Scan,
    #[display("could not write output")]
    Output,
}
