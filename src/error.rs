use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS
    /// failure, dropped connection).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request timed out before a response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}")]
    Status { status: u16 },

    /// A response arrived but does not match any known envelope shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The envelope reported `success: false` with a server-supplied message.
    #[error("{0}")]
    Application(String),
}

pub type Result<T> = std::result::Result<T, Error>;
